//! Core types for the access-control layer.
//!
//! This module provides the fundamental types used throughout the crate:
//!
//! - [`Principal`]: The `(user, client)` pair every decision is made for
//! - [`ResourceInstance`]: A request-local snapshot of a stored entity
//! - [`AttributeValue`] / [`FieldValue`]: Scalar and write-set values
//! - [`AccessDecision`]: The outcome of one evaluator query
//! - [`FunctionResult`]: The `(status, body)` pair returned by function handlers
//! - [`Request`] / [`Response`]: The logical shapes exchanged with a transport
//! - [`Resource`]: Maps host types onto resource instances

mod decision;
mod entity;
mod function;
mod instance;
mod instance_ref;
mod principal;
mod request;
mod value;

pub use decision::{Access, AccessDecision, DecisionReason, DecisionTarget};
pub use entity::{RelationshipTargets, Resource};
pub use function::FunctionResult;
pub use instance::ResourceInstance;
pub use instance_ref::{InstanceRef, ParseError};
pub use principal::{ClientRef, Principal, UserRef};
pub use request::{Operation, ReadResponse, Request, Response, WriteSet};
pub use value::{AttributeValue, FieldValue};

/// Integer identifier of a resource instance.
pub type ResourceId = i64;
