//! Prelude module for convenient imports.
//!
//! ```rust
//! use resource_access::prelude::*;
//! ```
//!
//! This provides access to:
//! - Registry and descriptor types
//! - Policy and evaluator types
//! - Function dispatch types
//! - The orchestrator and its configuration
//! - Error types
//! - Common data types

pub use crate::{
    config::OrchestratorConfig,
    dispatch::{FnHandler, FunctionCall, FunctionContext, FunctionHandler, FunctionTable, HandlerError},
    error::{AccessDenied, Error, ErrorKind, Result},
    orchestrator::RequestOrchestrator,
    persistence::Persistence,
    policy::{AccessPolicy, PermissionEvaluator, RulePolicy},
    registry::{Cardinality, RegisteredType, ResourceRegistry, ResourceTypeDescriptor},
    types::{
        Access, AccessDecision, AttributeValue, FieldValue, FunctionResult, Operation, Principal, ReadResponse,
        Request, ResourceId, ResourceInstance, Response, WriteSet,
    },
};
