//! # resource-access
//!
//! Access control and function dispatch for typed resources exposed over a
//! network API.
//!
//! Every incoming request names a resource type by path, carries a
//! [`Principal`], and asks to create, read, update, delete or invoke a
//! function on an instance. This crate decides whether the request may
//! proceed, at the level of the whole resource and of each attribute and
//! relationship, and routes function invocations to their handlers. Storage
//! and transport stay outside; they are reached through the
//! [`Persistence`](persistence::Persistence) trait and the serde-ready
//! [`Request`] / [`Response`] types.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use resource_access::prelude::*;
//! use resource_access::testing::InMemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> resource_access::Result<()> {
//! let mut registry = ResourceRegistry::new();
//! registry.register(
//!     ResourceTypeDescriptor::new("post", "id")
//!         .with_session_required(true)
//!         .with_attributes(["text", "likeCount"]),
//!     RulePolicy::new()
//!         .visible_when(|_, _| true)
//!         .attribute_visible_when(|_, _, name| name != "likeCount"),
//!     FunctionTable::new(),
//! )?;
//!
//! let store = InMemoryStore::new();
//! store.insert(ResourceInstance::new("post", 42).with_attribute("text", "hi").with_attribute("likeCount", 3));
//!
//! let orchestrator = RequestOrchestrator::new(Arc::new(registry), Arc::new(store));
//!
//! // Anonymous callers learn nothing, not even whether post 42 exists
//! let err = orchestrator.read("post", &Principal::unauthenticated(), 42, None).await.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::SessionRequired);
//!
//! // Invisible fields are silently left out
//! let post = orchestrator.read("post", &Principal::user_only(7), 42, None).await?;
//! assert!(post.contains("text"));
//! assert!(!post.contains("likeCount"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Concepts
//!
//! - **Registry**: `path` → descriptor + [`AccessPolicy`](policy::AccessPolicy) + function handlers
//! - **Fields only narrow**: a field is accessible only if its resource is
//! - **Invisible = missing**: an instance the principal cannot see is `NotFound`
//! - **All or nothing**: one non-editable field rejects the whole write
//!
//! ## Features
//!
//! - `derive`: Enable `#[derive(Resource)]`

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod config;
pub mod error;
pub mod registry;
pub mod types;

// Decision and dispatch
pub mod dispatch;
pub mod policy;

// Collaborators
pub mod persistence;

// Request handling
pub mod orchestrator;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use error::{AccessDenied, Error, ErrorKind, Result};
pub use orchestrator::RequestOrchestrator;
pub use registry::{ResourceRegistry, ResourceTypeDescriptor};
pub use types::{
    Access, AccessDecision, AttributeValue, DecisionReason, DecisionTarget, FieldValue, FunctionResult, InstanceRef,
    Operation, Principal, ReadResponse, Request, Resource, ResourceId, ResourceInstance, Response, WriteSet,
};

// Derive macro, in the macro namespace next to the trait
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use resource_access_derive::Resource;
