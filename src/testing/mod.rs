//! Testing utilities.
//!
//! In-process collaborators for exercising the access-control core without
//! a real store or real function bodies:
//!
//! - [`InMemoryStore`]: A [`Persistence`](crate::persistence::Persistence)
//!   backed by a map, with per-method call counters
//! - [`RecordingHandler`]: A function handler that returns a fixed result
//!   and records what it was called with
//! - [`AllowAll`] / [`DenyAll`]: Fixed-answer policies
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use resource_access::dispatch::FunctionTable;
//! use resource_access::orchestrator::RequestOrchestrator;
//! use resource_access::registry::{ResourceRegistry, ResourceTypeDescriptor};
//! use resource_access::testing::{AllowAll, InMemoryStore};
//!
//! let mut registry = ResourceRegistry::new();
//! registry.register(ResourceTypeDescriptor::new("post", "id"), AllowAll, FunctionTable::new()).unwrap();
//!
//! let store = Arc::new(InMemoryStore::new());
//! let orchestrator = RequestOrchestrator::new(Arc::new(registry), store.clone());
//! # let _ = orchestrator;
//! ```

mod in_memory;
mod policies;
mod recording;

pub use in_memory::InMemoryStore;
pub use policies::{AllowAll, DenyAll};
pub use recording::{RecordedCall, RecordingHandler};
