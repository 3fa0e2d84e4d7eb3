//! Configuration types.
//!
//! - [`OrchestratorConfig`]: Limits and logging behavior of request handling
//!
//! Resource types themselves are configured through
//! [`ResourceTypeDescriptor`](crate::registry::ResourceTypeDescriptor).

mod orchestrator;

pub use orchestrator::OrchestratorConfig;
