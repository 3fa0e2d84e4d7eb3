//! Request orchestration.
//!
//! [`RequestOrchestrator`] is the single entry point the transport layer
//! calls for every create, read, update, delete and function invocation.
//! It ties the registry, the permission evaluators, the persistence
//! collaborator and the function dispatcher together and fixes the order
//! in which their rejections surface.

#[allow(clippy::module_inception)]
mod orchestrator;
mod phase;
mod write_set;

pub use orchestrator::RequestOrchestrator;
pub use phase::RequestPhase;
