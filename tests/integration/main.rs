//! Integration tests for resource-access.
//!
//! These tests drive the [`RequestOrchestrator`](resource_access::RequestOrchestrator)
//! end to end against the in-memory collaborators from
//! `resource_access::testing`, using a small social-network schema
//! (`post`, `user`, `draft`) defined in `common`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With request spans and denial records on stderr
//! RUST_LOG=resource_access=debug cargo test --test integration -- --nocapture
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod dispatch_tests;
mod ordering_tests;
mod post_scenario_tests;
mod read_tests;
mod registry_tests;
