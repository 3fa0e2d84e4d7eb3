//! Error types for the access-control core.
//!
//! The crate provides two error types:
//! - [`Error`]: Every rejection or failure the core surfaces to its caller
//! - [`AccessDenied`]: A structured record of an authorization denial
//!
//! ## Key Invariant
//!
//! Evaluators answer with booleans. Only the orchestrator turns a denial into
//! an `Err`, and it picks the kind so that an invisible instance is reported as
//! [`ErrorKind::NotFound`], never as [`ErrorKind::Forbidden`].
//!
//! ```rust,ignore
//! // evaluator - denial is `false`
//! let visible = evaluator.is_visible(&principal, &instance);
//!
//! // orchestrator - denial is Err(NotFound) or Err(Forbidden)
//! orchestrator.read("post", &principal, 42, None).await?;
//! ```

mod access_denied;
mod core;
mod kind;

pub use access_denied::AccessDenied;
pub use self::core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for access-control operations.
pub type Result<T> = std::result::Result<T, Error>;
