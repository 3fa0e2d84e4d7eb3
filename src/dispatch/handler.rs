//! Function handler trait and closure adapter.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::types::{FunctionResult, Principal, ResourceInstance};

/// Error type function handlers may fail with.
pub type HandlerError = Box<dyn StdError + Send + Sync + 'static>;

/// The arguments of one function invocation, borrowed from the request.
#[derive(Debug, Clone, Copy)]
pub struct FunctionCall<'a> {
    /// The principal invoking the function.
    pub principal: &'a Principal,
    /// The target instance, already checked for visibility.
    pub instance: &'a ResourceInstance,
    /// The opaque request payload.
    pub payload: Option<&'a serde_json::Value>,
}

/// An owned copy of a [`FunctionCall`], handed to closure handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionContext {
    /// The principal invoking the function.
    pub principal: Principal,
    /// The target instance, already checked for visibility.
    pub instance: ResourceInstance,
    /// The opaque request payload.
    pub payload: Option<serde_json::Value>,
}

impl From<FunctionCall<'_>> for FunctionContext {
    fn from(call: FunctionCall<'_>) -> Self {
        Self { principal: *call.principal, instance: call.instance.clone(), payload: call.payload.cloned() }
    }
}

/// A side-effecting action exposed by a resource type.
///
/// Handlers run outside the attribute/relationship write rules and do their
/// own authorization. They receive the principal, the instance snapshot and
/// the payload, and return a [`FunctionResult`]; returning `Err` is reported
/// to the caller as [`ErrorKind::HandlerFailure`](crate::ErrorKind::HandlerFailure).
///
/// The trait is object-safe so handlers can be stored as
/// `Arc<dyn FunctionHandler>`.
///
/// ## Example
///
/// ```rust
/// use futures::future::BoxFuture;
/// use resource_access::dispatch::{FunctionCall, FunctionHandler, HandlerError};
/// use resource_access::FunctionResult;
/// use serde_json::json;
///
/// struct Ping;
///
/// impl FunctionHandler for Ping {
///     fn call<'a>(
///         &'a self,
///         call: FunctionCall<'a>,
///     ) -> BoxFuture<'a, Result<FunctionResult, HandlerError>> {
///         let id = call.instance.id();
///         Box::pin(async move { Ok(FunctionResult::ok(json!({ "pong": id }))) })
///     }
/// }
/// ```
pub trait FunctionHandler: Send + Sync {
    /// Runs the function.
    fn call<'a>(&'a self, call: FunctionCall<'a>) -> BoxFuture<'a, Result<FunctionResult, HandlerError>>;
}

/// Adapts an async closure over an owned [`FunctionContext`] into a handler.
///
/// ```rust
/// use resource_access::dispatch::{FnHandler, FunctionContext, HandlerError};
/// use resource_access::FunctionResult;
///
/// let handler = FnHandler::new(|ctx: FunctionContext| async move {
///     Ok::<_, HandlerError>(FunctionResult::ok(serde_json::json!({ "id": ctx.instance.id() })))
/// });
/// # let _ = handler;
/// ```
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    /// Wraps a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> FunctionHandler for FnHandler<F>
where
    F: Fn(FunctionContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FunctionResult, HandlerError>> + Send + 'static,
{
    fn call<'a>(&'a self, call: FunctionCall<'a>) -> BoxFuture<'a, Result<FunctionResult, HandlerError>> {
        (self.f)(FunctionContext::from(call)).boxed()
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}
