//! Routing of function invocations to their handlers.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use super::FunctionCall;
use crate::registry::RegisteredType;
use crate::types::{FunctionResult, Principal, ResourceInstance};
use crate::{Error, Result};

/// Routes a named function invocation to the resource type's handler.
///
/// The dispatcher is stateless; handler tables live on the registered
/// types. It never retries: a handler runs at most once per call.
///
/// ## Outcomes
///
/// | Situation                                   | Result                         |
/// |---------------------------------------------|--------------------------------|
/// | type requires a session, principal has none | `Err(SessionRequired)`         |
/// | name not declared by the type               | `Err(UnknownFunction)`         |
/// | handler returns `Err` or panics             | `Err(HandlerFailure)`          |
/// | handler returns a 4xx/5xx status            | `Err(HandlerFailure)` + result |
/// | handler returns any other status            | `Ok(result)`, unchanged        |
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionDispatcher;

impl FunctionDispatcher {
    /// Creates a dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// Invokes `function_name` on `instance`.
    ///
    /// The session requirement is checked before the name so that an
    /// unauthenticated caller learns nothing about which functions exist.
    ///
    /// # Errors
    ///
    /// See the outcome table on [`FunctionDispatcher`].
    pub async fn dispatch(
        &self,
        resource_type: &RegisteredType,
        function_name: &str,
        principal: &Principal,
        instance: &ResourceInstance,
        payload: Option<&serde_json::Value>,
    ) -> Result<FunctionResult> {
        let descriptor = resource_type.descriptor();

        if descriptor.requires_session() && !principal.has_session() {
            return Err(Error::session_required());
        }
        if !descriptor.declares_function(function_name) {
            return Err(Error::unknown_function(descriptor.path(), function_name));
        }
        let handler = resource_type.functions().get(function_name).ok_or_else(|| {
            Error::configuration(format!(
                "{} declares function '{}' without a handler",
                descriptor.path(),
                function_name
            ))
        })?;

        tracing::debug!(
            path = descriptor.path(),
            function = function_name,
            instance = instance.id(),
            "dispatching function"
        );

        let call = FunctionCall { principal, instance, payload };
        // The call runs inside the guard so panics raised before the first poll are caught.
        let outcome = AssertUnwindSafe(async move { handler.call(call).await }).catch_unwind().await;

        match outcome {
            Ok(Ok(result)) if result.is_success() => Ok(result),
            Ok(Ok(result)) => {
                tracing::debug!(
                    path = descriptor.path(),
                    function = function_name,
                    status = result.status(),
                    "function handler reported failure status"
                );
                Err(Error::handler_failure(format!(
                    "{} function '{}' returned status {}",
                    descriptor.path(),
                    function_name,
                    result.status()
                ))
                .with_function_result(result))
            },
            Ok(Err(source)) => {
                tracing::warn!(
                    path = descriptor.path(),
                    function = function_name,
                    error = %source,
                    "function handler failed"
                );
                Err(Error::handler_failure(format!("{} function '{}' failed", descriptor.path(), function_name))
                    .with_boxed_source(source))
            },
            Err(_) => {
                tracing::warn!(path = descriptor.path(), function = function_name, "function handler panicked");
                Err(Error::handler_failure(format!(
                    "{} function '{}' panicked",
                    descriptor.path(),
                    function_name
                )))
            },
        }
    }
}
