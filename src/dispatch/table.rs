//! Per-type mapping from function name to handler.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::{FnHandler, FunctionContext, FunctionHandler, HandlerError};
use crate::types::FunctionResult;

/// The function handlers of one resource type.
///
/// Built once at startup and registered together with the type's
/// descriptor; the registry checks that the table and the descriptor's
/// declared function names match exactly.
///
/// ```rust
/// use resource_access::dispatch::{FunctionContext, FunctionTable};
/// use resource_access::FunctionResult;
///
/// let table = FunctionTable::new()
///     .with_fn("like", |_ctx: FunctionContext| async move { Ok(FunctionResult::no_content()) });
///
/// assert!(table.contains("like"));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct FunctionTable {
    handlers: BTreeMap<String, Arc<dyn FunctionHandler>>,
}

impl FunctionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a handler to a function name, replacing any previous binding.
    #[must_use]
    pub fn with_handler(mut self, name: impl Into<String>, handler: impl FunctionHandler + 'static) -> Self {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    /// Binds an already shared handler to a function name.
    #[must_use]
    pub fn with_shared(mut self, name: impl Into<String>, handler: Arc<dyn FunctionHandler>) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    /// Binds an async closure to a function name.
    #[must_use]
    pub fn with_fn<F, Fut>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(FunctionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<FunctionResult, HandlerError>> + Send + 'static,
    {
        self.with_handler(name, FnHandler::new(f))
    }

    /// Returns the handler bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn FunctionHandler>> {
        self.handlers.get(name)
    }

    /// Returns `true` if a handler is bound to `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Iterates over bound function names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Returns the number of bound handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is bound.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
