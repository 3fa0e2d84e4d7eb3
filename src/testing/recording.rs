//! A function handler that records its calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;
use parking_lot::Mutex;

use crate::dispatch::{FunctionCall, FunctionHandler, HandlerError};
use crate::types::{FunctionResult, ResourceId};

/// A [`FunctionHandler`] that returns a fixed result and records each call.
///
/// Clones share their counters, so a test can keep one clone and register
/// the other.
///
/// ```rust
/// use resource_access::dispatch::FunctionTable;
/// use resource_access::testing::RecordingHandler;
/// use resource_access::FunctionResult;
///
/// let like = RecordingHandler::new(FunctionResult::no_content());
/// let table = FunctionTable::new().with_handler("like", like.clone());
///
/// assert!(table.contains("like"));
/// assert_eq!(like.calls(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    result: FunctionResult,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<RecordedCall>>>,
}

/// What a [`RecordingHandler`] saw on one call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// The invoking user, if any.
    pub user_id: Option<ResourceId>,
    /// The target instance's identifier.
    pub instance_id: ResourceId,
    /// The payload, as received.
    pub payload: Option<serde_json::Value>,
}

impl RecordingHandler {
    /// Creates a handler that always returns `result`.
    pub fn new(result: FunctionResult) -> Self {
        Self { result, calls: Arc::new(AtomicUsize::new(0)), seen: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Returns the number of calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns every recorded call, oldest first.
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.seen.lock().clone()
    }
}

impl FunctionHandler for RecordingHandler {
    fn call<'a>(&'a self, call: FunctionCall<'a>) -> BoxFuture<'a, Result<FunctionResult, HandlerError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(RecordedCall {
            user_id: call.principal.user_id(),
            instance_id: call.instance.id(),
            payload: call.payload.cloned(),
        });
        let result = self.result.clone();
        Box::pin(async move { Ok(result) })
    }
}
