//! Result type returned by resource function handlers.

use serde::{Deserialize, Serialize};

/// The `(status, body)` pair a function handler returns.
///
/// The status follows HTTP conventions: `2xx` is success, `4xx` and `5xx`
/// are failures. The body is opaque to the core and travels back to the
/// caller unchanged.
///
/// ## Example
///
/// ```rust
/// use resource_access::FunctionResult;
/// use serde_json::json;
///
/// let result = FunctionResult::ok(json!({"likeCount": 4}));
/// assert!(result.is_success());
/// assert_eq!(result.status(), 200);
///
/// let conflict = FunctionResult::status_only(409);
/// assert!(conflict.is_failure());
/// assert!(conflict.body().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResult {
    status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<serde_json::Value>,
}

impl FunctionResult {
    /// Creates a result with the given status and optional body.
    pub fn new(status: u16, body: Option<serde_json::Value>) -> Self {
        Self { status, body }
    }

    /// A `200` result carrying a body.
    pub fn ok(body: serde_json::Value) -> Self {
        Self::new(200, Some(body))
    }

    /// A `204` result with no body.
    pub fn no_content() -> Self {
        Self::new(204, None)
    }

    /// A result with a status and no body.
    pub fn status_only(status: u16) -> Self {
        Self::new(status, None)
    }

    /// Returns the status code.
    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response body, if any.
    #[inline]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Consumes the result and returns the body.
    pub fn into_body(self) -> Option<serde_json::Value> {
        self.body
    }

    /// Returns `true` for `1xx`-`3xx` statuses.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    /// Returns `true` for `4xx` and `5xx` statuses.
    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}
