//! AccessDenied record for authorization denials.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// A structured record of an authorization denial.
///
/// Evaluators answer with plain booleans. When the orchestrator rejects a
/// request because of such an answer, it builds an `AccessDenied` describing
/// who was denied what on which target, logs it, and converts it into an
/// [`Error`](super::Error).
///
/// ## Key Invariant
///
/// `AccessDenied` never carries attribute values. The target is a reference
/// such as `post:42` or `post:42#likeCount`, which the requester already
/// supplied.
///
/// ```rust
/// use resource_access::AccessDenied;
///
/// let denied = AccessDenied::new("user:7/client:1", "edit", "post:42#likeCount")
///     .with_reason("attribute not editable");
///
/// assert_eq!(denied.principal(), "user:7/client:1");
/// assert_eq!(denied.action(), "edit");
/// assert_eq!(denied.target(), "post:42#likeCount");
/// ```
#[derive(Debug, Clone)]
pub struct AccessDenied {
    principal: Cow<'static, str>,
    action: Cow<'static, str>,
    target: Cow<'static, str>,
    reason: Option<Cow<'static, str>>,
    request_id: Option<String>,
}

impl AccessDenied {
    /// Creates a new AccessDenied record.
    ///
    /// # Arguments
    ///
    /// * `principal` - The principal label (e.g., "user:7/client:1")
    /// * `action` - The action that was checked (e.g., "create", "view", "edit")
    /// * `target` - The instance or field reference that was checked
    pub fn new(
        principal: impl Into<Cow<'static, str>>,
        action: impl Into<Cow<'static, str>>,
        target: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            principal: principal.into(),
            action: action.into(),
            target: target.into(),
            reason: None,
            request_id: None,
        }
    }

    /// Returns the principal that was denied.
    #[inline]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Returns the action that was checked.
    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the target that was checked.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the denial reason, if available.
    #[inline]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Returns the request ID, if available.
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Sets the denial reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Cow<'static, str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Returns a formatted string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![
            format!("principal={}", self.principal),
            format!("action={}", self.action),
            format!("target={}", self.target),
        ];

        if let Some(ref reason) = self.reason {
            parts.push(format!("reason={}", reason));
        }

        if let Some(ref request_id) = self.request_id {
            parts.push(format!("request_id={}", request_id));
        }

        format!("access_denied: {}", parts.join(" "))
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "access denied: {} cannot {} {}", self.principal, self.action, self.target)?;

        if let Some(ref reason) = self.reason {
            write!(f, " ({})", reason)?;
        }

        Ok(())
    }
}

impl StdError for AccessDenied {}

/// Converts the denial into a `Forbidden` error.
///
/// The principal label is left out of the error message: the message travels
/// back to the caller, the label only belongs in logs.
impl From<AccessDenied> for super::Error {
    fn from(denied: AccessDenied) -> Self {
        let mut err = super::Error::forbidden(format!("cannot {} {}", denied.action, denied.target));
        if let Some(request_id) = denied.request_id {
            err = err.with_request_id(request_id);
        }
        err
    }
}
