//! Main error type for the access-control core.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;
use crate::types::FunctionResult;

/// The primary error type for access-control operations.
///
/// `Error` carries enough context for a transport layer to build a response
/// without ever exposing instance data:
/// - [`kind()`](Error::kind): Categorization for `match` statements
/// - [`request_id()`](Error::request_id): Correlation ID assigned by the orchestrator
/// - [`function_result()`](Error::function_result): The handler's untouched result, for
///   [`ErrorKind::HandlerFailure`] raised from a failure status
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind                 (category for matching)
/// ├── message: String                 (human-readable, never carries field values)
/// ├── request_id: Option              (orchestrator-assigned correlation ID)
/// ├── function_result: Option         (handler result passed through verbatim)
/// └── source: Option                  (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use resource_access::{Error, ErrorKind};
///
/// fn status_for(err: &Error) -> u16 {
///     match err.kind() {
///         ErrorKind::HandlerFailure => err
///             .function_result()
///             .map(|result| result.status())
///             .unwrap_or(500),
///         kind => kind.http_status_code(),
///     }
/// }
///
/// assert_eq!(status_for(&Error::not_found("post:42")), 404);
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    request_id: Option<String>,
    function_result: Option<FunctionResult>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_access::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::UnknownField, "post has no field 'title'");
    /// assert_eq!(err.kind(), ErrorKind::UnknownField);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self { kind, message: message.into(), request_id: None, function_result: None, source: None }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::SessionRequired => "an authenticated session is required",
            ErrorKind::Forbidden => "permission denied",
            ErrorKind::UnknownResource => "unknown resource",
            ErrorKind::UnknownFunction => "unknown function",
            ErrorKind::UnknownField => "unknown field",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::HandlerFailure => "function handler failed",
            ErrorKind::DuplicatePath => "resource path already registered",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Persistence => "persistence error",
        };
        Self::new(kind, message)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the orchestrator-assigned request ID, if available.
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the function handler's result when the handler reported a
    /// failure status.
    ///
    /// The result is exactly what the handler returned; the core never
    /// rewrites it.
    #[inline]
    pub fn function_result(&self) -> Option<&FunctionResult> {
        self.function_result.as_ref()
    }

    /// Returns the HTTP status a transport should use for this error.
    ///
    /// Handler failures that carry a [`FunctionResult`] use the handler's
    /// own status.
    pub fn http_status_code(&self) -> u16 {
        match &self.function_result {
            Some(result) => result.status(),
            None => self.kind.http_status_code(),
        }
    }

    /// Sets the request ID for this error.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attaches a handler result to this error.
    #[must_use]
    pub fn with_function_result(mut self, result: FunctionResult) -> Self {
        self.function_result = Some(result);
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Sets an already boxed source error.
    #[must_use]
    pub fn with_boxed_source(mut self, source: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        self.source = Some(source);
        self
    }

    // Convenience constructors for common error types

    /// Creates a session-required error.
    pub fn session_required() -> Self {
        Self::from_kind(ErrorKind::SessionRequired)
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Creates an unknown resource error for the given path.
    pub fn unknown_resource(path: &str) -> Self {
        Self::new(ErrorKind::UnknownResource, format!("no resource registered at '{path}'"))
    }

    /// Creates an unknown function error.
    pub fn unknown_function(path: &str, function: &str) -> Self {
        Self::new(ErrorKind::UnknownFunction, format!("{path} declares no function '{function}'"))
    }

    /// Creates an unknown field error.
    pub fn unknown_field(path: &str, field: &str) -> Self {
        Self::new(ErrorKind::UnknownField, format!("{path} has no field '{field}'"))
    }

    /// Creates a not found error.
    ///
    /// The message names only the reference that was requested, so an
    /// invisible instance reads exactly like a missing one.
    pub fn not_found(reference: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotFound, format!("{reference} not found"))
    }

    /// Creates a handler failure error.
    pub fn handler_failure(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::HandlerFailure, message)
    }

    /// Creates a duplicate path error.
    pub fn duplicate_path(path: &str) -> Self {
        Self::new(ErrorKind::DuplicatePath, format!("resource path '{path}' is already registered"))
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Creates a persistence error.
    pub fn persistence(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Persistence, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref request_id) = self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_argument(format!("malformed payload: {}", err)).with_source(err)
    }
}
