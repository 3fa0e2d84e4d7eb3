//! Error kind enumeration for categorizing access-control failures.

/// Categorization of errors produced by the access-control core.
///
/// This enum provides a stable interface for matching on rejection causes so
/// that a transport layer can map each one onto a wire response.
///
/// ## Ordering Guarantees
///
/// The orchestrator raises these kinds in a fixed order so that no rejection
/// leaks more than the caller is entitled to learn:
///
/// | Step | ErrorKind          | Raised when                                   |
/// |------|--------------------|-----------------------------------------------|
/// | 1    | `UnknownResource`  | Path is not registered                        |
/// | 2    | `SessionRequired`  | Type requires a session and none is present   |
/// | 3    | `NotFound`         | Instance missing **or** not visible           |
/// | 4    | `Forbidden`        | Resource- or field-level check failed         |
/// | 5    | `UnknownField`     | Request names an undeclared field             |
/// | 5    | `UnknownFunction`  | Request names an undeclared function          |
/// | 6    | `HandlerFailure`   | Function handler failed                       |
///
/// None of these kinds is retriable by the core. Retry policy belongs to the
/// transport collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The resource type requires an authenticated session and the principal
    /// carries none.
    ///
    /// HTTP: 401 Unauthorized
    #[error("session required")]
    SessionRequired,

    /// Resource-level or field-level authorization failed.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// No resource type is registered under the requested path.
    ///
    /// HTTP: 404 Not Found
    #[error("unknown resource")]
    UnknownResource,

    /// The function name is not declared by the resource type.
    ///
    /// HTTP: 404 Not Found
    #[error("unknown function")]
    UnknownFunction,

    /// An attribute or relationship name is not part of the type's schema.
    ///
    /// HTTP: 400 Bad Request
    #[error("unknown field")]
    UnknownField,

    /// The instance does not exist, or exists but is not visible to the
    /// principal. The two cases are deliberately indistinguishable.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// A function handler raised an error or returned a failure status.
    ///
    /// HTTP: the handler's own status when one was returned, 500 otherwise.
    #[error("handler failure")]
    HandlerFailure,

    /// A resource type with the same path is already registered.
    #[error("duplicate path")]
    DuplicatePath,

    /// A descriptor or registration is internally inconsistent.
    #[error("configuration error")]
    Configuration,

    /// The request itself is malformed (too many fields, bad cardinality).
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// The persistence collaborator failed. Its error is attached as source.
    ///
    /// HTTP: 500 Internal Server Error
    #[error("persistence error")]
    Persistence,
}

impl ErrorKind {
    /// Returns `true` if this kind is a terminal authorization outcome rather
    /// than a malformed request or collaborator failure.
    #[inline]
    pub fn is_access_denial(&self) -> bool {
        matches!(self, ErrorKind::SessionRequired | ErrorKind::Forbidden | ErrorKind::NotFound)
    }

    /// Returns `true` if the request referenced something that is not declared.
    #[inline]
    pub fn is_unknown_entity(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnknownResource | ErrorKind::UnknownFunction | ErrorKind::UnknownField
        )
    }

    /// Returns the default HTTP status code for this error kind.
    ///
    /// This is useful for mapping core errors to HTTP responses.
    #[inline]
    pub fn http_status_code(&self) -> u16 {
        match self {
            ErrorKind::SessionRequired => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::UnknownResource | ErrorKind::UnknownFunction | ErrorKind::NotFound => 404,
            ErrorKind::UnknownField | ErrorKind::InvalidArgument => 400,
            ErrorKind::DuplicatePath => 409,
            ErrorKind::HandlerFailure | ErrorKind::Configuration | ErrorKind::Persistence => 500,
        }
    }
}
