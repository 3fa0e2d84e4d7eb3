//! Instance references in "path:id" format.

use std::{borrow::Cow, fmt};

use super::ResourceId;

/// A reference to a resource instance in "path:id" format.
///
/// References are what the orchestrator logs and what rejection messages
/// name. They never carry attribute values, only the address the caller
/// already supplied.
///
/// ## Example
///
/// ```rust
/// use resource_access::InstanceRef;
///
/// let post = InstanceRef::parse("post:42").unwrap();
/// assert_eq!(post.path(), "post");
/// assert_eq!(post.id(), 42);
/// assert_eq!(post.field("text"), "post:42#text");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceRef<'a> {
    path: Cow<'a, str>,
    id: ResourceId,
}

/// Error parsing an instance reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Missing colon separator between path and ID.
    MissingColon,
    /// Empty resource path.
    EmptyPath,
    /// The identifier is not an integer.
    InvalidId(String),
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingColon => write!(f, "missing colon separator in instance reference"),
            ParseError::EmptyPath => write!(f, "empty resource path"),
            ParseError::InvalidId(s) => write!(f, "instance identifier is not an integer: {}", s),
        }
    }
}

impl<'a> InstanceRef<'a> {
    /// Parse an instance reference from "path:id" format.
    ///
    /// The path may itself contain colons; the identifier is everything after
    /// the last one.
    pub fn parse(s: &'a str) -> Result<Self, ParseError> {
        let (path, id) = s.rsplit_once(':').ok_or(ParseError::MissingColon)?;

        if path.is_empty() {
            return Err(ParseError::EmptyPath);
        }
        let id = id.parse::<ResourceId>().map_err(|_| ParseError::InvalidId(id.to_owned()))?;

        Ok(Self { path: Cow::Borrowed(path), id })
    }

    /// Create an instance reference from its components.
    pub fn new(path: impl Into<Cow<'a, str>>, id: ResourceId) -> Self {
        Self { path: path.into(), id }
    }

    /// Returns the resource path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the instance identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns a field reference in "path:id#field" format.
    pub fn field(&self, name: &str) -> String {
        format!("{}:{}#{}", self.path, self.id, name)
    }

    /// Convert to an owned version with `'static` lifetime.
    pub fn into_owned(self) -> InstanceRef<'static> {
        InstanceRef { path: Cow::Owned(self.path.into_owned()), id: self.id }
    }
}

impl fmt::Display for InstanceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.id)
    }
}
