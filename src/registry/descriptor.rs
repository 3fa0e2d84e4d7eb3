//! Resource type descriptors and their field schemas.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How many targets a relationship holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// At most one target.
    ToOne,
    /// Any number of ordered targets.
    ToMany,
}

/// What a schema field name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A scalar attribute.
    Attribute,
    /// A relationship to other instances.
    Relationship(Cardinality),
}

/// The fixed set of attribute and relationship names of a resource type.
///
/// Field names arrive in requests as free-form strings. The orchestrator
/// resolves each one here before asking any evaluator about it, so an
/// undeclared name becomes [`ErrorKind::UnknownField`](crate::ErrorKind::UnknownField).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    #[serde(default)]
    attributes: BTreeSet<String>,
    #[serde(default)]
    relationships: BTreeMap<String, Cardinality>,
}

impl ResourceSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a field name.
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        if self.attributes.contains(name) {
            return Some(FieldKind::Attribute);
        }
        self.relationships.get(name).map(|cardinality| FieldKind::Relationship(*cardinality))
    }

    /// Returns `true` if `name` is a declared attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Returns `true` if `name` is a declared relationship.
    pub fn has_relationship(&self, name: &str) -> bool {
        self.relationships.contains_key(name)
    }

    /// Iterates over attribute names in sorted order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    /// Iterates over relationship names and cardinalities in sorted order.
    pub fn relationships(&self) -> impl Iterator<Item = (&str, Cardinality)> {
        self.relationships.iter().map(|(name, cardinality)| (name.as_str(), *cardinality))
    }

    /// Returns the total number of declared fields.
    pub fn len(&self) -> usize {
        self.attributes.len() + self.relationships.len()
    }

    /// Returns `true` if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable description of a resource type.
///
/// A descriptor says how the type is addressed (`path`), whether every
/// operation on it needs a session, which integer attribute identifies its
/// instances, which fields it has and which functions it exposes.
///
/// Descriptors are (de)serializable so hosts can load them from
/// configuration; validation happens when the type is registered.
///
/// ## Example
///
/// ```rust
/// use resource_access::registry::{Cardinality, FieldKind, ResourceTypeDescriptor};
///
/// let post = ResourceTypeDescriptor::new("post", "id")
///     .with_session_required(true)
///     .with_attributes(["text", "likeCount"])
///     .with_to_one("author")
///     .with_function("like");
///
/// assert!(post.requires_session());
/// assert_eq!(post.schema().field_kind("text"), Some(FieldKind::Attribute));
/// assert_eq!(
///     post.schema().field_kind("author"),
///     Some(FieldKind::Relationship(Cardinality::ToOne))
/// );
/// assert!(post.declares_function("like"));
/// assert!(post.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeDescriptor {
    path: String,
    #[serde(default)]
    requires_session: bool,
    #[serde(default = "default_identifier_key")]
    identifier_key: String,
    #[serde(default)]
    functions: BTreeSet<String>,
    #[serde(flatten)]
    schema: ResourceSchema,
}

fn default_identifier_key() -> String {
    "id".to_owned()
}

impl ResourceTypeDescriptor {
    /// Creates a descriptor; the identifier key is declared as an attribute.
    pub fn new(path: impl Into<String>, identifier_key: impl Into<String>) -> Self {
        let identifier_key = identifier_key.into();
        let mut schema = ResourceSchema::new();
        schema.attributes.insert(identifier_key.clone());
        Self {
            path: path.into(),
            requires_session: false,
            identifier_key,
            functions: BTreeSet::new(),
            schema,
        }
    }

    /// Sets whether every operation requires an authenticated session.
    #[must_use]
    pub fn with_session_required(mut self, required: bool) -> Self {
        self.requires_session = required;
        self
    }

    /// Declares an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.schema.attributes.insert(name.into());
        self
    }

    /// Declares several attributes.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.attributes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declares a relationship with the given cardinality.
    #[must_use]
    pub fn with_relationship(mut self, name: impl Into<String>, cardinality: Cardinality) -> Self {
        self.schema.relationships.insert(name.into(), cardinality);
        self
    }

    /// Declares a to-one relationship.
    #[must_use]
    pub fn with_to_one(self, name: impl Into<String>) -> Self {
        self.with_relationship(name, Cardinality::ToOne)
    }

    /// Declares a to-many relationship.
    #[must_use]
    pub fn with_to_many(self, name: impl Into<String>) -> Self {
        self.with_relationship(name, Cardinality::ToMany)
    }

    /// Declares a dispatchable function name.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.functions.insert(name.into());
        self
    }

    /// Returns the path identifying this type in requests.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` if every operation requires an authenticated session.
    #[inline]
    pub fn requires_session(&self) -> bool {
        self.requires_session
    }

    /// Returns the name of the integer attribute identifying instances.
    #[inline]
    pub fn identifier_key(&self) -> &str {
        &self.identifier_key
    }

    /// Returns the field schema.
    #[inline]
    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// Iterates over declared function names in sorted order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(String::as_str)
    }

    /// Returns `true` if `name` is a declared function.
    #[inline]
    pub fn declares_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    /// Checks the descriptor's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if
    /// the path is empty or contains whitespace or `/`, if the identifier key
    /// is not a declared attribute, if a name is declared both as attribute
    /// and relationship, or if a function name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::configuration("resource path cannot be empty"));
        }
        if self.path.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(Error::configuration(format!(
                "resource path '{}' contains whitespace or '/'",
                self.path
            )));
        }
        if !self.schema.has_attribute(&self.identifier_key) {
            return Err(Error::configuration(format!(
                "{}: identifier key '{}' is not a declared attribute",
                self.path, self.identifier_key
            )));
        }
        if let Some(name) = self.schema.relationships.keys().find(|name| self.schema.has_attribute(name)) {
            return Err(Error::configuration(format!(
                "{}: '{}' is declared both as attribute and relationship",
                self.path, name
            )));
        }
        if self.functions.iter().any(String::is_empty) {
            return Err(Error::configuration(format!("{}: function names cannot be empty", self.path)));
        }
        Ok(())
    }
}
