//! Snapshot of a stored resource instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AttributeValue, InstanceRef, ResourceId};

/// A request-local snapshot of a resource instance.
///
/// Instances are produced by the persistence collaborator. The core reads
/// them to decide what a principal may see or change, but never writes to
/// them: every mutation goes back through
/// [`Persistence`](crate::persistence::Persistence).
///
/// ## Example
///
/// ```rust
/// use resource_access::ResourceInstance;
///
/// let post = ResourceInstance::new("post", 42)
///     .with_attribute("text", "hello")
///     .with_attribute("likeCount", 3)
///     .with_relationship("author", vec![7]);
///
/// assert_eq!(post.attribute("likeCount").and_then(|v| v.as_i64()), Some(3));
/// assert_eq!(post.relationship("author"), Some(&[7][..]));
/// assert_eq!(post.reference().to_string(), "post:42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstance {
    path: String,
    id: ResourceId,
    #[serde(default)]
    attributes: BTreeMap<String, AttributeValue>,
    #[serde(default)]
    relationships: BTreeMap<String, Vec<ResourceId>>,
}

impl ResourceInstance {
    /// Creates an instance with no attributes or relationships.
    pub fn new(path: impl Into<String>, id: ResourceId) -> Self {
        Self { path: path.into(), id, attributes: BTreeMap::new(), relationships: BTreeMap::new() }
    }

    /// Sets an attribute value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets a relationship's targets.
    #[must_use]
    pub fn with_relationship(
        mut self,
        name: impl Into<String>,
        targets: impl IntoIterator<Item = ResourceId>,
    ) -> Self {
        self.relationships.insert(name.into(), targets.into_iter().collect());
        self
    }

    /// Returns the resource path of this instance's type.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the instance identifier.
    #[inline]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns a "path:id" reference to this instance.
    pub fn reference(&self) -> InstanceRef<'_> {
        InstanceRef::new(self.path.as_str(), self.id)
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Returns all attributes.
    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// Returns a relationship's targets as stored on the snapshot.
    pub fn relationship(&self, name: &str) -> Option<&[ResourceId]> {
        self.relationships.get(name).map(Vec::as_slice)
    }

    /// Returns all relationships.
    pub fn relationships(&self) -> &BTreeMap<String, Vec<ResourceId>> {
        &self.relationships
    }

    /// Returns `true` if `target` appears in the named relationship.
    pub fn relates_to(&self, name: &str, target: ResourceId) -> bool {
        self.relationship(name).is_some_and(|targets| targets.contains(&target))
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut BTreeMap<String, AttributeValue> {
        &mut self.attributes
    }

    pub(crate) fn relationships_mut(&mut self) -> &mut BTreeMap<String, Vec<ResourceId>> {
        &mut self.relationships
    }
}
