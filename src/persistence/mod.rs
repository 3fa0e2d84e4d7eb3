//! The storage collaborator.
//!
//! The core never touches storage directly. It decides whether a read or
//! write may proceed and then delegates to a [`Persistence`]
//! implementation supplied by the host. Errors returned here are passed
//! through to the caller unchanged (apart from the request id) and are
//! never retried.

use futures::future::BoxFuture;

use crate::Result;
use crate::registry::ResourceTypeDescriptor;
use crate::types::{Principal, ResourceId, ResourceInstance, WriteSet};

/// Storage backend for resource instances.
///
/// Methods return boxed futures so the trait stays object-safe and can be
/// shared as `Arc<dyn Persistence>` across concurrent requests.
///
/// Write sets handed to [`create`](Self::create) and
/// [`apply_write`](Self::apply_write) are already authorized and
/// normalized: every key is a declared field other than the identifier
/// key, and relationship values are always
/// [`FieldValue::Targets`](crate::FieldValue::Targets).
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use resource_access::persistence::Persistence;
/// use resource_access::testing::InMemoryStore;
///
/// let store: Arc<dyn Persistence> = Arc::new(InMemoryStore::new());
/// # let _ = store;
/// ```
pub trait Persistence: Send + Sync {
    /// Loads an instance snapshot, or `None` if it does not exist.
    fn fetch<'a>(
        &'a self,
        descriptor: &'a ResourceTypeDescriptor,
        id: ResourceId,
    ) -> BoxFuture<'a, Result<Option<ResourceInstance>>>;

    /// Constructs a new instance from an authorized write set.
    fn create<'a>(
        &'a self,
        descriptor: &'a ResourceTypeDescriptor,
        principal: &'a Principal,
        fields: &'a WriteSet,
    ) -> BoxFuture<'a, Result<ResourceInstance>>;

    /// Applies an authorized write set to an existing instance.
    ///
    /// Called at most once per update, and only after every field in the
    /// set passed its checks.
    fn apply_write<'a>(&'a self, instance: &'a ResourceInstance, fields: &'a WriteSet) -> BoxFuture<'a, Result<()>>;

    /// Returns the ordered target identifiers of a relationship.
    ///
    /// The default reads the targets from the instance snapshot.
    fn resolve_relationship_targets<'a>(
        &'a self,
        instance: &'a ResourceInstance,
        relationship: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ResourceId>>> {
        let targets = instance.relationship(relationship).map(<[ResourceId]>::to_vec).unwrap_or_default();
        Box::pin(async move { Ok(targets) })
    }

    /// Deletes an instance.
    fn delete<'a>(&'a self, instance: &'a ResourceInstance) -> BoxFuture<'a, Result<()>>;
}
