//! InMemoryStore for testing with real storage semantics.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures::future::BoxFuture;
use parking_lot::RwLock;

use crate::persistence::Persistence;
use crate::registry::ResourceTypeDescriptor;
use crate::types::{FieldValue, Principal, ResourceId, ResourceInstance, WriteSet};
use crate::{Error, Result};

/// An in-memory [`Persistence`] implementation that counts its calls.
///
/// Instances are keyed by `(path, id)`. New instances get the next free
/// identifier for their path. Every trait method increments a counter so
/// tests can assert, for example, that a rejected update reached the store
/// zero times.
///
/// ## Example
///
/// ```rust
/// use resource_access::testing::InMemoryStore;
/// use resource_access::ResourceInstance;
///
/// let store = InMemoryStore::new();
/// store.insert(ResourceInstance::new("post", 1).with_attribute("text", "hi"));
///
/// assert_eq!(store.len(), 1);
/// assert!(store.get("post", 1).is_some());
/// assert_eq!(store.apply_write_calls(), 0);
/// ```
///
/// ## Simulating Outages
///
/// [`set_unavailable`](Self::set_unavailable) makes every call fail with
/// [`ErrorKind::Persistence`](crate::ErrorKind::Persistence), which the
/// orchestrator must pass through unchanged.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    instances: RwLock<BTreeMap<(String, ResourceId), ResourceInstance>>,
    unavailable: AtomicBool,
    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
    apply_write_calls: AtomicUsize,
    resolve_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an instance, replacing any instance with the same path and id.
    pub fn insert(&self, instance: ResourceInstance) {
        let key = (instance.path().to_owned(), instance.id());
        self.instances.write().insert(key, instance);
    }

    /// Returns a copy of the stored instance.
    pub fn get(&self, path: &str, id: ResourceId) -> Option<ResourceInstance> {
        self.instances.read().get(&(path.to_owned(), id)).cloned()
    }

    /// Returns the number of stored instances.
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `fetch` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `apply_write` calls so far.
    pub fn apply_write_calls(&self) -> usize {
        self.apply_write_calls.load(Ordering::SeqCst)
    }

    /// Number of `resolve_relationship_targets` calls so far.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Number of `delete` calls so far.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::persistence("store unavailable"));
        }
        Ok(())
    }
}

fn next_id(instances: &BTreeMap<(String, ResourceId), ResourceInstance>, path: &str) -> Result<ResourceId> {
    match instances.keys().filter(|(stored, _)| stored == path).map(|(_, id)| *id).max() {
        None => Ok(1),
        Some(id) => {
            id.checked_add(1).ok_or_else(|| Error::persistence(format!("{} identifiers exhausted", path)))
        },
    }
}

fn apply_fields(instance: &mut ResourceInstance, fields: &WriteSet) {
    for (name, value) in fields {
        match value {
            FieldValue::Attribute(value) => {
                instance.attributes_mut().insert(name.clone(), value.clone());
            },
            FieldValue::Targets(targets) => {
                instance.relationships_mut().insert(name.clone(), targets.clone());
            },
        }
    }
}

impl Persistence for InMemoryStore {
    fn fetch<'a>(
        &'a self,
        descriptor: &'a ResourceTypeDescriptor,
        id: ResourceId,
    ) -> BoxFuture<'a, Result<Option<ResourceInstance>>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_available().map(|()| self.get(descriptor.path(), id));
        Box::pin(async move { result })
    }

    fn create<'a>(
        &'a self,
        descriptor: &'a ResourceTypeDescriptor,
        _principal: &'a Principal,
        fields: &'a WriteSet,
    ) -> BoxFuture<'a, Result<ResourceInstance>> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_available().and_then(|()| {
            let mut instances = self.instances.write();
            let id = next_id(&instances, descriptor.path())?;
            let mut instance = ResourceInstance::new(descriptor.path(), id);
            apply_fields(&mut instance, fields);
            instances.insert((descriptor.path().to_owned(), id), instance.clone());
            Ok(instance)
        });
        Box::pin(async move { result })
    }

    fn apply_write<'a>(&'a self, instance: &'a ResourceInstance, fields: &'a WriteSet) -> BoxFuture<'a, Result<()>> {
        self.apply_write_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_available().and_then(|()| {
            let mut instances = self.instances.write();
            let stored = instances
                .get_mut(&(instance.path().to_owned(), instance.id()))
                .ok_or_else(|| Error::persistence(format!("{} no longer exists", instance.reference())))?;
            apply_fields(stored, fields);
            Ok(())
        });
        Box::pin(async move { result })
    }

    fn resolve_relationship_targets<'a>(
        &'a self,
        instance: &'a ResourceInstance,
        relationship: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ResourceId>>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .check_available()
            .map(|()| instance.relationship(relationship).map(<[ResourceId]>::to_vec).unwrap_or_default());
        Box::pin(async move { result })
    }

    fn delete<'a>(&'a self, instance: &'a ResourceInstance) -> BoxFuture<'a, Result<()>> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_available().and_then(|()| {
            self.instances
                .write()
                .remove(&(instance.path().to_owned(), instance.id()))
                .map(|_| ())
                .ok_or_else(|| Error::persistence(format!("{} no longer exists", instance.reference())))
        });
        Box::pin(async move { result })
    }
}
