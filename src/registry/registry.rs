//! Path-keyed catalog of resource types.

use std::collections::HashMap;
use std::sync::Arc;

use super::ResourceTypeDescriptor;
use crate::dispatch::FunctionTable;
use crate::policy::{AccessPolicy, PermissionEvaluator};
use crate::{Error, Result};

/// Everything the core knows about one resource type.
///
/// Pairs the static [`ResourceTypeDescriptor`] with the type's rules and
/// function handlers. Constructing one checks that the descriptor is valid
/// and that its declared function names and the bound handlers match
/// exactly.
#[derive(Debug, Clone)]
pub struct RegisteredType {
    descriptor: Arc<ResourceTypeDescriptor>,
    evaluator: PermissionEvaluator,
    functions: FunctionTable,
}

impl RegisteredType {
    /// Bundles a descriptor with its policy and handlers.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`](crate::ErrorKind::Configuration)
    /// if the descriptor is invalid, a declared function has no handler, or
    /// a handler is bound to an undeclared name.
    pub fn new(
        descriptor: ResourceTypeDescriptor,
        policy: impl AccessPolicy + 'static,
        functions: FunctionTable,
    ) -> Result<Self> {
        Self::with_evaluator(descriptor, PermissionEvaluator::new(policy), functions)
    }

    /// Like [`new`](Self::new), with an already built evaluator.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_evaluator(
        descriptor: ResourceTypeDescriptor,
        evaluator: PermissionEvaluator,
        functions: FunctionTable,
    ) -> Result<Self> {
        descriptor.validate()?;

        if let Some(name) = descriptor.function_names().find(|name| !functions.contains(name)) {
            return Err(Error::configuration(format!(
                "{}: function '{}' is declared without a handler",
                descriptor.path(),
                name
            )));
        }
        if let Some(name) = functions.names().find(|name| !descriptor.declares_function(name)) {
            return Err(Error::configuration(format!(
                "{}: handler bound to undeclared function '{}'",
                descriptor.path(),
                name
            )));
        }

        Ok(Self { descriptor: Arc::new(descriptor), evaluator, functions })
    }

    /// Returns the type's descriptor.
    #[inline]
    pub fn descriptor(&self) -> &ResourceTypeDescriptor {
        &self.descriptor
    }

    /// Returns the type's permission evaluator.
    #[inline]
    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Returns the type's function handlers.
    #[inline]
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Returns the type's path.
    #[inline]
    pub fn path(&self) -> &str {
        self.descriptor.path()
    }
}

/// The catalog of all resource types, keyed by path.
///
/// Populated once at startup and then shared read-only (typically behind
/// an `Arc`) by every request. Paths are unique.
///
/// ## Example
///
/// ```rust
/// use resource_access::dispatch::FunctionTable;
/// use resource_access::policy::RulePolicy;
/// use resource_access::registry::{ResourceRegistry, ResourceTypeDescriptor};
/// use resource_access::ErrorKind;
///
/// let mut registry = ResourceRegistry::new();
/// registry
///     .register(ResourceTypeDescriptor::new("user", "id"), RulePolicy::allow_all(), FunctionTable::new())
///     .unwrap();
///
/// assert!(registry.resolve("user").is_ok());
/// assert_eq!(registry.resolve("group").unwrap_err().kind(), ErrorKind::UnknownResource);
///
/// let err = registry
///     .register(ResourceTypeDescriptor::new("user", "id"), RulePolicy::allow_all(), FunctionTable::new())
///     .unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DuplicatePath);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    types: HashMap<String, RegisteredType>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource type.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicatePath`](crate::ErrorKind::DuplicatePath) if the
    ///   path is already registered; the registry is left unchanged.
    /// - [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    ///   descriptor is invalid or its functions do not match the handlers.
    pub fn register(
        &mut self,
        descriptor: ResourceTypeDescriptor,
        policy: impl AccessPolicy + 'static,
        functions: FunctionTable,
    ) -> Result<()> {
        self.insert(RegisteredType::new(descriptor, policy, functions)?)
    }

    /// Registers an already assembled type.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicatePath`](crate::ErrorKind::DuplicatePath)
    /// if the path is already registered.
    pub fn insert(&mut self, resource_type: RegisteredType) -> Result<()> {
        if self.types.contains_key(resource_type.path()) {
            return Err(Error::duplicate_path(resource_type.path()));
        }
        tracing::debug!(
            path = resource_type.path(),
            session = resource_type.descriptor().requires_session(),
            fields = resource_type.descriptor().schema().len(),
            functions = resource_type.functions().len(),
            "registered resource type"
        );
        self.types.insert(resource_type.path().to_owned(), resource_type);
        Ok(())
    }

    /// Looks up a type by path.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownResource`](crate::ErrorKind::UnknownResource)
    /// if no type is registered under `path`.
    pub fn resolve(&self, path: &str) -> Result<&RegisteredType> {
        self.types.get(path).ok_or_else(|| Error::unknown_resource(path))
    }

    /// Returns `true` if a type is registered under `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.types.contains_key(path)
    }

    /// Returns the registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.types.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Iterates over the registered types in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredType> {
        self.types.values()
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
