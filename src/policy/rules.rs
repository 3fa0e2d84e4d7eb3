//! Closure-backed policies.

use std::fmt;
use std::sync::Arc;

use super::AccessPolicy;
use crate::types::{Principal, ResourceInstance};

type CreateRule = Arc<dyn Fn(&Principal) -> bool + Send + Sync>;
type ResourceRule = Arc<dyn Fn(&Principal, &ResourceInstance) -> bool + Send + Sync>;
type FieldRule = Arc<dyn Fn(&Principal, &ResourceInstance, &str) -> bool + Send + Sync>;

/// An [`AccessPolicy`] assembled from closures.
///
/// Unset rules fall back to the trait defaults: resource-level rules deny,
/// field-level rules allow.
///
/// ## Example
///
/// ```rust
/// use resource_access::policy::{AccessPolicy, RulePolicy};
/// use resource_access::{Principal, ResourceInstance};
///
/// let policy = RulePolicy::new()
///     .create_when(|principal| principal.user.is_some())
///     .visible_when(|_, _| true)
///     .editable_when(|principal, post| {
///         principal.user_id().is_some_and(|user| post.relates_to("author", user))
///     });
///
/// let author = Principal::authenticated(7, 1);
/// let post = ResourceInstance::new("post", 1).with_relationship("author", [7]);
/// assert!(policy.is_editable(&author, &post));
/// assert!(!policy.is_editable(&Principal::authenticated(8, 1), &post));
/// ```
#[derive(Clone, Default)]
pub struct RulePolicy {
    create: Option<CreateRule>,
    visible: Option<ResourceRule>,
    editable: Option<ResourceRule>,
    attribute_visible: Option<FieldRule>,
    attribute_editable: Option<FieldRule>,
    relationship_visible: Option<FieldRule>,
    relationship_editable: Option<FieldRule>,
}

impl RulePolicy {
    /// Creates a policy with every rule unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that grants every resource-level check.
    pub fn allow_all() -> Self {
        Self::new().create_when(|_| true).visible_when(|_, _| true).editable_when(|_, _| true)
    }

    /// Sets the creation rule.
    #[must_use]
    pub fn create_when(mut self, rule: impl Fn(&Principal) -> bool + Send + Sync + 'static) -> Self {
        self.create = Some(Arc::new(rule));
        self
    }

    /// Sets the resource visibility rule.
    #[must_use]
    pub fn visible_when(
        mut self,
        rule: impl Fn(&Principal, &ResourceInstance) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.visible = Some(Arc::new(rule));
        self
    }

    /// Sets the resource editability rule.
    #[must_use]
    pub fn editable_when(
        mut self,
        rule: impl Fn(&Principal, &ResourceInstance) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.editable = Some(Arc::new(rule));
        self
    }

    /// Sets the attribute visibility rule.
    #[must_use]
    pub fn attribute_visible_when(
        mut self,
        rule: impl Fn(&Principal, &ResourceInstance, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.attribute_visible = Some(Arc::new(rule));
        self
    }

    /// Sets the attribute editability rule.
    #[must_use]
    pub fn attribute_editable_when(
        mut self,
        rule: impl Fn(&Principal, &ResourceInstance, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.attribute_editable = Some(Arc::new(rule));
        self
    }

    /// Sets the relationship visibility rule.
    #[must_use]
    pub fn relationship_visible_when(
        mut self,
        rule: impl Fn(&Principal, &ResourceInstance, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.relationship_visible = Some(Arc::new(rule));
        self
    }

    /// Sets the relationship editability rule.
    #[must_use]
    pub fn relationship_editable_when(
        mut self,
        rule: impl Fn(&Principal, &ResourceInstance, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.relationship_editable = Some(Arc::new(rule));
        self
    }
}

impl AccessPolicy for RulePolicy {
    fn can_create(&self, principal: &Principal) -> bool {
        self.create.as_ref().is_some_and(|rule| rule(principal))
    }

    fn is_visible(&self, principal: &Principal, instance: &ResourceInstance) -> bool {
        self.visible.as_ref().is_some_and(|rule| rule(principal, instance))
    }

    fn is_editable(&self, principal: &Principal, instance: &ResourceInstance) -> bool {
        self.editable.as_ref().is_some_and(|rule| rule(principal, instance))
    }

    fn attribute_is_visible(&self, principal: &Principal, instance: &ResourceInstance, attribute: &str) -> bool {
        self.attribute_visible.as_ref().is_none_or(|rule| rule(principal, instance, attribute))
    }

    fn attribute_is_editable(&self, principal: &Principal, instance: &ResourceInstance, attribute: &str) -> bool {
        self.attribute_editable.as_ref().is_none_or(|rule| rule(principal, instance, attribute))
    }

    fn relationship_is_visible(
        &self,
        principal: &Principal,
        instance: &ResourceInstance,
        relationship: &str,
    ) -> bool {
        self.relationship_visible.as_ref().is_none_or(|rule| rule(principal, instance, relationship))
    }

    fn relationship_is_editable(
        &self,
        principal: &Principal,
        instance: &ResourceInstance,
        relationship: &str,
    ) -> bool {
        self.relationship_editable.as_ref().is_none_or(|rule| rule(principal, instance, relationship))
    }
}

impl fmt::Debug for RulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulePolicy")
            .field("create", &self.create.is_some())
            .field("visible", &self.visible.is_some())
            .field("editable", &self.editable.is_some())
            .field("attribute_visible", &self.attribute_visible.is_some())
            .field("attribute_editable", &self.attribute_editable.is_some())
            .field("relationship_visible", &self.relationship_visible.is_some())
            .field("relationship_editable", &self.relationship_editable.is_some())
            .finish()
    }
}
