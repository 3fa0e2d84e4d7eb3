//! Composition of resource-level and field-level rules.

use std::fmt;
use std::sync::Arc;

use super::AccessPolicy;
use crate::registry::FieldKind;
use crate::types::{Access, AccessDecision, DecisionReason, DecisionTarget, Principal, ResourceInstance};

/// Decision engine for one resource type.
///
/// `PermissionEvaluator` wraps a type's [`AccessPolicy`] and enforces the
/// composition rule: a field is accessible only if the resource-level check
/// **and** the field-level check pass. The field-level rule is not even
/// consulted when the resource-level rule denies, so a policy can never
/// widen access past a resource-level deny.
///
/// The evaluator is immutable and cheap to clone; it is shared by every
/// concurrent request for its type.
///
/// ## Example
///
/// ```rust
/// use resource_access::policy::{PermissionEvaluator, RulePolicy};
/// use resource_access::{Principal, ResourceInstance};
///
/// let policy = RulePolicy::new()
///     .visible_when(|_, _| true)
///     .attribute_visible_when(|_, _, name| name != "likeCount");
/// let evaluator = PermissionEvaluator::new(policy);
///
/// let principal = Principal::user_only(1);
/// let post = ResourceInstance::new("post", 42);
/// assert!(evaluator.attribute_is_visible(&principal, &post, "text"));
/// assert!(!evaluator.attribute_is_visible(&principal, &post, "likeCount"));
/// ```
#[derive(Clone)]
pub struct PermissionEvaluator {
    policy: Arc<dyn AccessPolicy>,
}

impl PermissionEvaluator {
    /// Wraps a policy.
    pub fn new(policy: impl AccessPolicy + 'static) -> Self {
        Self { policy: Arc::new(policy) }
    }

    /// Wraps an already shared policy.
    pub fn from_arc(policy: Arc<dyn AccessPolicy>) -> Self {
        Self { policy }
    }

    /// Decides whether the principal may create a new instance.
    pub fn decide_create(&self, principal: &Principal) -> AccessDecision {
        let reason = if self.policy.can_create(principal) {
            DecisionReason::Granted
        } else {
            DecisionReason::ResourceDenied
        };
        AccessDecision::new(Access::Create, DecisionTarget::Resource, reason)
    }

    /// Decides a resource-level view or edit.
    ///
    /// `Access::Create` is answered by [`decide_create`](Self::decide_create)
    /// since it has no instance to inspect; passing it here yields a denial.
    pub fn decide_resource(
        &self,
        access: Access,
        principal: &Principal,
        instance: &ResourceInstance,
    ) -> AccessDecision {
        let granted = match access {
            Access::View => self.policy.is_visible(principal, instance),
            Access::Edit => self.policy.is_editable(principal, instance),
            Access::Create => false,
        };
        let reason = if granted { DecisionReason::Granted } else { DecisionReason::ResourceDenied };
        AccessDecision::new(access, DecisionTarget::Resource, reason)
    }

    /// Decides a field-level view or edit, resource-level check first.
    pub fn decide_field(
        &self,
        access: Access,
        principal: &Principal,
        instance: &ResourceInstance,
        kind: FieldKind,
        name: &str,
    ) -> AccessDecision {
        let target = match kind {
            FieldKind::Attribute => DecisionTarget::Attribute(name.to_owned()),
            FieldKind::Relationship(_) => DecisionTarget::Relationship(name.to_owned()),
        };

        if self.decide_resource(access, principal, instance).is_denied() {
            return AccessDecision::new(access, target, DecisionReason::ResourceDenied);
        }

        let granted = match (access, kind) {
            (Access::View, FieldKind::Attribute) => {
                self.policy.attribute_is_visible(principal, instance, name)
            },
            (Access::Edit, FieldKind::Attribute) => {
                self.policy.attribute_is_editable(principal, instance, name)
            },
            (Access::View, FieldKind::Relationship(_)) => {
                self.policy.relationship_is_visible(principal, instance, name)
            },
            (Access::Edit, FieldKind::Relationship(_)) => {
                self.policy.relationship_is_editable(principal, instance, name)
            },
            (Access::Create, _) => false,
        };
        let reason = if granted { DecisionReason::Granted } else { DecisionReason::FieldDenied };
        AccessDecision::new(access, target, reason)
    }

    /// Returns `true` if the principal may create an instance.
    pub fn can_create(&self, principal: &Principal) -> bool {
        self.decide_create(principal).is_allowed()
    }

    /// Returns `true` if the instance is visible to the principal.
    pub fn is_visible(&self, principal: &Principal, instance: &ResourceInstance) -> bool {
        self.decide_resource(Access::View, principal, instance).is_allowed()
    }

    /// Returns `true` if the principal may edit the instance.
    pub fn is_editable(&self, principal: &Principal, instance: &ResourceInstance) -> bool {
        self.decide_resource(Access::Edit, principal, instance).is_allowed()
    }

    /// Returns `true` if the attribute is visible, resource visibility included.
    pub fn attribute_is_visible(&self, principal: &Principal, instance: &ResourceInstance, name: &str) -> bool {
        self.decide_field(Access::View, principal, instance, FieldKind::Attribute, name).is_allowed()
    }

    /// Returns `true` if the attribute is editable, resource editability included.
    pub fn attribute_is_editable(&self, principal: &Principal, instance: &ResourceInstance, name: &str) -> bool {
        self.decide_field(Access::Edit, principal, instance, FieldKind::Attribute, name).is_allowed()
    }

    /// Returns `true` if the relationship is visible, resource visibility included.
    pub fn relationship_is_visible(
        &self,
        principal: &Principal,
        instance: &ResourceInstance,
        name: &str,
    ) -> bool {
        self.decide_field(Access::View, principal, instance, relationship_kind(), name).is_allowed()
    }

    /// Returns `true` if the relationship is editable, resource editability included.
    pub fn relationship_is_editable(
        &self,
        principal: &Principal,
        instance: &ResourceInstance,
        name: &str,
    ) -> bool {
        self.decide_field(Access::Edit, principal, instance, relationship_kind(), name).is_allowed()
    }
}

// Cardinality does not influence decisions.
fn relationship_kind() -> FieldKind {
    FieldKind::Relationship(crate::registry::Cardinality::ToMany)
}

impl fmt::Debug for PermissionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionEvaluator").finish_non_exhaustive()
    }
}
