//! The per-type authorization trait.

use crate::types::{Principal, ResourceInstance};

/// Authorization rules for one resource type.
///
/// Each registered type supplies its own implementation. The methods answer
/// plain yes/no questions; composing them into the final verdict is the job
/// of [`PermissionEvaluator`](super::PermissionEvaluator), which guarantees
/// that field-level answers can only narrow resource-level ones.
///
/// ## Defaults
///
/// | Method                      | Default |
/// |-----------------------------|---------|
/// | `can_create`                | deny    |
/// | `is_visible`                | deny    |
/// | `is_editable`               | deny    |
/// | `attribute_is_visible`      | allow   |
/// | `attribute_is_editable`     | allow   |
/// | `relationship_is_visible`   | allow   |
/// | `relationship_is_editable`  | allow   |
///
/// Field-level defaults allow because they are always combined with the
/// resource-level answer.
///
/// ## Example
///
/// ```rust
/// use resource_access::policy::AccessPolicy;
/// use resource_access::{Principal, ResourceInstance};
///
/// struct PostPolicy;
///
/// impl AccessPolicy for PostPolicy {
///     fn can_create(&self, principal: &Principal) -> bool {
///         principal.user.is_some()
///     }
///
///     fn is_visible(&self, _principal: &Principal, _instance: &ResourceInstance) -> bool {
///         true
///     }
///
///     fn is_editable(&self, principal: &Principal, instance: &ResourceInstance) -> bool {
///         principal.user_id().is_some_and(|user| instance.relates_to("author", user))
///     }
///
///     fn attribute_is_editable(
///         &self,
///         _principal: &Principal,
///         _instance: &ResourceInstance,
///         attribute: &str,
///     ) -> bool {
///         attribute != "likeCount"
///     }
/// }
/// ```
pub trait AccessPolicy: Send + Sync {
    /// Whether the principal may create a new instance of this type.
    fn can_create(&self, _principal: &Principal) -> bool {
        false
    }

    /// Whether the instance is visible to the principal at all.
    fn is_visible(&self, _principal: &Principal, _instance: &ResourceInstance) -> bool {
        false
    }

    /// Whether the principal may modify or delete the instance.
    fn is_editable(&self, _principal: &Principal, _instance: &ResourceInstance) -> bool {
        false
    }

    /// Whether a single attribute is visible. Only consulted when the
    /// instance itself is visible.
    fn attribute_is_visible(
        &self,
        _principal: &Principal,
        _instance: &ResourceInstance,
        _attribute: &str,
    ) -> bool {
        true
    }

    /// Whether a single attribute is editable. Only consulted when the
    /// instance itself is editable.
    fn attribute_is_editable(
        &self,
        _principal: &Principal,
        _instance: &ResourceInstance,
        _attribute: &str,
    ) -> bool {
        true
    }

    /// Whether a single relationship is visible. Only consulted when the
    /// instance itself is visible.
    fn relationship_is_visible(
        &self,
        _principal: &Principal,
        _instance: &ResourceInstance,
        _relationship: &str,
    ) -> bool {
        true
    }

    /// Whether a single relationship is editable. Only consulted when the
    /// instance itself is editable.
    fn relationship_is_editable(
        &self,
        _principal: &Principal,
        _instance: &ResourceInstance,
        _relationship: &str,
    ) -> bool {
        true
    }
}
