//! Fixed-answer policies.

use crate::policy::AccessPolicy;
use crate::types::{Principal, ResourceInstance};

/// A policy that allows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn can_create(&self, _: &Principal) -> bool {
        true
    }

    fn is_visible(&self, _: &Principal, _: &ResourceInstance) -> bool {
        true
    }

    fn is_editable(&self, _: &Principal, _: &ResourceInstance) -> bool {
        true
    }
}

/// A policy that denies everything, field-level checks included.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl AccessPolicy for DenyAll {
    fn attribute_is_visible(&self, _: &Principal, _: &ResourceInstance, _: &str) -> bool {
        false
    }

    fn attribute_is_editable(&self, _: &Principal, _: &ResourceInstance, _: &str) -> bool {
        false
    }

    fn relationship_is_visible(&self, _: &Principal, _: &ResourceInstance, _: &str) -> bool {
        false
    }

    fn relationship_is_editable(&self, _: &Principal, _: &ResourceInstance, _: &str) -> bool {
        false
    }
}
