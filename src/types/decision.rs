//! Decision types produced by the permission evaluator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The action an access decision was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Creating a new instance.
    Create,
    /// Reading an instance or one of its fields.
    View,
    /// Modifying (or deleting) an instance or one of its fields.
    Edit,
}

impl Access {
    /// Returns the lowercase verb used in logs and denial records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Create => "create",
            Access::View => "view",
            Access::Edit => "edit",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The granularity a decision applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum DecisionTarget {
    /// The whole resource.
    Resource,
    /// A single attribute.
    Attribute(String),
    /// A single relationship.
    Relationship(String),
}

impl DecisionTarget {
    /// Returns the field name for attribute and relationship targets.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            DecisionTarget::Resource => None,
            DecisionTarget::Attribute(name) | DecisionTarget::Relationship(name) => Some(name),
        }
    }
}

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Both the resource-level and (where applicable) field-level checks passed.
    Granted,
    /// The resource-level check failed. Field rules were not consulted.
    ResourceDenied,
    /// The resource-level check passed but the field rule narrowed access.
    FieldDenied,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::Granted => write!(f, "granted"),
            DecisionReason::ResourceDenied => write!(f, "resource-level check failed"),
            DecisionReason::FieldDenied => write!(f, "field-level check failed"),
        }
    }
}

/// The outcome of a single evaluator query.
///
/// Decisions are pure functions of `(principal, instance, field)` and are
/// recomputed on every request. Nothing caches them.
///
/// ```rust
/// use resource_access::{Access, AccessDecision, DecisionReason, DecisionTarget};
///
/// let decision = AccessDecision::new(
///     Access::View,
///     DecisionTarget::Attribute("likeCount".into()),
///     DecisionReason::FieldDenied,
/// );
/// assert!(!decision.is_allowed());
/// let allowed: bool = decision.into();
/// assert!(!allowed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    access: Access,
    target: DecisionTarget,
    reason: DecisionReason,
}

impl AccessDecision {
    /// Creates a decision.
    pub fn new(access: Access, target: DecisionTarget, reason: DecisionReason) -> Self {
        Self { access, target, reason }
    }

    /// Returns `true` if access is allowed.
    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.reason == DecisionReason::Granted
    }

    /// Returns `true` if access is denied.
    #[inline]
    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    /// Returns the action that was checked.
    #[inline]
    pub fn access(&self) -> Access {
        self.access
    }

    /// Returns the target that was checked.
    #[inline]
    pub fn target(&self) -> &DecisionTarget {
        &self.target
    }

    /// Returns the reason for the decision.
    #[inline]
    pub fn reason(&self) -> DecisionReason {
        self.reason
    }
}

impl From<AccessDecision> for bool {
    fn from(decision: AccessDecision) -> Self {
        decision.is_allowed()
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_allowed() { "allow" } else { "deny" };
        match self.target.field_name() {
            Some(name) => write!(f, "{} {} {} ({})", verdict, self.access, name, self.reason),
            None => write!(f, "{} {} resource ({})", verdict, self.access, self.reason),
        }
    }
}
