//! Permission evaluation.
//!
//! - [`AccessPolicy`]: The per-type rules, one implementation per entity type
//! - [`PermissionEvaluator`]: Composes those rules so field checks only narrow
//! - [`RulePolicy`]: An `AccessPolicy` built from closures
//!
//! ## Composition Rule
//!
//! | Resource-level | Field-level | Field accessible |
//! |----------------|-------------|------------------|
//! | allow          | allow       | yes              |
//! | allow          | deny        | no               |
//! | deny           | (not asked) | no               |

mod access_policy;
mod evaluator;
mod rules;

pub use access_policy::AccessPolicy;
pub use evaluator::PermissionEvaluator;
pub use rules::RulePolicy;
