//! Traits for host types that map onto resource instances.
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_access::registry::ResourceTypeDescriptor;
//! use resource_access::types::Resource;
//! use resource_access::{ResourceId, ResourceInstance};
//!
//! struct Post {
//!     id: ResourceId,
//!     text: String,
//!     author: Option<ResourceId>,
//! }
//!
//! impl Resource for Post {
//!     fn descriptor() -> ResourceTypeDescriptor {
//!         ResourceTypeDescriptor::new("post", "id").with_attribute("text").with_to_one("author")
//!     }
//!
//!     fn resource_id(&self) -> ResourceId {
//!         self.id
//!     }
//!
//!     fn to_instance(&self) -> ResourceInstance {
//!         ResourceInstance::new("post", self.id)
//!             .with_attribute("text", self.text.clone())
//!             .with_relationship("author", self.author)
//!     }
//! }
//!
//! let post = Post { id: 1, text: "hi".into(), author: Some(7) };
//! assert_eq!(post.reference().to_string(), "post:1");
//! assert!(post.to_instance().relates_to("author", 7));
//! ```
//!
//! ## Derive Macro
//!
//! With the `derive` feature enabled, `#[derive(Resource)]` generates the
//! implementation from the struct's fields:
//!
//! ```rust,ignore
//! use resource_access::Resource;
//!
//! #[derive(Resource)]
//! #[resource(path = "post", session, functions("like"))]
//! struct Post {
//!     #[resource(id)]
//!     id: i64,
//!     text: String,
//!     #[resource(rename = "likeCount")]
//!     like_count: i64,
//!     #[resource(relationship)]
//!     author: Option<i64>,
//!     #[resource(to_many, rename = "likedBy")]
//!     liked_by: Vec<i64>,
//! }
//! ```

use std::collections::BTreeSet;

use super::{InstanceRef, ResourceId, ResourceInstance};
use crate::registry::ResourceTypeDescriptor;

/// A host type that is exposed as a resource.
///
/// Ties a Rust type to its [`ResourceTypeDescriptor`] and converts values
/// into the [`ResourceInstance`] snapshots the evaluator inspects.
pub trait Resource {
    /// Returns the descriptor of this resource type.
    fn descriptor() -> ResourceTypeDescriptor;

    /// Returns this value's identifier.
    fn resource_id(&self) -> ResourceId;

    /// Snapshots this value as an instance.
    fn to_instance(&self) -> ResourceInstance;

    /// Returns the `path:id` reference for this value.
    fn reference(&self) -> InstanceRef<'static> {
        InstanceRef::new(Self::descriptor().path().to_owned(), self.resource_id())
    }
}

/// Field types that hold relationship targets.
///
/// Used by `#[derive(Resource)]` to turn `Option<ResourceId>`,
/// `Vec<ResourceId>` and similar fields into ordered target lists.
pub trait RelationshipTargets {
    /// Returns the targets in order.
    fn targets(&self) -> Vec<ResourceId>;
}

impl RelationshipTargets for ResourceId {
    fn targets(&self) -> Vec<ResourceId> {
        vec![*self]
    }
}

impl RelationshipTargets for Option<ResourceId> {
    fn targets(&self) -> Vec<ResourceId> {
        self.iter().copied().collect()
    }
}

impl RelationshipTargets for Vec<ResourceId> {
    fn targets(&self) -> Vec<ResourceId> {
        self.clone()
    }
}

impl RelationshipTargets for BTreeSet<ResourceId> {
    fn targets(&self) -> Vec<ResourceId> {
        self.iter().copied().collect()
    }
}
