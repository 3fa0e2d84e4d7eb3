//! Resource type registry.
//!
//! - [`ResourceTypeDescriptor`]: Static metadata for one type (path,
//!   session requirement, identifier key, fields, function names)
//! - [`RegisteredType`]: A descriptor together with its rules and handlers
//! - [`ResourceRegistry`]: The path-keyed catalog consulted by every request

mod descriptor;
#[allow(clippy::module_inception)]
mod registry;

pub use descriptor::{Cardinality, FieldKind, ResourceSchema, ResourceTypeDescriptor};
pub use registry::{RegisteredType, ResourceRegistry};
