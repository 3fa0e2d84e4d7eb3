//! Logical request and response shapes exchanged with the transport layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AttributeValue, FieldValue, FunctionResult, Principal, ResourceId};

/// Field name to value mapping submitted for creation or update.
pub type WriteSet = BTreeMap<String, FieldValue>;

/// The operation a request performs on a resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Operation {
    /// Create a new instance with the given initial fields.
    Create {
        /// Initial field values.
        #[serde(default)]
        fields: WriteSet,
    },
    /// Read an instance.
    Read {
        /// Instance identifier.
        id: ResourceId,
        /// Field names to return. `None` means every field in the schema.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
    },
    /// Update an instance.
    Update {
        /// Instance identifier.
        id: ResourceId,
        /// Field values to write, all-or-nothing.
        fields: WriteSet,
    },
    /// Delete an instance.
    Delete {
        /// Instance identifier.
        id: ResourceId,
    },
    /// Invoke a named function on an instance.
    Invoke {
        /// Instance identifier.
        id: ResourceId,
        /// Declared function name.
        function: String,
        /// Opaque payload passed to the handler.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<serde_json::Value>,
    },
}

impl Operation {
    /// Returns the operation name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create { .. } => "create",
            Operation::Read { .. } => "read",
            Operation::Update { .. } => "update",
            Operation::Delete { .. } => "delete",
            Operation::Invoke { .. } => "invoke",
        }
    }

    /// Returns the targeted instance identifier, if the operation has one.
    pub fn instance_id(&self) -> Option<ResourceId> {
        match self {
            Operation::Create { .. } => None,
            Operation::Read { id, .. }
            | Operation::Update { id, .. }
            | Operation::Delete { id }
            | Operation::Invoke { id, .. } => Some(*id),
        }
    }
}

/// A request as handed over by the transport collaborator.
///
/// ```rust
/// use resource_access::{Operation, Principal, Request};
///
/// let request: Request = serde_json::from_str(
///     r#"{"path": "post", "principal": {"user": {"id": 7}}, "operation": {"op": "read", "id": 42}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(request.path, "post");
/// assert_eq!(request.principal, Principal::user_only(7));
/// assert_eq!(request.operation, Operation::Read { id: 42, fields: None });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Resource type path.
    pub path: String,
    /// The resolved principal.
    #[serde(default)]
    pub principal: Principal,
    /// What to do.
    pub operation: Operation,
}

impl Request {
    /// Creates a request.
    pub fn new(path: impl Into<String>, principal: Principal, operation: Operation) -> Self {
        Self { path: path.into(), principal, operation }
    }
}

/// The visible portion of an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadResponse {
    /// Instance identifier.
    pub id: ResourceId,
    /// Visible attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Visible relationships with their ordered targets.
    #[serde(default)]
    pub relationships: BTreeMap<String, Vec<ResourceId>>,
}

impl ReadResponse {
    /// Creates an empty response for the given identifier.
    pub fn new(id: ResourceId) -> Self {
        Self { id, ..Self::default() }
    }

    /// Returns `true` if the named attribute or relationship is present.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name) || self.relationships.contains_key(name)
    }

    /// Returns the number of fields in the response.
    pub fn len(&self) -> usize {
        self.attributes.len() + self.relationships.len()
    }

    /// Returns `true` if no field is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The successful outcome of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Response {
    /// A new instance was created.
    Created {
        /// Identifier of the new instance.
        id: ResourceId,
    },
    /// The visible fields of an instance.
    Read(ReadResponse),
    /// The write set was applied.
    Updated,
    /// The instance was deleted.
    Deleted,
    /// A function handler's result, unchanged.
    Function(FunctionResult),
}
