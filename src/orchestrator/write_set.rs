//! Validation and normalization of incoming write sets.

use crate::registry::{Cardinality, FieldKind, ResourceTypeDescriptor};
use crate::types::{FieldValue, WriteSet};
use crate::{Error, Result};

/// One field of a write set, checked against the schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheckedField {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) value: FieldValue,
}

/// Checks every field of `fields` against the type's schema.
///
/// Relationship values come back as [`FieldValue::Targets`]. Error
/// messages name fields but never their values.
///
/// # Errors
///
/// - `UnknownField` for a name outside the schema
/// - `Forbidden` for the identifier key
/// - `InvalidArgument` for a value of the wrong shape, or more than one
///   target on a to-one relationship
pub(crate) fn check_write_set(descriptor: &ResourceTypeDescriptor, fields: WriteSet) -> Result<Vec<CheckedField>> {
    let path = descriptor.path();
    let schema = descriptor.schema();

    if let Some(name) = fields.keys().find(|name| schema.field_kind(name).is_none()) {
        return Err(Error::unknown_field(path, name));
    }
    if fields.contains_key(descriptor.identifier_key()) {
        return Err(Error::forbidden(format!(
            "identifier '{}' of {} cannot be written",
            descriptor.identifier_key(),
            path
        )));
    }

    let mut checked = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let Some(kind) = schema.field_kind(&name) else {
            return Err(Error::unknown_field(path, &name));
        };
        let value = match kind {
            FieldKind::Attribute => match value {
                FieldValue::Attribute(_) => value,
                FieldValue::Targets(_) => {
                    return Err(Error::invalid_argument(format!(
                        "{path}.{name} is an attribute and cannot take a list"
                    )));
                },
            },
            FieldKind::Relationship(cardinality) => {
                let targets = value.into_targets().ok_or_else(|| {
                    Error::invalid_argument(format!("{path}.{name} expects relationship target identifiers"))
                })?;
                if cardinality == Cardinality::ToOne && targets.len() > 1 {
                    return Err(Error::invalid_argument(format!(
                        "{path}.{name} is to-one and accepts at most one target"
                    )));
                }
                FieldValue::Targets(targets)
            },
        };
        checked.push(CheckedField { name, kind, value });
    }
    Ok(checked)
}

/// Reassembles checked fields into a write set for persistence.
pub(crate) fn into_write_set(fields: Vec<CheckedField>) -> WriteSet {
    fields.into_iter().map(|field| (field.name, field.value)).collect()
}
