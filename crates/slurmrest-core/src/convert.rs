//! The converter contract shared by every version crate.

use thiserror::Error;

/// Bidirectional mapping between one wire type and one domain type.
///
/// Implementations are stateless unit structs: no fields, nothing mutable,
/// so a single `const` instance per entity can be shared freely.
pub trait Converter {
    type Wire;
    type Domain;

    /// Never fails on absent optional fields; only a record without an
    /// identity is rejected.
    fn to_common(&self, wire: &Self::Wire) -> Result<Self::Domain, ConversionError>;

    /// Emits only fields that carry a value.
    fn to_wire(&self, domain: &Self::Domain) -> Self::Wire;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{entity} record has no {field}")]
    MissingIdentity {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity} field {field} has invalid value '{value}'")]
    InvalidValue {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
}

/// Reject an empty identity string.
pub fn require_name(
    entity: &'static str,
    field: &'static str,
    value: Option<&String>,
) -> Result<String, ConversionError> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or(ConversionError::MissingIdentity { entity, field })
}
