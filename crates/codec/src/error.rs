/// All errors that can be returned while decoding or encoding a catalog entity.
///
/// Every variant that concerns a field carries its dotted path from the
/// entity root, e.g. `item_variation_data.price_money.amount`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A discriminator value outside the fixed enumeration of its union.
    #[error("unknown {union} '{value}'")]
    UnknownVariant { union: &'static str, value: String },

    /// A required field was not supplied.
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: String },

    /// The discriminator of a nested union disagrees with the payload fields
    /// that were supplied alongside it.
    #[error("invalid {union} state for {variant}: field '{field}' {reason}")]
    InvalidUnionState {
        union: &'static str,
        variant: String,
        field: String,
        reason: &'static str,
    },

    /// A product-set quantity rule with neither an exact quantity nor a range.
    #[error("product set quantity rule under '{field}' needs an exact quantity or a min/max range")]
    MissingQuantityConstraint { field: String },

    /// An identifier still carries the temporary marker after a store round-trip.
    #[error("identifier '{id}' was not assigned by the store")]
    IdentifierNotAssigned { id: String },

    /// A field held a value of the wrong kind.
    #[error("field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A field held the right kind of value but its content is not acceptable.
    #[error("field '{field}' has invalid value '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Location visibility fields that contradict each other.
    #[error("conflicting location visibility at '{field}': {reason}")]
    ConflictingLocations { field: String, reason: String },

    /// An object of one type was handed to a representation of another,
    /// e.g. a DISCOUNT read back through the flat item form.
    #[error("expected a {expected} object, found {found}")]
    WrongObjectType {
        expected: &'static str,
        found: &'static str,
    },

    /// A codec asked for a field its shape descriptor does not declare, or
    /// declares with a different kind. Always a defect in this crate.
    #[error("shape descriptor mismatch at '{field}': {reason}")]
    Shape { field: String, reason: &'static str },
}

/// The fieldless taxonomy of [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownVariant,
    MissingRequiredField,
    InvalidUnionState,
    MissingQuantityConstraint,
    IdentifierNotAssigned,
    TypeMismatch,
    InvalidValue,
    ConflictingLocations,
    WrongObjectType,
    Shape,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::UnknownVariant { .. } => ErrorKind::UnknownVariant,
            CodecError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            CodecError::InvalidUnionState { .. } => ErrorKind::InvalidUnionState,
            CodecError::MissingQuantityConstraint { .. } => ErrorKind::MissingQuantityConstraint,
            CodecError::IdentifierNotAssigned { .. } => ErrorKind::IdentifierNotAssigned,
            CodecError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CodecError::InvalidValue { .. } => ErrorKind::InvalidValue,
            CodecError::ConflictingLocations { .. } => ErrorKind::ConflictingLocations,
            CodecError::WrongObjectType { .. } => ErrorKind::WrongObjectType,
            CodecError::Shape { .. } => ErrorKind::Shape,
        }
    }

    /// The dotted field path the error concerns, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::MissingRequiredField { field }
            | CodecError::InvalidUnionState { field, .. }
            | CodecError::MissingQuantityConstraint { field }
            | CodecError::TypeMismatch { field, .. }
            | CodecError::InvalidValue { field, .. }
            | CodecError::ConflictingLocations { field, .. }
            | CodecError::Shape { field, .. } => Some(field),
            CodecError::UnknownVariant { .. }
            | CodecError::IdentifierNotAssigned { .. }
            | CodecError::WrongObjectType { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_field() {
        let err = CodecError::MissingRequiredField {
            field: "discount_data.percentage".into(),
        };
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.field(), Some("discount_data.percentage"));
        assert_eq!(
            err.to_string(),
            "missing required field 'discount_data.percentage'"
        );
    }

    #[test]
    fn test_unknown_variant_display() {
        let err = CodecError::UnknownVariant {
            union: "object type",
            value: "WIDGET".into(),
        };
        assert_eq!(err.to_string(), "unknown object type 'WIDGET'");
        assert_eq!(err.field(), None);
    }
}
