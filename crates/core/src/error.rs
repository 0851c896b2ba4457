//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants). Storage concerns belong to the infra crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (e.g. mismatched list lengths, unparsable amount).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. duplicate inventory key).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Message without the variant prefix, suitable for user-facing notices.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) | DomainError::InvariantViolation(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_prefix() {
        let err = DomainError::validation("mismatched lengths");
        assert_eq!(err.to_string(), "validation failed: mismatched lengths");
        assert_eq!(err.message(), "mismatched lengths");
    }

    #[test]
    fn invariant_constructor_maps_to_variant() {
        match DomainError::invariant("duplicate key") {
            DomainError::InvariantViolation(msg) => assert_eq!(msg, "duplicate key"),
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
    }
}
