//! Error types for CivicConnect.

use thiserror::Error;

/// Failures surfaced by the dispatch engine.
///
/// Every failure is recovered at the operation boundary and returned as a
/// structured result; no operation leaves a partially mutated record behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CivicError {
    /// The complaint's current status does not permit the requested action.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Role or ownership check failed for the resolved actor.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced complaint, quote, or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The vendor already has an open quote on this complaint.
    #[error("duplicate quote: {0}")]
    DuplicateQuote(String),

    /// Malformed input (empty fields, non-positive price, bad role).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl CivicError {
    /// Stable machine-checkable kind, carried on the wire alongside the
    /// human-readable message.
    pub fn kind(&self) -> &'static str {
        match self {
            CivicError::InvalidTransition(_) => "invalid_transition",
            CivicError::Forbidden(_) => "forbidden",
            CivicError::NotFound(_) => "not_found",
            CivicError::DuplicateQuote(_) => "duplicate_quote",
            CivicError::Validation(_) => "validation",
        }
    }
}

pub type CivicResult<T> = Result<T, CivicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        assert_eq!(
            CivicError::InvalidTransition("x".into()).kind(),
            "invalid_transition"
        );
        assert_eq!(CivicError::Forbidden("x".into()).kind(), "forbidden");
        assert_eq!(CivicError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(
            CivicError::DuplicateQuote("x".into()).kind(),
            "duplicate_quote"
        );
        assert_eq!(CivicError::Validation("x".into()).kind(), "validation");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = CivicError::NotFound("complaint CMP-1".into());
        assert_eq!(err.to_string(), "not found: complaint CMP-1");
    }
}
