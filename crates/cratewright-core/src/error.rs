//! Error types for the Cratewright engine.
//!
//! The layout pipeline itself never fails: configuration problems resolve
//! to documented fallbacks and geometric degeneracies are skipped. The only
//! fatal condition is non-finite geometry reaching the exporter, which
//! indicates a solver defect rather than degenerate input.

use thiserror::Error;

/// Errors during STEP export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A part carried NaN or infinite coordinates. Rejected before any
    /// entity is emitted so a partial file is never produced.
    #[error("non-finite coordinates in part '{part}'")]
    NonFinite { part: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_the_part() {
        let err = ExportError::NonFinite { part: "SKID_PATTERN_2".to_string() };
        assert_eq!(
            err.to_string(),
            "non-finite coordinates in part 'SKID_PATTERN_2'"
        );
    }
}
