// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through the pipeline report)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Precondition Errors
    // ========================================================================
    /// The loaded record has no usable subject name.
    #[error("Invalid data: '{field}' is required")]
    MissingSubjectName { field: &'static str },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid template identifier '{value}': {reason}")]
    InvalidTemplateId { value: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingSubjectName { field } => vec![
                format!("Add a non-empty '{}' entry to your data", field),
                "Example (data/content/profile.yaml):".into(),
                "  name: Ada Lovelace".into(),
            ],
            Self::InvalidTemplateId { value, .. } => vec![
                format!("'{}' cannot be used as a template name", value),
                "Template names are directory names, e.g. creative or ats".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingSubjectName { .. } => ErrorCategory::Precondition,
            Self::InvalidTemplateId { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Precondition,
    Validation,
}
