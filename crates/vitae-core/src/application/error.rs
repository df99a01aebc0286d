//! Application layer errors.
//!
//! These errors represent failures of the ports the pipeline drives, not
//! domain rule violations. Domain errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving the build pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The data source could not produce a record.
    #[error("No CV data available: {reason}")]
    DataUnavailable { reason: String },

    /// The template identifier does not resolve to a template.
    #[error("Template not found: '{template}'")]
    TemplateNotFound {
        template: String,
        available: Vec<String>,
    },

    /// The template resolved but the engine failed to produce markup.
    #[error("Template '{template}' failed to render: {reason}")]
    TemplateRenderFailed { template: String, reason: String },

    /// The document renderer could not persist the output.
    #[error("Failed to render document at {path}: {reason}")]
    RenderFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DataUnavailable { reason } => vec![
                format!("Data loading failed: {}", reason),
                "Put your CV data in YAML files under ./data/content (or ./data)".into(),
                "Each file becomes a section named after the file, e.g. profile.yaml".into(),
            ],
            Self::TemplateNotFound { available, .. } => {
                let mut suggestions = Vec::new();
                if available.is_empty() {
                    suggestions.push("No templates were found in the templates directory".into());
                    suggestions.push(
                        "Expected layout: templates/<name>/<name>.hbs".into(),
                    );
                } else {
                    suggestions.push("Available templates:".into());
                    for name in available {
                        suggestions.push(format!("  • {}", name));
                    }
                    suggestions.push(format!("Example: cv --template {}", available[0]));
                }
                suggestions
            }
            Self::TemplateRenderFailed { template, .. } => vec![
                format!("Check the Handlebars syntax of template '{}'", template),
                "Partials referenced with {{> name}} must exist in the partials directory".into(),
            ],
            Self::RenderFailed { path, .. } => vec![
                format!("Could not write: {}", path.display()),
                "Check that a Chromium-based browser is installed (renderer.binary)".into(),
                "Check that the output directory exists and is writable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DataUnavailable { .. } => ErrorCategory::Unavailable,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateRenderFailed { .. } => ErrorCategory::Validation,
            Self::RenderFailed { .. } => ErrorCategory::Internal,
        }
    }
}
