//! Unified error handling for Vitae Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, PipelineState};

/// Root error type for Vitae Core operations.
///
/// This enum wraps all possible errors that can occur when using vitae-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum VitaeError {
    /// Errors from the domain layer (precondition and validation failures).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (port failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A build stage failed. `state` is always `Failed { at }`; `error` is
    /// what the port or precondition reported and is shown unchanged.
    #[error("{error}")]
    Pipeline {
        state: PipelineState,
        error: Box<VitaeError>,
    },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl VitaeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Pipeline { error, .. } => error.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Vitae".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Precondition => ErrorCategory::Precondition,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
            },
            Self::Application(e) => e.category(),
            Self::Pipeline { error, .. } => error.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Terminal pipeline state, when the error ended a build.
    pub fn failed_state(&self) -> Option<PipelineState> {
        match self {
            Self::Pipeline { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// The underlying error, without the pipeline wrapper.
    pub fn root(&self) -> &VitaeError {
        match self {
            Self::Pipeline { error, .. } => error.root(),
            other => other,
        }
    }

    /// Owned form of [`VitaeError::root`].
    pub fn into_root(self) -> VitaeError {
        match self {
            Self::Pipeline { error, .. } => error.into_root(),
            other => other,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Precondition,
    Validation,
    NotFound,
    Unavailable,
    Internal,
}

/// Convenient result type alias.
pub type VitaeResult<T> = Result<T, VitaeError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> VitaeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> VitaeResult<T> {
        self.map_err(|e| VitaeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
