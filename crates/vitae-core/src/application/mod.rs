//! Application layer for Vitae.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (BuildService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the ports but contains no presentation
//! or data logic itself.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{BuildReport, BuildService};

// Re-export port traits (for adapter implementation)
pub use ports::{Clock, DataSource, DocumentRenderer, TemplateEngine};

pub use error::ApplicationError;
