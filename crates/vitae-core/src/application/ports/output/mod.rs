//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the build pipeline needs from external systems.
//! Each one has exactly one capability so tests can swap in deterministic
//! fakes. The `vitae-adapters` crate provides implementations.

use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::{Markup, Record, TemplateId};
use crate::error::VitaeResult;

/// Port for loading the CV record.
///
/// Implemented by:
/// - `vitae_adapters::YamlDataSource` (production)
/// - `vitae_adapters::InMemoryDataSource` (testing, embedding)
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Produce one record.
    ///
    /// Fails with `ApplicationError::DataUnavailable` when no data is found.
    async fn load_data(&self) -> VitaeResult<Record>;
}

/// Port for turning a record into markup.
///
/// Implemented by:
/// - `vitae_adapters::HandlebarsEngine`
#[async_trait]
pub trait TemplateEngine: Send + Sync {
    /// Render `record` with the template named by `template`.
    ///
    /// Fails with `ApplicationError::TemplateNotFound` when the id does not
    /// resolve. Implementations may derive presentation-only fields but must
    /// work on their own copy of the record.
    async fn render(&self, template: &TemplateId, record: &Record) -> VitaeResult<Markup>;
}

/// Port for persisting the final document.
///
/// Implemented by:
/// - `vitae_adapters::ChromiumRenderer` (PDF via headless browser)
/// - `vitae_adapters::InMemoryRenderer` (testing)
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Write a document for `markup` at `output_path`, replacing any existing
    /// file.
    ///
    /// Fails with `ApplicationError::RenderFailed`. On failure no partial file
    /// is left at `output_path`, and any process or handle acquired has been
    /// released before this returns.
    async fn generate(&self, markup: &Markup, output_path: &Path) -> VitaeResult<()>;
}

/// Port for the generation timestamp.
pub trait Clock: Send + Sync {
    /// Wall-clock time used in output filenames.
    fn now(&self) -> NaiveDateTime;
}
