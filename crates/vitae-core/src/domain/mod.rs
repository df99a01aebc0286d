// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Vitae.
//!
//! This module contains pure logic with no I/O. Loading data, rendering
//! templates, and writing documents are handled via ports (traits) defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable values**: All domain objects are Clone + PartialEq
//
// Public API - what the world sees
pub mod error;
pub mod filename;
pub mod pipeline;
pub mod record;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use filename::{format_filename, format_timestamp, slugify};
pub use pipeline::{PipelineStage, PipelineState};
pub use record::{Mapping, Record, SUBJECT_NAME_PATH, Value};
pub use value_objects::{Markup, TemplateId};

pub use validation::DomainValidator;
