//! Infrastructure adapters for Vitae.
//!
//! This crate implements the ports defined in `vitae-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod clock;
pub mod data_source;
pub mod document_renderer;
pub mod template_engine;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use data_source::{InMemoryDataSource, YamlDataSource, YamlSourceOptions};
pub use document_renderer::{ChromiumRenderer, InMemoryRenderer, PrintSetup, Stamp};
pub use template_engine::HandlebarsEngine;
