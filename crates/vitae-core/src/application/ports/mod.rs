//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `vitae-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DataSource`: Record loading
//!   - `TemplateEngine`: Markup rendering
//!   - `DocumentRenderer`: Document output
//!   - `Clock`: Generation timestamp
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Clock, DataSource, DocumentRenderer, TemplateEngine};
