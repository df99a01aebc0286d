//! Vitae Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Vitae
//! CV generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             vitae-cli (cv)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │             (BuildService)              │
//! │     load → render → emit, fail-fast     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (DataSource, TemplateEngine, Renderer)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     vitae-adapters (Infrastructure)     │
//! │  (YAML, Handlebars, headless Chromium)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Record, TemplateId, filename policy)  │
//! │             No I/O, no async            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitae_core::{application::BuildService, domain::TemplateId};
//!
//! // 1. Pick a template
//! let template = TemplateId::new("creative").unwrap();
//!
//! // 2. Use application service (with injected adapters)
//! let service = BuildService::new(source, engine, renderer, clock);
//! let report = service.build(&template).await.unwrap();
//! println!("{}", report.output_path.display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, BuildReport, BuildService,
        ports::{Clock, DataSource, DocumentRenderer, TemplateEngine},
    };
    pub use crate::domain::{
        DomainError, Mapping, Markup, PipelineStage, PipelineState, Record, TemplateId, Value,
        format_filename,
    };
    pub use crate::error::{VitaeError, VitaeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
