//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build a CV".

pub mod build_service;

pub use build_service::{BuildReport, BuildService};
