//! Template engine adapters.

mod hbs;

pub use hbs::HandlebarsEngine;
