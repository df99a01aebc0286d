//! Data source adapters.

mod memory;
mod yaml;

pub use memory::InMemoryDataSource;
pub use yaml::{YamlDataSource, YamlSourceOptions};
