//! In-memory data source for tests and embedding.

use async_trait::async_trait;

use vitae_core::{
    application::{ApplicationError, ports::DataSource},
    domain::Record,
    error::VitaeResult,
};

/// Serves a fixed record, or fails as if no data exists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    record: Option<Record>,
}

impl InMemoryDataSource {
    pub fn new(record: Record) -> Self {
        Self {
            record: Some(record),
        }
    }

    /// A source with nothing to load.
    pub fn empty() -> Self {
        Self { record: None }
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn load_data(&self) -> VitaeResult<Record> {
        self.record.clone().ok_or_else(|| {
            ApplicationError::DataUnavailable {
                reason: "in-memory source holds no record".into(),
            }
            .into()
        })
    }
}
