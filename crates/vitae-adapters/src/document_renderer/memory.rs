//! In-memory document renderer for testing.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use vitae_core::{
    application::{ApplicationError, ports::DocumentRenderer},
    domain::Markup,
    error::{VitaeError, VitaeResult},
};

/// Records every document it is asked to produce.
///
/// Clones share storage, so a test can keep one handle and give the other
/// to the service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRenderer {
    documents: Arc<Mutex<Vec<(PathBuf, Markup)>>>,
    failure: Option<String>,
}

impl InMemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer whose every call fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Documents generated so far, in call order.
    pub fn documents(&self) -> Vec<(PathBuf, Markup)> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentRenderer for InMemoryRenderer {
    async fn generate(&self, markup: &Markup, output_path: &Path) -> VitaeResult<()> {
        if let Some(reason) = &self.failure {
            return Err(ApplicationError::RenderFailed {
                path: output_path.to_path_buf(),
                reason: reason.clone(),
            }
            .into());
        }

        let mut docs = self.documents.lock().map_err(|e| VitaeError::Internal {
            message: format!("renderer lock poisoned: {}", e),
        })?;
        docs.push((output_path.to_path_buf(), markup.clone()));
        Ok(())
    }
}
