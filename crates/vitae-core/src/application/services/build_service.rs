//! Build Service - main application orchestrator.
//!
//! This service coordinates the CV build workflow:
//! 1. Load the record from the data source
//! 2. Check the subject-name precondition and compute the output path
//! 3. Render the record with the selected template
//! 4. Hand the markup to the document renderer
//!
//! Every stage runs exactly once and is awaited before the next starts. The
//! first failure ends the run in `Failed { at }`; nothing is retried. The
//! returned error is a [`VitaeError::Pipeline`] carrying that state.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Clock, DataSource, DocumentRenderer, TemplateEngine},
    domain::{DomainValidator as validator, PipelineState, TemplateId, format_filename},
    error::{VitaeError, VitaeResult},
};

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_path: PathBuf,
    pub template: TemplateId,
    pub subject_name: String,
    pub generated_at: NaiveDateTime,
    pub markup_bytes: usize,
    pub state: PipelineState,
}

/// Main build service.
///
/// Owns one adapter per port; constructed fresh for each invocation.
pub struct BuildService {
    source: Box<dyn DataSource>,
    engine: Box<dyn TemplateEngine>,
    renderer: Box<dyn DocumentRenderer>,
    clock: Box<dyn Clock>,
    output_dir: PathBuf,
}

impl BuildService {
    /// Create a new build service with the given adapters.
    ///
    /// Documents are written to the current directory unless
    /// [`BuildService::with_output_dir`] says otherwise.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use vitae_core::application::BuildService;
    ///
    /// let service = BuildService::new(
    ///     source,   // impl DataSource
    ///     engine,   // impl TemplateEngine
    ///     renderer, // impl DocumentRenderer
    ///     clock,    // impl Clock
    /// )
    /// .with_output_dir("out");
    /// ```
    pub fn new(
        source: Box<dyn DataSource>,
        engine: Box<dyn TemplateEngine>,
        renderer: Box<dyn DocumentRenderer>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            source,
            engine,
            renderer,
            clock,
            output_dir: PathBuf::new(),
        }
    }

    /// Directory the generated document is placed in.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build one CV with the given template.
    #[instrument(skip_all, fields(template = %template))]
    pub async fn build(&self, template: &TemplateId) -> VitaeResult<BuildReport> {
        let mut state = PipelineState::initial();
        info!(state = %state, "Loading CV data");

        // 1. Load
        let record = self
            .source
            .load_data()
            .await
            .map_err(|e| fail(state, e))?;

        // 2. Precondition: fail before any rendering work
        let subject_name = validator::validate_subject(&record)
            .map_err(|e| fail(state, e.into()))?
            .into_owned();

        let generated_at = self.clock.now();
        let output_path = self.output_dir.join(format_filename(
            &subject_name,
            template.as_str(),
            generated_at,
        ));
        debug!(
            fields = record.len(),
            subject = %subject_name,
            output_path = %output_path.display(),
            "Record loaded"
        );
        state = advance(state);

        // 3. Render
        let markup = self
            .engine
            .render(template, &record)
            .await
            .map_err(|e| fail(state, e))?;
        debug!(bytes = markup.len(), "Markup rendered");
        state = advance(state);

        // 4. Emit
        self.renderer
            .generate(&markup, &output_path)
            .await
            .map_err(|e| fail(state, e))?;
        state = advance(state);

        info!(output_path = %output_path.display(), "CV generated");

        Ok(BuildReport {
            output_path,
            template: template.clone(),
            subject_name,
            generated_at,
            markup_bytes: markup.len(),
            state,
        })
    }
}

fn advance(state: PipelineState) -> PipelineState {
    let next = state.advance();
    debug!(from = %state, to = %next, "Pipeline transition");
    next
}

fn fail(state: PipelineState, err: VitaeError) -> VitaeError {
    let failed = state.fail();
    warn!(state = %failed, error = %err, "Build pipeline failed");
    VitaeError::Pipeline {
        state: failed,
        error: Box::new(err),
    }
}
