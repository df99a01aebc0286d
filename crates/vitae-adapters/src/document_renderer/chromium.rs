//! PDF output through a headless Chromium-family browser.

use std::{
    fs,
    io::{self, ErrorKind, Read, Write},
    path::{Path, PathBuf},
    process::Stdio,
    sync::Arc,
    time::Instant,
};

use async_trait::async_trait;
use qrcode::types::QrError;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use vitae_core::{
    application::{
        ApplicationError,
        ports::{Clock, DocumentRenderer},
    },
    domain::Markup,
    error::VitaeResult,
};

use super::print::{PrintSetup, Stamp};
use crate::clock::SystemClock;

pub const DEFAULT_BINARY: &str = "chromium";
const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
enum ChromiumError {
    #[error("failed to prepare temporary files: {0}")]
    Io(io::Error),
    #[error("browser '{binary}' is unavailable: {source}")]
    NotFound { binary: String, source: io::Error },
    #[error("browser exited with code {exit_code:?}: {stderr}")]
    Browser {
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("browser did not produce a PDF")]
    InvalidOutput,
    #[error("failed to write the document: {0}")]
    Persist(io::Error),
    #[error("failed to encode the document stamp: {0}")]
    Stamp(QrError),
}

/// Prints markup to PDF with `<binary> --headless --print-to-pdf`.
///
/// The stamp is dated by `clock`; share the build's clock so the stamp and
/// the filename agree.
#[derive(Clone)]
pub struct ChromiumRenderer {
    binary: PathBuf,
    stamp: bool,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ChromiumRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromiumRenderer")
            .field("binary", &self.binary)
            .field("stamp", &self.stamp)
            .finish_non_exhaustive()
    }
}

impl Default for ChromiumRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl ChromiumRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            stamp: true,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Date the stamp with `clock` instead of the wall clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Toggle the QR provenance stamp in the page margins.
    pub fn with_stamp(mut self, stamp: bool) -> Self {
        self.stamp = stamp;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn print_setup(&self) -> Result<PrintSetup, ChromiumError> {
        if !self.stamp {
            return Ok(PrintSetup::default());
        }
        let stamp = Stamp::generate(self.clock.now()).map_err(ChromiumError::Stamp)?;
        debug!(stamp = stamp.id(), "Document stamp generated");
        Ok(PrintSetup::new(Some(stamp)))
    }

    async fn print(&self, markup: &Markup, output_path: &Path) -> Result<(), ChromiumError> {
        let started_at = Instant::now();
        let html = self.print_setup()?.apply(markup.as_str());
        let dest_dir = destination_dir(output_path);

        let (html_file, pdf_file) =
            tokio::task::spawn_blocking(move || prepare_files(&html, &dest_dir))
                .await
                .map_err(|e| ChromiumError::Io(io::Error::other(e)))??;

        let mut print_arg = std::ffi::OsString::from("--print-to-pdf=");
        print_arg.push(pdf_file.path());

        let output = Command::new(&self.binary)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-pdf-header-footer")
            .arg(print_arg)
            .arg(html_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ChromiumError::NotFound {
                        binary: self.binary.display().to_string(),
                        source: e,
                    }
                } else {
                    ChromiumError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ChromiumError::Browser {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        debug!(
            browser_elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Browser finished"
        );

        let output_path = output_path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            // Dropping the handle removes the HTML file.
            drop(html_file);
            finish(pdf_file, &output_path)
        })
        .await
        .map_err(|e| ChromiumError::Io(io::Error::other(e)))?
    }
}

#[async_trait]
impl DocumentRenderer for ChromiumRenderer {
    #[instrument(skip_all, fields(output_path = %output_path.display(), binary = %self.binary.display()))]
    async fn generate(&self, markup: &Markup, output_path: &Path) -> VitaeResult<()> {
        let started_at = Instant::now();
        match self.print(markup, output_path).await {
            Ok(()) => {
                info!(
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "PDF written"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "PDF rendering failed");
                Err(ApplicationError::RenderFailed {
                    path: output_path.to_path_buf(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }
}

fn destination_dir(output_path: &Path) -> PathBuf {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// HTML input in the system temp dir; PDF output next to the destination so
/// the final rename stays on one filesystem.
fn prepare_files(
    html: &str,
    dest_dir: &Path,
) -> Result<(NamedTempFile, NamedTempFile), ChromiumError> {
    let mut html_file = tempfile::Builder::new()
        .prefix("vitae-")
        .suffix(".html")
        .tempfile()
        .map_err(ChromiumError::Io)?;
    html_file
        .write_all(html.as_bytes())
        .map_err(ChromiumError::Io)?;
    html_file.flush().map_err(ChromiumError::Io)?;

    let pdf_file = tempfile::Builder::new()
        .prefix(".vitae-")
        .suffix(".pdf.part")
        .tempfile_in(dest_dir)
        .map_err(ChromiumError::Persist)?;

    Ok((html_file, pdf_file))
}

fn finish(pdf_file: NamedTempFile, output_path: &Path) -> Result<(), ChromiumError> {
    let mut magic = [0u8; 4];
    let read = fs::File::open(pdf_file.path())
        .and_then(|mut f| f.read(&mut magic))
        .map_err(ChromiumError::Io)?;
    if read < PDF_MAGIC.len() || magic != PDF_MAGIC {
        return Err(ChromiumError::InvalidOutput);
    }

    pdf_file
        .persist(output_path)
        .map_err(|e| ChromiumError::Persist(e.error))?;
    Ok(())
}
