//! YAML directory data source.
//!
//! Builds one [`Record`] from a directory of YAML files.
//!
//! # Directory layout expected
//!
//! ```text
//! data/
//! ├── content/              ← optional; falls back to data/
//! │   ├── profile.yaml      ← becomes record.profile
//! │   ├── experience.yml    ← becomes record.experience
//! │   └── skills.example.yaml   (ignored)
//! └── assets/               ← optional; falls back to data/
//!     └── profile.jpeg      ← embedded as profile.photo (data URL)
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use vitae_core::{
    application::{ApplicationError, ports::DataSource},
    domain::{Record, Value},
    error::{Context, VitaeResult},
};

const DEFAULT_BASE_DIR: &str = "data";
const DEFAULT_PHOTO_FILE: &str = "profile.jpeg";
const EXAMPLE_MARKER: &str = ".example.";

/// Where and what the YAML source reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlSourceOptions {
    /// Root data directory.
    pub base_dir: PathBuf,
    /// YAML directory; `<base_dir>/content` when unset.
    pub content_dir: Option<PathBuf>,
    /// Asset directory; `<base_dir>/assets` when unset.
    pub assets_dir: Option<PathBuf>,
    /// Explicit file names relative to the content directory. Disables
    /// discovery when set.
    pub files: Option<Vec<String>>,
    /// Photo to embed; `None` disables embedding.
    pub photo_file: Option<String>,
}

impl Default for YamlSourceOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

impl YamlSourceOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            content_dir: None,
            assets_dir: None,
            files: None,
            photo_file: Some(DEFAULT_PHOTO_FILE.into()),
        }
    }

    /// Configured content directory, before the existence fallback.
    pub fn content_dir(&self) -> PathBuf {
        self.content_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("content"))
    }

    /// Configured assets directory, before the existence fallback.
    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("assets"))
    }
}

/// Loads and merges YAML files into one record.
#[derive(Debug, Clone, Default)]
pub struct YamlDataSource {
    options: YamlSourceOptions,
}

impl YamlDataSource {
    pub fn new(options: YamlSourceOptions) -> Self {
        Self { options }
    }

    /// Read from `base_dir` with default sub-directories.
    pub fn from_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(YamlSourceOptions::new(base_dir))
    }

    pub fn options(&self) -> &YamlSourceOptions {
        &self.options
    }
}

#[async_trait]
impl DataSource for YamlDataSource {
    #[instrument(skip_all, fields(base_dir = %self.options.base_dir.display()))]
    async fn load_data(&self) -> VitaeResult<Record> {
        let options = self.options.clone();
        tokio::task::spawn_blocking(move || load_record(&options))
            .await
            .context("YAML loading task failed")?
    }
}

fn load_record(options: &YamlSourceOptions) -> VitaeResult<Record> {
    let content_dir = existing_or_base(options.content_dir(), &options.base_dir);
    let assets_dir = existing_or_base(options.assets_dir(), &options.base_dir);

    let files = match &options.files {
        Some(files) => files.clone(),
        None => discover_files(&content_dir)?,
    };
    debug!(
        content_dir = %content_dir.display(),
        files = files.len(),
        "Loading YAML files"
    );

    let mut record = Record::new();
    for file in &files {
        let path = content_dir.join(file);
        let Some(value) = read_document(&path)? else {
            debug!(path = %path.display(), "Skipping missing or empty YAML file");
            continue;
        };
        record.insert(section_key(file), value);
    }

    if record.is_empty() {
        return Err(ApplicationError::DataUnavailable {
            reason: format!("no YAML data found in {}", content_dir.display()),
        }
        .into());
    }

    if let Some(photo) = &options.photo_file {
        embed_photo(&mut record, &assets_dir.join(photo))?;
    }

    Ok(record)
}

fn existing_or_base(dir: PathBuf, base: &Path) -> PathBuf {
    if dir.is_dir() { dir } else { base.to_path_buf() }
}

/// YAML files directly inside `dir`, sorted by name.
fn discover_files(dir: &Path) -> VitaeResult<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ApplicationError::DataUnavailable {
            reason: format!("failed to list {}: {}", dir.display(), e),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_data_file(&name) {
            files.push(name.into_owned());
        }
    }
    Ok(files)
}

fn is_data_file(name: &str) -> bool {
    (name.ends_with(".yaml") || name.ends_with(".yml")) && !name.contains(EXAMPLE_MARKER)
}

/// Section name for a file: its stem (`profile.yaml` → `profile`).
fn section_key(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_owned())
}

fn read_document(path: &Path) -> VitaeResult<Option<Value>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| ApplicationError::DataUnavailable {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let invalid = |e: serde_yaml::Error| ApplicationError::DataUnavailable {
        reason: format!("invalid YAML in {}: {}", path.display(), e),
    };

    // `<<: *anchor` merge keys are resolved before the tree is converted.
    let mut document: serde_yaml::Value = serde_yaml::from_str(&content).map_err(invalid)?;
    document.apply_merge().map_err(invalid)?;
    let value: Value = serde_yaml::from_value(document).map_err(invalid)?;

    Ok((!value.is_null()).then_some(value))
}

/// Attach the photo as a data URL to `profile.photo`, or to the root when
/// there is no profile section.
fn embed_photo(record: &mut Record, path: &Path) -> VitaeResult<()> {
    if !path.is_file() {
        debug!(path = %path.display(), "No profile photo found");
        return Ok(());
    }

    let bytes = fs::read(path).map_err(|e| ApplicationError::DataUnavailable {
        reason: format!("failed to read photo {}: {}", path.display(), e),
    })?;
    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("image/jpeg");
    let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(&bytes));

    match record.get_mut("profile").and_then(Value::as_mapping_mut) {
        Some(profile) => {
            profile.insert("photo".into(), data_url.into());
        }
        None => {
            warn!("No profile section; attaching photo at the record root");
            record.insert("photo", data_url);
        }
    }
    Ok(())
}
