//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CV__<SECTION>__<KEY>`, e.g. `CV__DATA__BASE_DIR`
//! 3. File given with `--config` (must exist)
//! 4. `cv.toml` in the current directory
//! 5. User config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use vitae_adapters::YamlSourceOptions;

const ENV_PREFIX: &str = "CV";
const ENV_SEPARATOR: &str = "__";
const LOCAL_CONFIG_BASENAME: &str = "cv";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where CV data is read from.
    pub data: DataConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// PDF renderer settings.
    pub renderer: RendererConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub base_dir: PathBuf,
    pub content_dir: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub files: Option<Vec<String>>,
    /// Photo file in the assets directory; empty disables embedding.
    pub photo_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: PathBuf,
    /// Used when `--template` is not given.
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Chromium-family browser executable.
    pub binary: PathBuf,
    /// Print the QR provenance stamp in the page margins.
    pub stamp: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated documents; the current directory when unset.
    pub dir: Option<PathBuf>,
    pub no_color: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("data"),
            content_dir: None,
            assets_dir: None,
            files: None,
            photo_file: "profile.jpeg".into(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            default: "creative".into(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("chromium"),
            stamp: true,
        }
    }
}

impl DataConfig {
    /// Options for the YAML data source.
    pub fn source_options(&self) -> YamlSourceOptions {
        YamlSourceOptions {
            base_dir: self.base_dir.clone(),
            content_dir: self.content_dir.clone(),
            assets_dir: self.assets_dir.clone(),
            files: self.files.clone(),
            photo_file: (!self.photo_file.trim().is_empty()).then(|| self.photo_file.clone()),
        }
    }
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path the user passed via `--config`; when given
    /// it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(Self::config_path().as_deref(), config_file)
    }

    fn load_from(user_file: Option<&Path>, config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vitae", "vitae")
            .map(|d| d.config_dir().join("config.toml"))
    }
}
