//! Handlebars template engine.
//!
//! Templates live on disk, one directory per template:
//!
//! ```text
//! templates/
//! └── creative/
//!     ├── creative.hbs          ← main template
//!     ├── styles/creative.css   ← exposed to the template as {{{css}}}
//!     └── partials/
//!         └── header.hbs        ← available as {{> header}}
//! ```
//!
//! A new registry is built for every render, so nothing registered for one
//! template leaks into another.

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value as Json;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use vitae_core::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::{Markup, Record, TemplateId},
    error::{Context as _, VitaeResult},
};

const TEMPLATE_EXTENSION: &str = "hbs";
const STYLE_EXTENSION: &str = "css";
const CSS_FIELD: &str = "css";

/// Renders records with Handlebars templates from a directory.
#[derive(Debug, Clone)]
pub struct HandlebarsEngine {
    templates_dir: PathBuf,
}

impl HandlebarsEngine {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Template ids with a main template file, sorted.
    pub fn available_templates(&self) -> Vec<String> {
        available_templates(&self.templates_dir)
    }
}

#[async_trait]
impl TemplateEngine for HandlebarsEngine {
    #[instrument(skip_all, fields(template = %template))]
    async fn render(&self, template: &TemplateId, record: &Record) -> VitaeResult<Markup> {
        let templates_dir = self.templates_dir.clone();
        let id = template.as_str().to_owned();
        let record = record.clone();

        tokio::task::spawn_blocking(move || render_blocking(&templates_dir, &id, &record))
            .await
            .context("template rendering task failed")?
    }
}

fn render_blocking(templates_dir: &Path, id: &str, record: &Record) -> VitaeResult<Markup> {
    let layout = TemplateLayout::resolve(templates_dir, id).ok_or_else(|| {
        ApplicationError::TemplateNotFound {
            template: id.to_owned(),
            available: available_templates(templates_dir),
        }
    })?;

    let source = fs::read_to_string(&layout.main).map_err(|e| render_failed(id, e))?;
    let css = layout.stylesheet();

    let mut registry = Handlebars::new();
    registry.register_helper("phoneDigits", Box::new(phone_digits_helper));
    for (name, partial) in layout.partials()? {
        registry
            .register_partial(&name, partial)
            .map_err(|e| render_failed(id, e))?;
    }

    let mut context = serde_json::to_value(record).context("record is not serializable")?;
    if let Json::Object(fields) = &mut context {
        fields.insert(CSS_FIELD.into(), Json::String(css));
    }

    let html = registry
        .render_template(&source, &context)
        .map_err(|e| render_failed(id, e))?;
    debug!(bytes = html.len(), "Template rendered");

    Ok(Markup::new(html))
}

fn render_failed(id: &str, e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::TemplateRenderFailed {
        template: id.to_owned(),
        reason: e.to_string(),
    }
}

/// Paths that make up one template.
struct TemplateLayout {
    id: String,
    dir: PathBuf,
    main: PathBuf,
}

impl TemplateLayout {
    /// `None` when the id is not a plain directory name or has no main file.
    fn resolve(templates_dir: &Path, id: &str) -> Option<Self> {
        if !is_plain_name(id) {
            return None;
        }
        let dir = templates_dir.join(id);
        let main = dir.join(format!("{id}.{TEMPLATE_EXTENSION}"));
        main.is_file().then(|| Self {
            id: id.to_owned(),
            dir,
            main,
        })
    }

    fn stylesheet(&self) -> String {
        let path = self
            .dir
            .join("styles")
            .join(format!("{}.{STYLE_EXTENSION}", self.id));
        match fs::read_to_string(&path) {
            Ok(css) => css,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Stylesheet not loaded, using none");
                String::new()
            }
        }
    }

    fn partials(&self) -> VitaeResult<Vec<(String, String)>> {
        let dir = self.dir.join("partials");
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut partials = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| render_failed(&self.id, e))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(path).map_err(|e| render_failed(&self.id, e))?;
            debug!(partial = name, "Registering partial");
            partials.push((name.to_owned(), content));
        }
        Ok(partials)
    }
}

fn is_plain_name(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.contains("..")
        && !id.contains(['/', '\\'])
}

fn available_templates(templates_dir: &Path) -> Vec<String> {
    if !templates_dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(templates_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .filter(|id| TemplateLayout::resolve(templates_dir, id).is_some())
        .collect()
}

/// `{{phoneDigits profile.phone}}`: keeps only the ASCII digits, for `tel:`
/// links.
fn phone_digits_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = match h.param(0).map(|p| p.value()) {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    out.write(&digits)?;
    Ok(())
}
