//! Build one CV: the only thing `cv` does.
//!
//! Responsibility: turn config and flags into adapters, run the core build
//! service, and display the result. No business logic lives here.

use tracing::{debug, info, instrument};

use vitae_adapters::{
    ChromiumRenderer, FixedClock, HandlebarsEngine, SystemClock, YamlDataSource,
};
use vitae_core::{
    application::{BuildService, ports::Clock},
    domain::TemplateId,
    error::VitaeError,
};

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute a build.
///
/// 1. Resolve the template (flag, else `templates.default`)
/// 2. Make sure the output directory exists
/// 3. Wire the YAML, Handlebars and Chromium adapters into `BuildService`
/// 4. Report the generated path
#[instrument(skip_all)]
pub async fn execute(
    template: Option<String>,
    config: AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    // 1. Template
    let template = resolve_template(template, &config)?;
    debug!(
        template = %template,
        data_dir = %config.data.base_dir.display(),
        templates_dir = %config.templates.dir.display(),
        browser = %config.renderer.binary.display(),
        "Build configured"
    );

    // 2. Output directory
    if let Some(dir) = &config.output.dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_cli_context(|| format!("creating output directory {}", dir.display()))?;
    }

    // 3. Adapters
    let service = build_service(&config);

    let spinner = output.spinner(&format!("Generating CV with '{template}'..."));
    let result = service.build(&template).await;
    spinner.finish_and_clear();
    let report = result.with_cli_context(|| "building CV")?;

    info!(
        output_path = %report.output_path.display(),
        subject = %report.subject_name,
        "Build completed"
    );

    // 4. Report
    output.report(&report)?;
    Ok(())
}

fn resolve_template(flag: Option<String>, config: &AppConfig) -> CliResult<TemplateId> {
    let raw = flag.unwrap_or_else(|| config.templates.default.clone());
    TemplateId::new(raw)
        .map_err(VitaeError::from)
        .with_cli_context(|| "resolving template")
}

fn build_service(config: &AppConfig) -> BuildService {
    // One reading for the whole run: filename and stamp carry the same time.
    let clock = FixedClock(SystemClock::new().now());

    let source = YamlDataSource::new(config.data.source_options());
    let engine = HandlebarsEngine::new(&config.templates.dir);
    let renderer = ChromiumRenderer::new(&config.renderer.binary)
        .with_stamp(config.renderer.stamp)
        .with_clock(clock);

    let service = BuildService::new(
        Box::new(source),
        Box::new(engine),
        Box::new(renderer),
        Box::new(clock),
    );

    match &config.output.dir {
        Some(dir) => service.with_output_dir(dir),
        None => service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;

    #[test]
    fn flag_wins_over_config_default() {
        let config = AppConfig::default();
        let id = resolve_template(Some("ats".into()), &config).unwrap();
        assert_eq!(id.as_str(), "ats");
    }

    #[test]
    fn config_default_used_without_flag() {
        let id = resolve_template(None, &AppConfig::default()).unwrap();
        assert_eq!(id.as_str(), "creative");
    }

    #[test]
    fn blank_template_is_user_error() {
        let err = resolve_template(Some("   ".into()), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn configured_output_dir_is_used() {
        let mut config = AppConfig::default();
        config.output.dir = Some(PathBuf::from("out"));
        assert_eq!(build_service(&config).output_dir(), PathBuf::from("out"));
        assert_eq!(
            build_service(&AppConfig::default()).output_dir(),
            PathBuf::new()
        );
    }
}
