//! Output management and formatting.

use std::{
    io::{self, IsTerminal},
    time::Duration,
};

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::json;

use vitae_core::application::BuildReport;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Report a finished build, exactly once.
    ///
    /// Human/plain: `✓ CV generated: <path>`, or the bare path when quiet.
    /// JSON: one object, regardless of quiet.
    pub fn report(&self, report: &BuildReport) -> io::Result<()> {
        let path = report.output_path.display().to_string();
        match self.resolved_format {
            OutputFormat::Json => self.term.write_line(&report_json(report).to_string()),
            _ if self.quiet => self.term.write_line(&path),
            _ => self.success(&format!("CV generated: {path}")),
        }
    }

    /// Spinner on stderr while a long step runs; hidden unless the output
    /// is human-facing.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet
            || self.resolved_format != OutputFormat::Human
            || !io::stderr().is_terminal()
        {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg.to_owned());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

fn report_json(report: &BuildReport) -> serde_json::Value {
    json!({
        "output_path": report.output_path,
        "template": report.template.as_str(),
        "subject_name": report.subject_name,
        "generated_at": report.generated_at.format(REPORT_TIMESTAMP_FORMAT).to_string(),
        "markup_bytes": report.markup_bytes,
        "state": report.state.to_string(),
    })
}
