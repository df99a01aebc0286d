//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.

use clap::Parser;

pub mod global;
pub use global::GlobalArgs;

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "cv",
    bin_name = "cv",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a PDF CV from YAML data and a template",
    long_about = "Reads CV data from YAML files, renders it with a Handlebars \
                  template and prints the result to PDF with a headless \
                  Chromium-family browser.",
    after_help = "EXAMPLES:\n\
        \x20 cv                      # default template from config\n\
        \x20 cv --template ats\n\
        \x20 cv -t creative -q       # print only the generated path\n\
        \x20 CV__DATA__BASE_DIR=~/cv/data cv",
)]
pub struct Cli {
    /// Template to render with.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "Template name (default: templates.default from config)"
    )]
    pub template: Option<String>,

    /// Flags shared by every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,
}
