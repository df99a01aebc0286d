//! Output filename policy.
//!
//! Pure and deterministic: the same inputs always produce the same name.
//! Names are `CV-<Template>_<Subject-Name>_<YYYYMMDDTHHMMSS>.pdf`, which sorts
//! chronologically per subject and template.
//!
//! Two runs in the same second for the same subject and template produce the
//! same name; the later document overwrites the earlier one.

use chrono::NaiveDateTime;

/// Leading segment of every generated filename.
pub const FILENAME_PREFIX: &str = "CV";

/// Extension of every generated filename (without the dot).
pub const FILENAME_EXTENSION: &str = "pdf";

/// Substituted when a token normalizes to nothing.
pub const PLACEHOLDER_TOKEN: &str = "CV";

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Build the output filename for a subject, template, and generation time.
pub fn format_filename(subject_name: &str, template_id: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{FILENAME_PREFIX}-{}_{}_{}.{FILENAME_EXTENSION}",
        token_or_placeholder(template_id),
        token_or_placeholder(subject_name),
        format_timestamp(timestamp),
    )
}

/// Fixed-width, locale-independent timestamp: `YYYYMMDDTHHMMSS`.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Normalize free text into a filename-safe token.
///
/// Whitespace runs collapse to a single `-`, each word is title-cased, and
/// anything outside `[A-Za-z0-9-]` is dropped. May return an empty string.
pub fn slugify(input: &str) -> String {
    input
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

fn token_or_placeholder(input: &str) -> String {
    let token = slugify(input);
    if token.is_empty() {
        PLACEHOLDER_TOKEN.to_owned()
    } else {
        token
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
