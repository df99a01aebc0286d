//! Page setup for printed CVs.
//!
//! The browser prints without its own header and footer, so page size,
//! margins, the page counter and the provenance stamp are all expressed as a
//! CSS `@page` rule injected into the markup.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDateTime;
use qrcode::{EcLevel, QrCode, render::svg, types::QrError};
use rand::Rng;

const PAGE_SIZE: &str = "A4";
const MARGIN_VERTICAL: &str = "20mm";
const MARGIN_HORIZONTAL: &str = "15mm";
const STAMP_SIZE: &str = "6mm";
const STAMP_DARK: &str = "#cccccc";
const STAMP_LIGHT: &str = "#ffffff";
const STAMP_PREFIX: &str = "CLI";
const STAMP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Document id encoded in the stamp: `CLI20240302T081530-0A7`.
pub fn stamp_id(at: NaiveDateTime, salt: u16) -> String {
    format!(
        "{STAMP_PREFIX}{}-{:03X}",
        at.format(STAMP_TIMESTAMP_FORMAT),
        salt & 0xFFF
    )
}

/// A QR code identifying one generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    id: String,
    svg: String,
}

impl Stamp {
    /// Stamp for `at` with a random salt.
    pub fn generate(at: NaiveDateTime) -> Result<Self, QrError> {
        let salt = rand::rng().random_range(0..0x1000);
        Self::for_id(stamp_id(at, salt))
    }

    pub fn for_id(id: impl Into<String>) -> Result<Self, QrError> {
        let id = id.into();
        let code = QrCode::with_error_correction_level(id.as_bytes(), EcLevel::H)?;
        let svg = code
            .render::<svg::Color>()
            .quiet_zone(false)
            .dark_color(svg::Color(STAMP_DARK))
            .light_color(svg::Color(STAMP_LIGHT))
            .build();
        Ok(Self { id, svg })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    fn data_url(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(&self.svg))
    }
}

/// Print stylesheet for one document.
#[derive(Debug, Clone, Default)]
pub struct PrintSetup {
    stamp: Option<Stamp>,
}

impl PrintSetup {
    pub fn new(stamp: Option<Stamp>) -> Self {
        Self { stamp }
    }

    pub fn stamp(&self) -> Option<&Stamp> {
        self.stamp.as_ref()
    }

    pub fn stylesheet(&self) -> String {
        let mut css = format!(
            "@page {{\n  size: {PAGE_SIZE};\n  margin: {MARGIN_VERTICAL} {MARGIN_HORIZONTAL};\n"
        );
        css.push_str(
            "  @bottom-right {\n    content: counter(page) \" / \" counter(pages);\n    \
             font-size: 9px;\n    color: #cccccc;\n  }\n",
        );
        if let Some(stamp) = &self.stamp {
            let url = stamp.data_url();
            for corner in ["top-left", "top-right", "bottom-left"] {
                css.push_str(&format!(
                    "  @{corner} {{\n    content: url(\"{url}\");\n    \
                     width: {STAMP_SIZE};\n    height: {STAMP_SIZE};\n  }}\n"
                ));
            }
        }
        css.push_str("}\nhtml { print-color-adjust: exact; -webkit-print-color-adjust: exact; }\n");
        css
    }

    /// Markup with the print stylesheet added at the end of `<head>`, or at
    /// the very start when there is no head.
    pub fn apply(&self, markup: &str) -> String {
        let style = format!("<style>\n{}</style>\n", self.stylesheet());
        // ASCII lowercasing keeps byte offsets intact.
        match markup.to_ascii_lowercase().find("</head>") {
            Some(at) => {
                let mut out = String::with_capacity(markup.len() + style.len());
                out.push_str(&markup[..at]);
                out.push_str(&style);
                out.push_str(&markup[at..]);
                out
            }
            None => style + markup,
        }
    }
}
