//! Rendered dashboard document

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// The final rendered document plus its upload filename
///
/// Has no identity beyond its content; a fresh one is produced and
/// discarded every render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDashboard {
    /// Complete HTML document
    pub html: String,
    /// Upload filename, `dashboard-YYYY-M-D-H-Min.html`
    pub file_name: String,
}

impl RenderedDashboard {
    /// Wrap rendered HTML with a filename derived from `generated_at`
    ///
    /// Fields are not zero-padded, matching the screen server's naming
    /// convention.
    #[must_use]
    pub fn new(html: String, generated_at: NaiveDateTime) -> Self {
        let file_name = format!(
            "dashboard-{}-{}-{}-{}-{}.html",
            generated_at.year(),
            generated_at.month(),
            generated_at.day(),
            generated_at.hour(),
            generated_at.minute()
        );
        Self { html, file_name }
    }
}
