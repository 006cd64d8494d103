//! Display hints attached to each segment kind
//!
//! The segmenter never reads these; they travel with each published frame so
//! the host can map kinds to colors.

use serde::{Deserialize, Serialize};

use super::segment::SegmentKind;

/// Per-kind color hints, as CSS-style color strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterOptions {
    pub bullet_color: String,
    pub bold_color: String,
    pub parenthetical_color: String,
    pub question_color: String,
    pub emphasis_color: String,
    pub code_background_color: String,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            bullet_color: "#3b82f6".to_string(),
            bold_color: "#2563eb".to_string(),
            parenthetical_color: "#4b5563".to_string(),
            question_color: "#ea580c".to_string(),
            emphasis_color: "#16a34a".to_string(),
            code_background_color: "#f3f4f6".to_string(),
        }
    }
}

impl FormatterOptions {
    /// Foreground hint for a kind (code maps to its background hint)
    pub fn color_for(&self, kind: SegmentKind) -> Option<&str> {
        match kind {
            SegmentKind::Text => None,
            SegmentKind::Bold => Some(&self.bold_color),
            SegmentKind::Question => Some(&self.question_color),
            SegmentKind::Bullet => Some(&self.bullet_color),
            SegmentKind::Parenthetical => Some(&self.parenthetical_color),
            SegmentKind::Code => Some(&self.code_background_color),
            SegmentKind::Emphasis => Some(&self.emphasis_color),
        }
    }
}
