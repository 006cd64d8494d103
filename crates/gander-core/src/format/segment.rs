//! Segment types produced by the response segmenter

use serde::{Deserialize, Serialize};

/// Kind of a formatted unit of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Plain text
    Text,
    /// `**bold**` run
    Bold,
    /// Bold run whose trimmed content ends with `?`
    Question,
    /// `* ` list item, block-level
    Bullet,
    /// `( ... )` aside, parentheses included
    Parenthetical,
    /// Backtick-delimited inline code
    Code,
    /// Emphasized text (rendered, never produced by `parse`)
    Emphasis,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Text => "text",
            SegmentKind::Bold => "bold",
            SegmentKind::Question => "question",
            SegmentKind::Bullet => "bullet",
            SegmentKind::Parenthetical => "parenthetical",
            SegmentKind::Code => "code",
            SegmentKind::Emphasis => "emphasis",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One formatted unit of a parsed response
///
/// Segments are recomputed on every parse and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Covered text with delimiters stripped (trimmed for bullets)
    pub content: String,
    /// Nested segments, only populated for bullets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Segment>,
}

impl Segment {
    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(SegmentKind::Text, content)
    }

    pub fn bullet(content: impl Into<String>, children: Vec<Segment>) -> Self {
        Self {
            kind: SegmentKind::Bullet,
            content: content.into(),
            children,
        }
    }

    /// Whether this segment starts its own line when rendered
    pub fn is_block(&self) -> bool {
        self.kind == SegmentKind::Bullet
    }
}

/// Concatenate the visible text of a segment list
///
/// Bullets contribute their children when present, otherwise their content.
pub fn plain_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.kind == SegmentKind::Bullet && !segment.children.is_empty() {
            out.push_str(&plain_text(&segment.children));
        } else {
            out.push_str(&segment.content);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SegmentKind::Parenthetical).unwrap();
        assert_eq!(json, "\"parenthetical\"");
    }

    #[test]
    fn test_children_omitted_when_empty() {
        let json = serde_json::to_value(Segment::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "text", "content": "hi"}));

        let bullet = Segment::bullet("x", vec![Segment::text("x")]);
        let json = serde_json::to_value(bullet).unwrap();
        assert_eq!(json["children"][0]["content"], "x");
    }

    #[test]
    fn test_plain_text_uses_bullet_children() {
        let segments = vec![
            Segment::text("a "),
            Segment::bullet(
                "**x** y",
                vec![Segment::new(SegmentKind::Bold, "x"), Segment::text(" y")],
            ),
        ];
        assert_eq!(plain_text(&segments), "a x y");
    }
}
