//! Parsing inspection helpers
//!
//! Used by tests and by `gander parse` to eyeball segmenter output.

use super::parser::parse;
use super::segment::Segment;

/// Probe strings covering bold placement, bullets, code and asides
pub const SAMPLE_CASES: &[&str] = &[
    "This is **bold text** in the middle.",
    "**Bold at the start** and regular text.",
    "Regular text and **bold at the end**",
    "Multiple **bold** words **here** and **there**.",
    "**Are you curious about its mathematical properties?**",
    "This has * bullet points and **bold text** together.",
    "* **Bold bullet point** with formatting",
    "Text with `code` and **bold** and (parenthetical) content.",
];

/// Numbered one-line description of each segment, bullets followed by their children
pub fn describe_segments(segments: &[Segment]) -> Vec<String> {
    let mut lines = Vec::new();
    describe_into(segments, "", &mut lines);
    lines
}

fn describe_into(segments: &[Segment], indent: &str, lines: &mut Vec<String>) {
    for (index, segment) in segments.iter().enumerate() {
        lines.push(format!(
            "{indent}{}. Type: {}, Content: {:?}",
            index + 1,
            segment.kind,
            segment.content
        ));
        if !segment.children.is_empty() {
            describe_into(&segment.children, &format!("{indent}   "), lines);
        }
    }
}

/// Parse `text` and log the resulting segments at debug level
pub fn debug_text_parsing(text: &str) -> Vec<Segment> {
    let segments = parse(text);
    tracing::debug!(input = %text, count = segments.len(), "Parsed segments");
    for line in describe_segments(&segments) {
        tracing::debug!("{}", line);
    }
    segments
}
