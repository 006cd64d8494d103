//! Single-pass segmenter for model responses
//!
//! Scans left to right with one byte cursor and constant lookahead. Every
//! marker is ASCII, so each slice taken at a marker lands on a char boundary.
//! The scanner is total: unterminated markup degrades instead of failing,
//! which keeps it safe to run on every prefix of a reply while it is revealed.

use super::segment::{Segment, SegmentKind};

/// Cap on recursive bullet parsing
///
/// A marker preceded by a tab does not end a bullet, and trimming the body
/// can then expose it as a nested bullet, so `"* \t* x"` nests one level.
const MAX_NESTING: usize = 4;

/// Parse a response into its ordered segment list
pub fn parse(text: &str) -> Vec<Segment> {
    parse_nested(text, 0)
}

fn parse_nested(text: &str, depth: usize) -> Vec<Segment> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut segments = Vec::new();
    // Pending plain text is always the contiguous range pending..idx
    let mut pending = 0;
    let mut idx = 0;

    while idx < len {
        match bytes[idx] {
            b'*' if bytes.get(idx + 1) == Some(&b'*') => match find_bold_close(bytes, idx + 2) {
                Some(close) => {
                    flush_text(text, pending, idx, &mut segments);
                    let content = &text[idx + 2..close];
                    let kind = if content.trim().ends_with('?') {
                        SegmentKind::Question
                    } else {
                        SegmentKind::Bold
                    };
                    segments.push(Segment::new(kind, content));
                    idx = close + 2;
                    pending = idx;
                }
                None => {
                    // No closer: the opener and everything after it stay text
                    idx = len;
                }
            },
            b'`' => {
                flush_text(text, pending, idx, &mut segments);
                match find_byte(bytes, idx + 1, b'`') {
                    Some(close) => {
                        segments.push(Segment::new(SegmentKind::Code, &text[idx + 1..close]));
                        idx = close + 1;
                    }
                    None => {
                        // Unterminated code is dropped until its closer arrives
                        idx = len;
                    }
                }
                pending = idx;
            }
            b'*' if is_bullet_marker(bytes, idx) => {
                flush_text(text, pending, idx, &mut segments);
                let end = find_bullet_end(bytes, idx + 2);
                let inner = text[idx + 2..end].trim();
                let children = if depth < MAX_NESTING {
                    parse_nested(inner, depth + 1)
                } else {
                    Vec::new()
                };
                segments.push(Segment::bullet(inner, children));
                idx = end;
                pending = idx;
            }
            b'(' => {
                flush_text(text, pending, idx, &mut segments);
                let end = find_paren_end(bytes, idx + 1);
                segments.push(Segment::new(SegmentKind::Parenthetical, &text[idx..end]));
                idx = end;
                pending = idx;
            }
            _ => idx += 1,
        }
    }

    flush_text(text, pending, len, &mut segments);
    segments
}

/// Emit pending text as a `text` segment unless it is blank
fn flush_text(text: &str, start: usize, end: usize, segments: &mut Vec<Segment>) {
    if start >= end {
        return;
    }
    let run = &text[start..end];
    if !run.trim().is_empty() {
        segments.push(Segment::text(run));
    }
}

/// Position of the first `**` at or after `from`
fn find_bold_close(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len().saturating_sub(1)).find(|&j| bytes[j] == b'*' && bytes[j + 1] == b'*')
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

/// `* ` at the start of input or right after a space or newline
fn is_bullet_marker(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'*'
        && bytes.get(idx + 1) == Some(&b' ')
        && (idx == 0 || matches!(bytes[idx - 1], b' ' | b'\n'))
}

/// End of a bullet body: the next bullet marker, or end of input
fn find_bullet_end(bytes: &[u8], from: usize) -> usize {
    (from..bytes.len())
        .find(|&j| is_bullet_marker(bytes, j))
        .unwrap_or(bytes.len())
}

/// Index just past the `)` balancing an already-consumed `(`
///
/// Unbalanced runs close at end of input.
fn find_paren_end(bytes: &[u8], from: usize) -> usize {
    let mut depth = 1usize;
    let mut idx = from;
    while idx < bytes.len() && depth > 0 {
        match bytes[idx] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        idx += 1;
    }
    idx
}
