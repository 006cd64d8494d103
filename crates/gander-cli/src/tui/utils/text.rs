//! Text measurement and wrapping for message rendering
//!
//! All width calculations use unicode display width, not byte length.
//! This correctly handles multi-byte UTF-8 characters and wide characters (CJK, emoji).
//!
//! Lines are wrapped here rather than by the paragraph widget, so the row
//! count used for scrolling is exactly the number of rows drawn.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Display width of a char (control characters take no columns)
#[inline]
fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// A run of styled chars that is either all whitespace or all non-whitespace
struct Token {
    chars: Vec<(char, Style)>,
    width: usize,
    is_space: bool,
}

fn tokenize(line: &Line<'_>) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for span in &line.spans {
        for c in span.content.chars() {
            let is_space = c.is_whitespace();
            match tokens.last_mut() {
                Some(token) if token.is_space == is_space => {
                    token.chars.push((c, span.style));
                    token.width += char_width(c);
                }
                _ => tokens.push(Token {
                    chars: vec![(c, span.style)],
                    width: char_width(c),
                    is_space,
                }),
            }
        }
    }
    tokens
}

/// Rows under construction
struct Rows {
    rows: Vec<Vec<(char, Style)>>,
    current: Vec<(char, Style)>,
    width: usize,
}

impl Rows {
    fn push_char(&mut self, c: char, style: Style, width: usize) {
        self.current.push((c, style));
        self.width += width;
    }

    fn break_row(&mut self) {
        self.rows.push(std::mem::take(&mut self.current));
        self.width = 0;
    }
}

/// Word-wrap one styled line into rows no wider than `max_width`
///
/// Whitespace inside a row is kept as-is; whitespace that does not fit is the
/// break point and is dropped. Words longer than a row are force-broken by
/// character. Always yields at least one row.
pub fn wrap_line(line: &Line<'_>, max_width: usize) -> Vec<Line<'static>> {
    let mut rows = Rows {
        rows: Vec::new(),
        current: Vec::new(),
        width: 0,
    };

    if max_width == 0 {
        for token in tokenize(line) {
            rows.current.extend(token.chars);
        }
    } else {
        for token in tokenize(line) {
            if rows.width + token.width <= max_width {
                for (c, style) in token.chars {
                    rows.push_char(c, style, char_width(c));
                }
                continue;
            }
            if token.is_space {
                if !rows.current.is_empty() {
                    rows.break_row();
                }
                continue;
            }
            if !rows.current.is_empty() {
                rows.break_row();
            }
            for (c, style) in token.chars {
                let width = char_width(c);
                if rows.width + width > max_width && !rows.current.is_empty() {
                    rows.break_row();
                }
                rows.push_char(c, style, width);
            }
        }
    }

    rows.break_row();
    rows.rows
        .into_iter()
        .map(|row| to_line(row, line.style))
        .collect()
}

/// Regroup styled chars into spans
fn to_line(row: Vec<(char, Style)>, line_style: Style) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style = None;
    for (c, char_style) in row {
        if style.is_some_and(|s| s != char_style) {
            spans.push(Span::styled(std::mem::take(&mut text), style.unwrap_or_default()));
        }
        style = Some(char_style);
        text.push(c);
    }
    if let Some(style) = style {
        spans.push(Span::styled(text, style));
    }
    Line::from(spans).style(line_style)
}

/// Wrap every line, in order
pub fn wrap_lines(lines: &[Line<'_>], max_width: usize) -> Vec<Line<'static>> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line, max_width))
        .collect()
}

/// Count how many rows a single line occupies when word-wrapped at max_width
pub fn count_wrapped_lines(line: &str, max_width: usize) -> usize {
    wrap_line(&Line::raw(line), max_width).len()
}
