//! Segment rendering to Ratatui lines

use std::str::FromStr;

use gander_core::format::{FormatterOptions, Segment, SegmentKind};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const BULLET_MARKER: &str = "• ";

/// Terminal colors resolved from formatter hints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bullet: Color,
    pub bold: Color,
    pub parenthetical: Color,
    pub question: Color,
    pub emphasis: Color,
    pub code_bg: Color,
}

impl Palette {
    /// Unparseable hints fall back to the terminal's default color
    pub fn from_options(options: &FormatterOptions) -> Self {
        let color = |kind| options.color_for(kind).map_or(Color::Reset, parse_color);
        Self {
            bullet: color(SegmentKind::Bullet),
            bold: color(SegmentKind::Bold),
            parenthetical: color(SegmentKind::Parenthetical),
            question: color(SegmentKind::Question),
            emphasis: color(SegmentKind::Emphasis),
            code_bg: color(SegmentKind::Code),
        }
    }

    fn style_for(&self, kind: SegmentKind) -> Style {
        match kind {
            SegmentKind::Text => Style::default(),
            SegmentKind::Bold => Style::default().fg(self.bold).add_modifier(Modifier::BOLD),
            SegmentKind::Question => Style::default()
                .fg(self.question)
                .add_modifier(Modifier::BOLD),
            SegmentKind::Parenthetical => Style::default()
                .fg(self.parenthetical)
                .add_modifier(Modifier::ITALIC),
            SegmentKind::Emphasis => Style::default()
                .fg(self.emphasis)
                .add_modifier(Modifier::ITALIC),
            SegmentKind::Code => Style::default().fg(Color::Black).bg(self.code_bg),
            SegmentKind::Bullet => Style::default()
                .fg(self.bullet)
                .add_modifier(Modifier::BOLD),
        }
    }
}

fn parse_color(value: &str) -> Color {
    Color::from_str(value.trim()).unwrap_or(Color::Reset)
}

/// Splits text on newlines into lines of spans
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl LineBuilder {
    fn push(&mut self, text: &str, style: Style) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn break_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
    }

    /// Start a fresh line unless already at one
    fn ensure_line_start(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if !self.current.is_empty() {
            self.break_line();
        }
        self.lines
    }
}

/// Render a segment tree to styled lines; bullets get their own line
pub fn render_segments(segments: &[Segment], palette: &Palette) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::default();
    for segment in segments {
        render_segment(segment, palette, &mut builder);
    }
    builder.finish()
}

fn render_segment(segment: &Segment, palette: &Palette, builder: &mut LineBuilder) {
    if segment.is_block() {
        builder.ensure_line_start();
        builder.push(BULLET_MARKER, palette.style_for(segment.kind));
        if segment.children.is_empty() {
            builder.push(&segment.content, Style::default());
        } else {
            for child in &segment.children {
                render_segment(child, palette, builder);
            }
        }
        builder.break_line();
        return;
    }

    match segment.kind {
        SegmentKind::Code => {
            builder.push(
                &format!(" {} ", segment.content),
                palette.style_for(SegmentKind::Code),
            );
        }
        kind => builder.push(&segment.content, palette.style_for(kind)),
    }
}

#[cfg(test)]
mod tests {
    use gander_core::format::parse;

    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_palette_parses_hex_and_names() {
        let options = FormatterOptions {
            bold_color: "yellow".to_string(),
            question_color: "not a color".to_string(),
            ..FormatterOptions::default()
        };
        let palette = Palette::from_options(&options);
        assert_eq!(palette.bold, Color::Yellow);
        assert_eq!(palette.question, Color::Reset);
        assert_eq!(palette.bullet, Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(palette.code_bg, Color::Rgb(0xf3, 0xf4, 0xf6));
    }

    #[test]
    fn test_bullet_marker_uses_bullet_hint() {
        let options = FormatterOptions {
            bullet_color: "magenta".to_string(),
            ..FormatterOptions::default()
        };
        let palette = Palette::from_options(&options);
        let lines = render_segments(&parse("* item"), &palette);
        assert_eq!(plain(&lines[0]), "• item");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Magenta));
    }

    #[test]
    fn test_inline_segments_share_a_line() {
        let palette = Palette::from_options(&FormatterOptions::default());
        let lines = render_segments(&parse("a **b** `c`"), &palette);
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "a b c ");
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_bullets_start_their_own_lines() {
        let palette = Palette::from_options(&FormatterOptions::default());
        let lines = render_segments(&parse("Pick one: * **red** * blue"), &palette);
        let text: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(text, vec!["Pick one: ", "• red", "• blue"]);
    }

    #[test]
    fn test_newlines_split_lines() {
        let palette = Palette::from_options(&FormatterOptions::default());
        let lines = render_segments(&parse("one\n\ntwo"), &palette);
        let text: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(text, vec!["one", "", "two"]);
    }
}
