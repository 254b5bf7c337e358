//! Word wrapping for styled transcript lines.
//!
//! Lines are wrapped ahead of rendering and drawn by a `Paragraph` with
//! wrapping disabled, so the number of visual rows is known exactly. The
//! transcript scroll math depends on that count.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wraps `line` to `width` columns, breaking at spaces where possible and
/// inside words only when a single word is wider than a row. Span styles,
/// the line style and its alignment carry over to every produced row.
pub fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line.clone()];
    }

    let mut wrapper = LineWrapper::new(width);
    for span in &line.spans {
        for piece in span.content.split_inclusive(' ') {
            wrapper.push_piece(piece, span.style);
        }
    }

    wrapper
        .finish()
        .into_iter()
        .map(|spans| {
            let mut row = Line::from(spans).style(line.style);
            row.alignment = line.alignment;
            row
        })
        .collect()
}

pub fn wrap_lines(lines: &[Line<'static>], width: usize) -> Vec<Line<'static>> {
    lines.iter().flat_map(|line| wrap_line(line, width)).collect()
}

struct LineWrapper {
    width: usize,
    rows: Vec<Vec<Span<'static>>>,
    current: Vec<Span<'static>>,
    row_width: usize,
}

impl LineWrapper {
    fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
            current: Vec::new(),
            row_width: 0,
        }
    }

    fn new_row(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.rows.push(spans);
        self.row_width = 0;
    }

    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        self.row_width += UnicodeWidthStr::width(text);
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn push_piece(&mut self, piece: &str, style: Style) {
        let mut piece = piece;
        if self.row_width > 0
            && self.row_width + UnicodeWidthStr::width(piece.trim_end()) > self.width
        {
            self.new_row();
            piece = piece.trim_start();
        }

        let word_width = UnicodeWidthStr::width(piece.trim_end());
        if self.row_width + word_width <= self.width {
            // Trailing spaces that would overflow the row are dropped.
            if self.row_width + UnicodeWidthStr::width(piece) > self.width {
                piece = piece.trim_end();
            }
            self.push(piece, style);
            return;
        }

        // A single word wider than the row: break between characters.
        let mut chunk = String::new();
        let mut chunk_width = 0;
        for ch in piece.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if self.row_width + chunk_width + ch_width > self.width
                && (self.row_width > 0 || !chunk.is_empty())
            {
                self.push(&chunk, style);
                chunk.clear();
                chunk_width = 0;
                self.new_row();
            }
            chunk.push(ch);
            chunk_width += ch_width;
        }
        self.push(&chunk, style);
    }

    fn finish(mut self) -> Vec<Vec<Span<'static>>> {
        if !self.current.is_empty() || self.rows.is_empty() {
            self.new_row();
        }
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Alignment;
    use ratatui::style::Modifier;

    fn texts(lines: &[Line<'static>]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn short_lines_are_untouched() {
        let line = Line::from("fits");
        assert_eq!(texts(&wrap_line(&line, 10)), vec!["fits"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let line = Line::from("the quick brown fox jumps");
        assert_eq!(
            texts(&wrap_line(&line, 10)),
            vec!["the quick ", "brown fox ", "jumps"]
        );
    }

    #[test]
    fn long_words_are_broken() {
        let line = Line::from("abcdefghijkl");
        assert_eq!(texts(&wrap_line(&line, 5)), vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn styles_and_alignment_survive_wrapping() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![Span::raw("plain words "), Span::styled("bold words", bold)])
            .alignment(Alignment::Right);
        let rows = wrap_line(&line, 12);
        assert_eq!(texts(&rows), vec!["plain words ", "bold words"]);
        assert_eq!(rows[1].alignment, Some(Alignment::Right));
        assert!(rows[1].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn wide_characters_count_double() {
        let line = Line::from("日本語のテキスト");
        let rows = wrap_line(&line, 6);
        assert!(rows.iter().all(|row| row.width() <= 6));
        assert_eq!(rows.len(), 3);
    }
}
