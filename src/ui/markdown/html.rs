use ratatui::style::{Modifier, Style};
use ratatui::text::Line;

use super::lines::LineBuilder;
use crate::ui::theme::Theme;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "wbr", "col", "area"];

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close(String),
}

/// Turns sanitized markup into styled terminal lines.
///
/// The input is expected to be the output of the sanitizer, so it is
/// well-formed and only contains the safe tag subset; anything unexpected is
/// rendered as its text content.
pub(super) fn markup_lines(html: &str, theme: &Theme, base: Style) -> Vec<Line<'static>> {
    let mut walker = MarkupWalker::new(theme, base);
    for token in tokenize(html) {
        match token {
            Token::Text(text) => walker.text(&decode_entities(text)),
            Token::Open {
                name,
                attrs,
                self_closing,
            } => walker.open(name, &attrs, self_closing),
            Token::Close(name) => walker.close(&name),
        }
    }
    walker.builder.finish()
}

struct Frame {
    name: String,
    href: Option<String>,
}

struct MarkupWalker<'t> {
    theme: &'t Theme,
    builder: LineBuilder,
    open: Vec<Frame>,
    lists: Vec<Option<u64>>,
    table_cell: Option<usize>,
    pre_depth: usize,
    pending_space: bool,
}

impl<'t> MarkupWalker<'t> {
    fn new(theme: &'t Theme, base: Style) -> Self {
        Self {
            theme,
            builder: LineBuilder::new(base),
            open: Vec::new(),
            lists: Vec::new(),
            table_cell: None,
            pre_depth: 0,
            pending_space: false,
        }
    }

    fn text(&mut self, text: &str) {
        if self.pre_depth > 0 {
            self.builder.push_text(text);
            return;
        }

        let mut collapsed = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch.is_ascii_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !(self.builder.line_is_empty() && collapsed.is_empty()) {
                collapsed.push(' ');
            }
            self.pending_space = false;
            collapsed.push(ch);
        }
        if !collapsed.is_empty() {
            self.builder.push_text(&collapsed);
        }
    }

    /// Writes decoration (bullets, separators, markers) that must not pick
    /// up a collapsed space before the next word.
    fn marker(&mut self, text: &str, style: Option<Style>) {
        match style {
            Some(style) => self.builder.push_styled(text, style),
            None => self.builder.push_text(text),
        }
        self.pending_space = false;
    }

    fn open(&mut self, name: String, attrs: &[(String, String)], self_closing: bool) {
        let theme = self.theme;
        let mut href = None;
        match name.as_str() {
            "b" | "strong" => self.builder.push_style(modifier(Modifier::BOLD)),
            "i" | "em" | "cite" | "var" => self.builder.push_style(modifier(Modifier::ITALIC)),
            "u" | "ins" => self.builder.push_style(modifier(Modifier::UNDERLINED)),
            "s" | "del" | "strike" => self.builder.push_style(modifier(Modifier::CROSSED_OUT)),
            "code" | "kbd" | "samp" | "tt" => self.builder.push_style(theme.code_style),
            "a" => {
                self.builder.push_style(theme.link_style);
                href = attribute(attrs, "href").map(str::to_string);
            }
            "p" | "div" => self.block_start(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.block_start();
                self.builder.push_style(theme.heading_style);
            }
            "blockquote" => {
                self.block_start();
                self.builder.push_prefix("│ ");
                self.builder.push_style(theme.quote_style);
            }
            "pre" => {
                self.block_start();
                self.builder.push_prefix("  ");
                self.builder.push_style(theme.code_style);
                self.pre_depth += 1;
            }
            "ul" | "ol" => {
                if self.lists.is_empty() {
                    self.block_start();
                } else {
                    self.builder.end_line();
                }
                let start = if name == "ol" {
                    Some(
                        attribute(attrs, "start")
                            .and_then(|value| value.trim().parse().ok())
                            .unwrap_or(1),
                    )
                } else {
                    None
                };
                self.lists.push(start);
            }
            "li" => {
                let bullet = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let bullet = format!("{number}. ");
                        *number += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.builder.start_item(bullet);
                self.pending_space = false;
            }
            "table" => {
                self.block_start();
                self.table_cell = Some(0);
            }
            "thead" => self.builder.push_style(modifier(Modifier::BOLD)),
            "tr" => {
                self.builder.end_line();
                self.table_cell = Some(0);
                self.pending_space = false;
            }
            "td" | "th" => {
                if let Some(index) = self.table_cell.as_mut() {
                    let first = *index == 0;
                    *index += 1;
                    if !first {
                        self.marker(" │ ", Some(theme.caption_style));
                    }
                }
                self.pending_space = false;
            }
            "br" => {
                self.builder.line_break();
                self.pending_space = false;
            }
            "hr" => self.builder.rule(),
            "img" => {
                let label = match attribute(attrs, "alt").filter(|alt| !alt.trim().is_empty()) {
                    Some(alt) => format!("[image: {}]", alt.trim()),
                    None => "[image]".to_string(),
                };
                self.separate_inline();
                self.marker(&label, Some(theme.caption_style));
            }
            "input" => {
                if attribute(attrs, "type").is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox")) {
                    let checked = attribute(attrs, "checked").is_some();
                    self.marker(if checked { "[x]" } else { "[ ]" }, None);
                    self.pending_space = true;
                }
            }
            _ => {}
        }

        if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
            self.open.push(Frame { name, href });
        }
    }

    fn close(&mut self, name: &str) {
        if !self.open.iter().any(|frame| frame.name == name) {
            return;
        }
        while let Some(frame) = self.open.pop() {
            let matched = frame.name == name;
            self.finish_frame(frame);
            if matched {
                break;
            }
        }
    }

    fn finish_frame(&mut self, frame: Frame) {
        match frame.name.as_str() {
            "b" | "strong" | "i" | "em" | "cite" | "var" | "u" | "ins" | "s" | "del" | "strike"
            | "code" | "kbd" | "samp" | "tt" => self.builder.pop_style(),
            "a" => {
                self.builder.pop_style();
                if let Some(href) = frame.href.filter(|href| !href.is_empty()) {
                    self.marker(&format!(" ({href})"), Some(self.theme.caption_style));
                }
            }
            "p" | "div" => self.block_end(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.builder.pop_style();
                self.block_end();
            }
            "blockquote" => {
                self.builder.pop_style();
                self.builder.pop_prefix();
                self.block_end();
            }
            "pre" => {
                self.builder.pop_style();
                self.builder.pop_prefix();
                self.pre_depth = self.pre_depth.saturating_sub(1);
                self.block_end();
            }
            "ul" | "ol" => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.block_end();
                } else {
                    self.builder.end_line();
                }
            }
            "li" => {
                self.builder.end_item();
                self.pending_space = false;
            }
            "table" => {
                self.table_cell = None;
                self.block_end();
            }
            "thead" => {
                self.builder.pop_style();
                self.builder.end_line();
            }
            "tr" => self.builder.end_line(),
            _ => {}
        }
    }

    fn block_start(&mut self) {
        self.builder.start_block();
        self.pending_space = false;
    }

    fn block_end(&mut self) {
        self.builder.end_block();
        self.pending_space = false;
    }

    fn separate_inline(&mut self) {
        if self.pending_space && !self.builder.line_is_empty() {
            self.builder.push_text(" ");
        }
        self.pending_space = false;
    }
}

fn modifier(modifier: Modifier) -> Style {
    Style::default().add_modifier(modifier)
}

fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = html;
    while !rest.is_empty() {
        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }
        if rest.starts_with('<') {
            match tag_end(rest) {
                Some(end) => {
                    if let Some(token) = parse_tag(&rest[1..end]) {
                        tokens.push(token);
                    }
                    rest = &rest[end + 1..];
                }
                None => {
                    tokens.push(Token::Text(rest));
                    rest = "";
                }
            }
            continue;
        }
        let next = rest.find('<').unwrap_or(rest.len());
        tokens.push(Token::Text(&rest[..next]));
        rest = &rest[next..];
    }
    tokens
}

/// Byte offset of the `>` closing the tag that starts `s`, ignoring any
/// inside quoted attribute values.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (index, byte) in s.bytes().enumerate().skip(1) {
        match quote {
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None => match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'>' => return Some(index),
                _ => {}
            },
        }
    }
    None
}

fn parse_tag(inner: &str) -> Option<Token<'static>> {
    let inner = inner.trim();
    if let Some(name) = inner.strip_prefix('/') {
        return Some(Token::Close(name.trim().to_ascii_lowercase()));
    }
    if inner.starts_with('!') || inner.starts_with('?') {
        return None;
    }

    let self_closing = inner.ends_with('/');
    let inner = inner.strip_suffix('/').unwrap_or(inner);
    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    Some(Token::Open {
        name,
        attrs: parse_attributes(&inner[name_end..]),
        self_closing,
    })
}

fn parse_attributes(mut s: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            break;
        }

        let name_end = s
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(s.len());
        let name = s[..name_end].to_ascii_lowercase();
        s = s[name_end..].trim_start();

        let mut value = String::new();
        if let Some(after_eq) = s.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (raw, remaining) = match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(quote) {
                        Some(end) => (&body[..end], &body[end + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            value = decode_entities(raw);
            s = remaining;
        }

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }
    attrs
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
