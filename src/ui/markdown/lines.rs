use ratatui::style::Style;
use ratatui::text::{Line, Span};

const RULE_WIDTH: usize = 24;

/// Accumulates styled spans into terminal lines for the markup walker.
/// Block elements are separated by a single blank line;
/// nested quotes and list items contribute a prefix to every line they own.
pub(super) struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    prefix_stack: Vec<String>,
    pending_bullet: Option<String>,
    needs_blank: bool,
}

impl LineBuilder {
    pub(super) fn new(base: Style) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            style_stack: vec![base],
            prefix_stack: Vec::new(),
            pending_bullet: None,
            needs_blank: false,
        }
    }

    pub(super) fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    /// Layers `style` on top of the active style until the matching pop.
    pub(super) fn push_style(&mut self, style: Style) {
        let next = self.current_style().patch(style);
        self.style_stack.push(next);
    }

    pub(super) fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    pub(super) fn line_is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Appends text in the active style; embedded newlines end lines.
    pub(super) fn push_text(&mut self, text: &str) {
        let style = self.current_style();
        self.push_styled(text, style);
    }

    pub(super) fn push_styled(&mut self, text: &str, style: Style) {
        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                self.current
                    .push(Span::styled(detab(segment), style));
            }
            if segments.peek().is_some() {
                self.line_break();
            }
        }
    }

    pub(super) fn line_break(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.emit(spans);
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.line_break();
        }
    }

    fn emit(&mut self, spans: Vec<Span<'static>>) {
        let mut lead = String::new();
        match self.pending_bullet.take() {
            Some(bullet) => {
                let outer = self.prefix_stack.len().saturating_sub(1);
                for prefix in &self.prefix_stack[..outer] {
                    lead.push_str(prefix);
                }
                lead.push_str(&bullet);
            }
            None => {
                for prefix in &self.prefix_stack {
                    lead.push_str(prefix);
                }
            }
        }

        let mut line_spans = Vec::with_capacity(spans.len() + 1);
        if !lead.is_empty() {
            line_spans.push(Span::styled(lead, self.style_stack[0]));
        }
        line_spans.extend(spans);
        self.lines.push(Line::from(line_spans));
    }

    pub(super) fn start_block(&mut self) {
        self.flush();
        if self.needs_blank && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.needs_blank = false;
    }

    pub(super) fn end_block(&mut self) {
        self.flush();
        self.needs_blank = true;
    }

    /// Ends the current line without asking for a blank separator.
    pub(super) fn end_line(&mut self) {
        self.flush();
    }

    pub(super) fn push_prefix(&mut self, prefix: impl Into<String>) {
        self.flush();
        self.prefix_stack.push(prefix.into());
    }

    pub(super) fn pop_prefix(&mut self) {
        self.flush();
        self.prefix_stack.pop();
    }

    /// Starts a list item: `bullet` replaces the item's indentation on its
    /// first line only.
    pub(super) fn start_item(&mut self, bullet: String) {
        self.flush();
        self.prefix_stack.push(" ".repeat(bullet.chars().count()));
        self.pending_bullet = Some(bullet);
    }

    pub(super) fn end_item(&mut self) {
        self.flush();
        // An empty item still shows its bullet.
        if self.pending_bullet.is_some() {
            self.emit(Vec::new());
        }
        self.prefix_stack.pop();
    }

    pub(super) fn rule(&mut self) {
        self.start_block();
        let style = self.current_style();
        self.current.push(Span::styled("─".repeat(RULE_WIDTH), style));
        self.end_block();
    }

    pub(super) fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self
            .lines
            .last()
            .is_some_and(|line| line.spans.iter().all(|span| span.content.trim().is_empty()))
        {
            self.lines.pop();
        }
        self.lines
    }
}

fn detab(s: &str) -> String {
    s.replace('\t', "    ")
}
