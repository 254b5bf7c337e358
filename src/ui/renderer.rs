use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::{history_label, App, NoticeKind, UiMode};
use crate::core::constants::{EMPTY_TRANSCRIPT_PLACEHOLDER, SIDEBAR_WIDTH};
use crate::ui::theme::Theme;
use crate::ui::transcript::build_transcript_lines;

/// The message box grows with its content up to this many rows.
const MAX_INPUT_ROWS: u16 = 6;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.ui.last_term_size = Size::new(area.width, area.height);

    // Paint the whole frame so the theme background shows behind every widget
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_color)),
        area,
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH.min(area.width / 2)),
            Constraint::Min(0),
        ])
        .split(area);
    draw_sidebar(f, app, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(input_rows(app) + 2), // +2 for borders
        ])
        .split(columns[1]);
    draw_transcript(f, app, rows[0]);
    draw_status_line(f, app, rows[1]);
    draw_input(f, app, rows[2]);
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.input_border_style)
        .style(Style::default().bg(theme.sidebar_background_color))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = sidebar_header_lines(app);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header.len() as u16),
            Constraint::Min(0),
        ])
        .split(inner);
    f.render_widget(Paragraph::new(header), parts[0]);
    draw_history(f, app, parts[1]);
}

fn sidebar_header_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = vec![
        Line::from(Span::styled("Edubridge", theme.title_style)),
        Line::default(),
        Line::from(Span::styled("DOCUMENTS", theme.section_heading_style)),
        shortcut_line(theme, "Ctrl+U", "Upload document", theme.sidebar_text_style),
    ];

    match &app.document {
        Some(document) => {
            lines.push(Line::from(vec![
                Span::styled(document.name.clone(), theme.sidebar_text_style),
                Span::styled(format!(" ({})", document.size_label()), theme.caption_style),
            ]));
            if app.is_deleting {
                lines.push(Line::from(Span::styled("Deleting...", theme.disabled_style)));
            } else {
                lines.push(shortcut_line(theme, "Ctrl+D", "Delete document", theme.danger_style));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No document uploaded",
            theme.disabled_style,
        ))),
    }

    let theme_label = if app.theme_mode.is_dark() {
        "Light mode"
    } else {
        "Dark mode"
    };
    lines.extend([
        Line::default(),
        Line::from(Span::styled("CHAT ACTIONS", theme.section_heading_style)),
        shortcut_line(theme, "Ctrl+L", "Clear chat", theme.sidebar_text_style),
        shortcut_line(theme, "Ctrl+T", theme_label, theme.sidebar_text_style),
        shortcut_line(theme, "Ctrl+B", "Select a reply", theme.sidebar_text_style),
        Line::default(),
        Line::from(Span::styled("CHAT HISTORY", theme.section_heading_style)),
    ]);
    lines
}

fn shortcut_line(theme: &Theme, keys: &str, label: &str, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{keys:<7} "), theme.caption_style),
        Span::styled(label.to_string(), style),
    ])
}

fn draw_history(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let history = app.conversation.history();
    if history.is_empty() {
        let empty = Paragraph::new(Span::styled("No prompts yet", theme.disabled_style));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .map(|entry| ListItem::new(history_label(entry)))
        .collect();
    let mut state = ListState::default();
    match app.ui.mode {
        UiMode::HistorySelect { index } => state.select(Some(index)),
        // Keep the newest prompts in view
        _ => *state.offset_mut() = history.len().saturating_sub(area.height as usize),
    }
    let list = List::new(items)
        .style(theme.sidebar_text_style)
        .highlight_style(theme.selection_style)
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_transcript(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().padding(Padding::new(1, 1, 1, 0));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if app.conversation.is_empty() && !app.is_bot_processing() {
        app.ui.scroll_to_bottom();
        let placeholder = Paragraph::new(Line::from(Span::styled(
            EMPTY_TRANSCRIPT_PLACEHOLDER,
            app.theme.placeholder_style,
        )))
        .alignment(Alignment::Center);
        let row = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        f.render_widget(placeholder, row);
        return;
    }

    let lines = build_transcript_lines(app, inner.width as usize);
    let top = clamp_scroll(app, lines.len(), inner.height);
    f.render_widget(Paragraph::new(lines).scroll((top, 0)), inner);
}

/// Clamps the stored scroll position to the content and returns the first
/// row to draw.
fn clamp_scroll(app: &mut App, total_rows: usize, height: u16) -> u16 {
    let max_from_bottom = total_rows
        .saturating_sub(height as usize)
        .min(u16::MAX as usize) as u16;
    app.ui.scroll_from_bottom = app.ui.scroll_from_bottom.min(max_from_bottom);
    max_from_bottom - app.ui.scroll_from_bottom
}

fn draw_status_line(f: &mut Frame, app: &mut App, area: Rect) {
    let hint = mode_hint(app.ui.mode);
    let theme = &app.theme;
    let line = match app.ui.visible_notice(Instant::now()) {
        Some(notice) => {
            let style = match notice.kind {
                NoticeKind::Info => theme.notice_style,
                NoticeKind::Error => theme.danger_style,
            };
            Line::from(Span::styled(format!(" {} ", notice.text), style))
        }
        None => Line::from(Span::styled(hint, theme.caption_style)),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn mode_hint(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Typing => "Enter send • Alt+Enter new line • Ctrl+P history • Ctrl+C quit",
        UiMode::HistorySelect { .. } => "↑/↓ choose • Enter reuse prompt • Esc back",
        UiMode::MessageSelect { .. } => "↑/↓ choose • c copy • l like • d dislike • Esc back",
        UiMode::UploadPrompt => "Enter upload • Esc cancel",
    }
}

fn input_rows(app: &App) -> u16 {
    match app.ui.mode {
        UiMode::UploadPrompt => 1,
        _ => (app.ui.textarea().lines().len() as u16).clamp(1, MAX_INPUT_ROWS),
    }
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let (title, field) = match app.ui.mode {
        UiMode::UploadPrompt => (" Path of the document to upload ", app.ui.path_input()),
        _ => (" Message ", app.ui.textarea()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(title);
    let inner = block.inner(area);

    let (row, col) = field.cursor();
    let lines = field.lines();
    let cursor_line = lines.get(row).map(String::as_str).unwrap_or("");
    let cursor_x = display_width_before(cursor_line, col);
    let cursor_y = row.min(u16::MAX as usize) as u16;

    // Scroll just enough to keep the cursor inside the box
    let scroll_y = cursor_y.saturating_sub(inner.height.saturating_sub(1));
    let scroll_x = cursor_x.saturating_sub(inner.width.saturating_sub(1));

    let text: Vec<Line> = lines.iter().map(|line| Line::from(line.as_str())).collect();
    let paragraph = Paragraph::new(text)
        .style(theme.input_text_style)
        .block(block)
        .scroll((scroll_y, scroll_x));
    f.render_widget(paragraph, area);

    let editing = matches!(app.ui.mode, UiMode::Typing | UiMode::UploadPrompt);
    if editing && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((
            inner.x + (cursor_x - scroll_x),
            inner.y + (cursor_y - scroll_y),
        ));
    }
}

fn display_width_before(line: &str, col: usize) -> u16 {
    let prefix: String = line.chars().take(col).collect();
    UnicodeWidthStr::width(prefix.as_str()).min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::DocumentHandle;
    use crate::utils::test_utils::create_test_app;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| ui(f, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_transcript_shows_placeholder() {
        let mut app = create_test_app();
        let screen = render(&mut app, 100, 24);
        assert!(screen.contains(EMPTY_TRANSCRIPT_PLACEHOLDER));
        assert!(screen.contains("No document uploaded"));
        assert!(screen.contains("No prompts yet"));
    }

    #[test]
    fn sidebar_lists_document_and_delete_state() {
        let mut app = create_test_app();
        app.document = Some(DocumentHandle::new("/tmp/biology.pdf", 2048));
        let screen = render(&mut app, 100, 24);
        assert!(screen.contains("biology.pdf (2.0 KB)"));
        assert!(screen.contains("Delete document"));

        app.is_deleting = true;
        let screen = render(&mut app, 100, 24);
        assert!(screen.contains("Deleting..."));
        assert!(!screen.contains("Delete document"));
    }

    #[test]
    fn history_entries_are_truncated_labels() {
        let mut app = create_test_app();
        app.conversation
            .push_user("Explain the causes of the French Revolution in detail".to_string());
        let screen = render(&mut app, 100, 24);
        assert!(screen.contains("Explain the causes of the Fren..."));
    }

    #[test]
    fn transcript_and_notice_are_drawn() {
        let mut app = create_test_app();
        app.conversation.push_user("What is osmosis?".to_string());
        app.conversation.push_bot("Movement of **water**.");
        app.ui.set_notice("Liked!", NoticeKind::Info);
        let screen = render(&mut app, 100, 24);
        assert!(screen.contains("What is osmosis?"));
        assert!(screen.contains("Movement of water."));
        assert!(screen.contains(" Liked! "));
        assert!(!screen.contains(EMPTY_TRANSCRIPT_PLACEHOLDER));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut app = create_test_app();
        for i in 0..20 {
            app.conversation.push_bot(format!("answer {i}"));
        }
        app.ui.scroll_up(u16::MAX);
        let screen = render(&mut app, 100, 20);
        assert!(app.ui.scroll_from_bottom < u16::MAX);
        assert!(screen.contains("answer 0"));
        assert!(!screen.contains("answer 19"));

        app.ui.scroll_to_bottom();
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains("answer 19"));
    }

    #[test]
    fn upload_prompt_replaces_the_message_box() {
        let mut app = create_test_app();
        app.ui.open_upload_prompt();
        let screen = render(&mut app, 100, 24);
        assert!(screen.contains("Path of the document to upload"));
        assert!(screen.contains("Enter upload • Esc cancel"));
    }

    #[test]
    fn records_terminal_size() {
        let mut app = create_test_app();
        render(&mut app, 90, 30);
        assert_eq!(app.ui.last_term_size, Size::new(90, 30));
    }
}
