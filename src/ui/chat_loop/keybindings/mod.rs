//! Mode-aware keybinding system
//!
//! Keys are looked up in the [`KeyRegistry`] for the current UI mode. Bound
//! keys either change view state directly (mode, scroll, selection) or
//! dispatch an [`AppAction`] for the loop to apply; unbound keys edit the
//! active text field when the mode has one.

pub mod registry;

pub use registry::{default_registry, Binding, KeyContext, KeyRegistry, KeyResult};

use ratatui::crossterm::event::KeyEvent;
use tui_textarea::Input;

use crate::core::app::{App, AppAction, AppActionDispatcher, UiMode};

pub fn wrap_previous_index(current: usize, total: usize) -> Option<usize> {
    if total == 0 {
        None
    } else if current == 0 {
        Some(total - 1)
    } else {
        Some(current.min(total) - 1)
    }
}

pub fn wrap_next_index(current: usize, total: usize) -> Option<usize> {
    if total == 0 {
        None
    } else {
        Some((current + 1) % total)
    }
}

/// Handles one key press against `app`. `page` is the number of transcript
/// rows a PageUp/PageDown moves.
pub fn handle_key_event(
    app: &mut App,
    registry: &KeyRegistry,
    dispatcher: &AppActionDispatcher,
    key: &KeyEvent,
    page: u16,
) -> KeyResult {
    let context = KeyContext::from_ui_mode(&app.ui.mode);
    match registry.lookup(context, key) {
        Some(binding) => run_binding(app, dispatcher, binding, page),
        None if context.accepts_text() => {
            forward_to_text_field(app, context, key);
            KeyResult::Handled
        }
        None => KeyResult::NotHandled,
    }
}

/// Inserts pasted text into whichever field is active.
pub fn handle_paste(app: &mut App, text: &str) -> KeyResult {
    let cleaned: String = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "    ")
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect();
    match app.ui.mode {
        UiMode::Typing => app.ui.apply_textarea_edit(|ta| {
            ta.insert_str(&cleaned);
        }),
        UiMode::UploadPrompt => {
            let single_line = cleaned.replace('\n', "");
            app.ui.apply_path_edit(|input| {
                input.insert_str(&single_line);
            });
        }
        _ => return KeyResult::NotHandled,
    }
    KeyResult::Handled
}

fn forward_to_text_field(app: &mut App, context: KeyContext, key: &KeyEvent) {
    let input = Input::from(*key);
    match context {
        KeyContext::UploadPrompt => app.ui.apply_path_edit(|field| {
            field.input(input);
        }),
        _ => app.ui.apply_textarea_edit(|textarea| {
            textarea.input(input);
        }),
    }
}

fn run_binding(
    app: &mut App,
    dispatcher: &AppActionDispatcher,
    binding: Binding,
    page: u16,
) -> KeyResult {
    match binding {
        Binding::Quit => {
            app.ui.exit_requested = true;
            return KeyResult::Exit;
        }
        Binding::Cancel => match app.ui.mode {
            UiMode::UploadPrompt => app.ui.close_upload_prompt(),
            _ => app.ui.mode = UiMode::Typing,
        },
        Binding::Submit => {
            let text = app.ui.input_text();
            // Keys that arrive before the loop drains this submit belong to
            // the next message.
            if !text.trim().is_empty() && !app.is_bot_processing() {
                app.ui.clear_input();
            }
            dispatcher.dispatch(AppAction::SubmitMessage { text });
        }
        Binding::InsertNewline => app.ui.apply_textarea_edit(|textarea| {
            textarea.insert_newline();
        }),
        Binding::OpenUploadPrompt => app.ui.open_upload_prompt(),
        Binding::ConfirmUpload => dispatcher.dispatch(AppAction::UploadDocument {
            path: app.ui.path_text(),
        }),
        Binding::DeleteDocument => dispatcher.dispatch(AppAction::DeleteDocument),
        Binding::ClearChat => dispatcher.dispatch(AppAction::ClearChat),
        Binding::ToggleTheme => dispatcher.dispatch(AppAction::ToggleTheme),
        Binding::EnterHistorySelect => {
            let total = app.conversation.history().len();
            if total == 0 {
                return KeyResult::NotHandled;
            }
            app.ui.mode = UiMode::HistorySelect { index: total - 1 };
        }
        Binding::EnterMessageSelect => match app.conversation.last_bot_index() {
            Some(index) => app.ui.mode = UiMode::MessageSelect { index },
            None => return KeyResult::NotHandled,
        },
        Binding::SelectPrevious | Binding::SelectNext => {
            let forward = binding == Binding::SelectNext;
            move_selection(app, forward);
        }
        Binding::ReplayHistory => {
            if let UiMode::HistorySelect { index } = app.ui.mode {
                dispatcher.dispatch(AppAction::ReplayHistory { index });
            }
        }
        Binding::CopyMessage => {
            if let UiMode::MessageSelect { index } = app.ui.mode {
                dispatcher.dispatch(AppAction::CopyMessage { index });
            }
        }
        Binding::LikeMessage | Binding::DislikeMessage => {
            if let UiMode::MessageSelect { index } = app.ui.mode {
                dispatcher.dispatch(AppAction::RateMessage {
                    index,
                    liked: binding == Binding::LikeMessage,
                });
            }
        }
        Binding::ScrollUp => app.ui.scroll_up(page),
        Binding::ScrollDown => app.ui.scroll_down(page),
    }
    KeyResult::Handled
}

fn move_selection(app: &mut App, forward: bool) {
    match app.ui.mode {
        UiMode::HistorySelect { index } => {
            let total = app.conversation.history().len();
            let next = if forward {
                wrap_next_index(index, total)
            } else {
                wrap_previous_index(index, total)
            };
            if let Some(index) = next {
                app.ui.mode = UiMode::HistorySelect { index };
            }
        }
        UiMode::MessageSelect { index } => {
            if let Some(index) = app.conversation.neighbor_bot_index(index, forward) {
                app.ui.mode = UiMode::MessageSelect { index };
            }
        }
        _ => {}
    }
}
