//! Mode-aware keybinding registry
//!
//! Maps a key pattern to a [`Binding`] separately for every UI mode, so the
//! same key can mean different things while typing and while selecting.

use std::collections::HashMap;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::UiMode;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled; redraw and keep going
    Handled,
    /// Key asked the loop to exit
    Exit,
    /// No binding and no text input consumed the key
    NotHandled,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPattern {
    pub fn simple(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        self == &KeyPattern::from(key)
    }
}

impl From<&KeyEvent> for KeyPattern {
    fn from(key: &KeyEvent) -> Self {
        // Terminals disagree on whether uppercase letters carry SHIFT.
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        Self {
            code: key.code,
            modifiers,
        }
    }
}

/// Context for mode-aware key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Typing,
    HistorySelect,
    MessageSelect,
    UploadPrompt,
}

impl KeyContext {
    pub fn from_ui_mode(mode: &UiMode) -> Self {
        match mode {
            UiMode::Typing => KeyContext::Typing,
            UiMode::HistorySelect { .. } => KeyContext::HistorySelect,
            UiMode::MessageSelect { .. } => KeyContext::MessageSelect,
            UiMode::UploadPrompt => KeyContext::UploadPrompt,
        }
    }

    /// Contexts where unbound keys edit a text field.
    pub fn accepts_text(self) -> bool {
        matches!(self, KeyContext::Typing | KeyContext::UploadPrompt)
    }
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Quit,
    Cancel,
    Submit,
    InsertNewline,
    OpenUploadPrompt,
    ConfirmUpload,
    DeleteDocument,
    ClearChat,
    ToggleTheme,
    EnterHistorySelect,
    EnterMessageSelect,
    SelectPrevious,
    SelectNext,
    ReplayHistory,
    CopyMessage,
    LikeMessage,
    DislikeMessage,
    ScrollUp,
    ScrollDown,
}

/// Mode-aware keybinding registry
#[derive(Debug, Default)]
pub struct KeyRegistry {
    bindings: HashMap<KeyContext, HashMap<KeyPattern, Binding>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_for_context(
        mut self,
        context: KeyContext,
        pattern: KeyPattern,
        binding: Binding,
    ) -> Self {
        self.bindings
            .entry(context)
            .or_default()
            .insert(pattern, binding);
        self
    }

    /// Registers the same binding in several contexts.
    pub fn register_for_contexts(
        self,
        contexts: &[KeyContext],
        pattern: KeyPattern,
        binding: Binding,
    ) -> Self {
        contexts.iter().fold(self, |registry, context| {
            registry.register_for_context(*context, pattern.clone(), binding)
        })
    }

    pub fn lookup(&self, context: KeyContext, key: &KeyEvent) -> Option<Binding> {
        self.bindings
            .get(&context)
            .and_then(|bindings| bindings.get(&KeyPattern::from(key)))
            .copied()
    }
}

/// The bindings the chat screen ships with.
pub fn default_registry() -> KeyRegistry {
    use KeyContext::*;

    const ALL: [KeyContext; 4] = [Typing, HistorySelect, MessageSelect, UploadPrompt];
    const SELECTING: [KeyContext; 2] = [HistorySelect, MessageSelect];

    KeyRegistry::new()
        .register_for_contexts(&ALL, KeyPattern::ctrl(KeyCode::Char('c')), Binding::Quit)
        // Typing
        .register_for_context(Typing, KeyPattern::simple(KeyCode::Enter), Binding::Submit)
        .register_for_context(
            Typing,
            KeyPattern::with_modifiers(KeyCode::Enter, KeyModifiers::ALT),
            Binding::InsertNewline,
        )
        .register_for_context(
            Typing,
            KeyPattern::with_modifiers(KeyCode::Enter, KeyModifiers::SHIFT),
            Binding::InsertNewline,
        )
        .register_for_context(
            Typing,
            KeyPattern::ctrl(KeyCode::Char('j')),
            Binding::InsertNewline,
        )
        .register_for_context(
            Typing,
            KeyPattern::ctrl(KeyCode::Char('u')),
            Binding::OpenUploadPrompt,
        )
        .register_for_context(
            Typing,
            KeyPattern::ctrl(KeyCode::Char('d')),
            Binding::DeleteDocument,
        )
        .register_for_context(Typing, KeyPattern::ctrl(KeyCode::Char('l')), Binding::ClearChat)
        .register_for_context(
            Typing,
            KeyPattern::ctrl(KeyCode::Char('t')),
            Binding::ToggleTheme,
        )
        .register_for_context(
            Typing,
            KeyPattern::ctrl(KeyCode::Char('p')),
            Binding::EnterHistorySelect,
        )
        .register_for_context(
            Typing,
            KeyPattern::ctrl(KeyCode::Char('b')),
            Binding::EnterMessageSelect,
        )
        .register_for_contexts(
            &[Typing, HistorySelect, MessageSelect],
            KeyPattern::simple(KeyCode::PageUp),
            Binding::ScrollUp,
        )
        .register_for_contexts(
            &[Typing, HistorySelect, MessageSelect],
            KeyPattern::simple(KeyCode::PageDown),
            Binding::ScrollDown,
        )
        // Selection modes
        .register_for_contexts(&SELECTING, KeyPattern::simple(KeyCode::Esc), Binding::Cancel)
        .register_for_contexts(&SELECTING, KeyPattern::simple(KeyCode::Up), Binding::SelectPrevious)
        .register_for_contexts(
            &SELECTING,
            KeyPattern::simple(KeyCode::Char('k')),
            Binding::SelectPrevious,
        )
        .register_for_contexts(&SELECTING, KeyPattern::simple(KeyCode::Down), Binding::SelectNext)
        .register_for_contexts(
            &SELECTING,
            KeyPattern::simple(KeyCode::Char('j')),
            Binding::SelectNext,
        )
        .register_for_context(
            HistorySelect,
            KeyPattern::simple(KeyCode::Enter),
            Binding::ReplayHistory,
        )
        .register_for_context(
            MessageSelect,
            KeyPattern::simple(KeyCode::Char('c')),
            Binding::CopyMessage,
        )
        .register_for_context(
            MessageSelect,
            KeyPattern::simple(KeyCode::Char('y')),
            Binding::CopyMessage,
        )
        .register_for_context(
            MessageSelect,
            KeyPattern::simple(KeyCode::Char('l')),
            Binding::LikeMessage,
        )
        .register_for_context(
            MessageSelect,
            KeyPattern::simple(KeyCode::Char('d')),
            Binding::DislikeMessage,
        )
        // Upload prompt
        .register_for_context(UploadPrompt, KeyPattern::simple(KeyCode::Esc), Binding::Cancel)
        .register_for_context(
            UploadPrompt,
            KeyPattern::simple(KeyCode::Enter),
            Binding::ConfirmUpload,
        )
}
