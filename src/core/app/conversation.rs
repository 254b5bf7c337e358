use crate::core::constants::HISTORY_LABEL_MAX_CHARS;
use crate::core::message::Message;

/// The transcript and the prompt history that mirrors its user turns.
///
/// Both are append-only and are only ever cleared together.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    history: Vec<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn history_entry(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(String::as_str)
    }

    /// Records a submitted prompt: one transcript entry and one history entry.
    pub fn push_user(&mut self, text: String) {
        self.history.push(text.clone());
        self.messages.push(Message::user(text));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(Message::bot(text));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.history.clear();
    }

    /// Index of the newest bot message, used as the default selection.
    pub fn last_bot_index(&self) -> Option<usize> {
        self.messages.iter().rposition(Message::is_bot)
    }

    /// Bot message indices before/after `from`, wrapping at the ends.
    pub fn neighbor_bot_index(&self, from: usize, forward: bool) -> Option<usize> {
        let bots: Vec<usize> = self
            .messages
            .iter()
            .enumerate()
            .filter(|(_, message)| message.is_bot())
            .map(|(index, _)| index)
            .collect();
        if bots.is_empty() {
            return None;
        }
        let position = bots.iter().position(|&index| index == from);
        let next = match (position, forward) {
            (Some(pos), true) => (pos + 1) % bots.len(),
            (Some(pos), false) => (pos + bots.len() - 1) % bots.len(),
            (None, true) => 0,
            (None, false) => bots.len() - 1,
        };
        Some(bots[next])
    }
}

/// Sidebar label for a history entry: the first characters of the prompt,
/// with `...` appended when it had to be cut.
pub fn history_label(entry: &str) -> String {
    let single_line = entry.replace(['\n', '\r'], " ");
    let mut chars = single_line.chars();
    let head: String = chars.by_ref().take(HISTORY_LABEL_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turns_feed_history() {
        let mut conversation = Conversation::new();
        conversation.push_user("What is a cell?".to_string());
        conversation.push_bot("The basic unit of life.");
        conversation.push_user("What is a cell?".to_string());

        assert_eq!(conversation.len(), 3);
        assert_eq!(
            conversation.history(),
            &["What is a cell?".to_string(), "What is a cell?".to_string()]
        );
        assert!(conversation.message(0).is_some_and(Message::is_user));
        assert!(conversation.message(1).is_some_and(Message::is_bot));
    }

    #[test]
    fn clear_empties_both_sequences() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi".to_string());
        conversation.push_bot("hello");
        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.history().is_empty());
    }

    #[test]
    fn history_labels_truncate_long_prompts() {
        assert_eq!(history_label("short question"), "short question");
        let exact = "a".repeat(HISTORY_LABEL_MAX_CHARS);
        assert_eq!(history_label(&exact), exact);
        let long = "Explain the causes of the French Revolution in detail";
        assert_eq!(history_label(long), "Explain the causes of the Fren...");
        assert_eq!(history_label("two\nlines"), "two lines");
    }

    #[test]
    fn bot_navigation_wraps() {
        let mut conversation = Conversation::new();
        conversation.push_user("q1".to_string());
        conversation.push_bot("a1");
        conversation.push_user("q2".to_string());
        conversation.push_bot("a2");

        assert_eq!(conversation.last_bot_index(), Some(3));
        assert_eq!(conversation.neighbor_bot_index(3, true), Some(1));
        assert_eq!(conversation.neighbor_bot_index(3, false), Some(1));
        assert_eq!(conversation.neighbor_bot_index(1, true), Some(3));
        assert_eq!(Conversation::new().neighbor_bot_index(0, true), None);
    }
}
