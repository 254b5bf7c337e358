use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Entries are never edited after creation; the
/// transcript only grows or is cleared as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

impl Sender {
    /// Caption shown above a bubble.
    pub fn display_name(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }

    pub fn is_bot(self) -> bool {
        self == Sender::Bot
    }
}

/// Local wall-clock time formatted the way bubble captions show it,
/// e.g. `3:07:42 PM`.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%-I:%M:%S %p").to_string()
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: format_timestamp(Local::now()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn is_user(&self) -> bool {
        self.sender.is_user()
    }

    pub fn is_bot(&self) -> bool {
        self.sender.is_bot()
    }

    /// `You • 3:07:42 PM`
    pub fn caption(&self) -> String {
        format!("{} • {}", self.sender.display_name(), self.timestamp)
    }
}
