//! Chat log with canned echo replies.

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    /// CSS class the web page styles message bubbles with
    pub fn css_class(self) -> &'static str {
        match self {
            ChatRole::User => "user-message",
            ChatRole::Bot => "bot-message",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Reply the bot gives to any input
pub fn echo_reply(text: &str) -> String {
    format!("I received: \"{text}\"")
}

/// Append-only message log
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `input` and append the user message followed by the bot echo.
    ///
    /// Returns the two appended messages, or `None` when the trimmed input is
    /// empty and nothing was appended.
    pub fn send(&mut self, input: &str) -> Option<&[ChatMessage]> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let start = self.messages.len();
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.to_string(),
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Bot,
            text: echo_reply(text),
        });
        tracing::debug!(messages = self.messages.len(), "chat message echoed");

        Some(&self.messages[start..])
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
