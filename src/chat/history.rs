//! Chat message model and bounded history
//!
//! Messages use the wire shape the streaming backend expects: a role plus a
//! list of parts, where a part is either text or base64 inline data. The
//! history is capped at two entries per configured exchange (one user turn,
//! one model turn), dropping the oldest entries first.

use log::warn;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Message Model
// ─────────────────────────────────────────────────────────────────────────────

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// Inline binary payload, base64-encoded for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// One part of a message: plain text or an inline attachment.
///
/// Serialized untagged so the JSON matches the backend contract:
/// `{"text": ...}` or `{"inlineData": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessagePart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl MessagePart {
    pub fn text(text: &str) -> Self {
        MessagePart::Text {
            text: text.to_string(),
        }
    }

    pub fn inline_data(mime_type: &str, data: &str) -> Self {
        MessagePart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            },
        }
    }

    /// The text content, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => Some(text),
            MessagePart::InlineData { .. } => None,
        }
    }
}

/// One turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    pub fn user(parts: Vec<MessagePart>) -> Self {
        ChatMessage {
            role: ChatRole::User,
            parts,
        }
    }

    /// A model turn holding a single text part.
    pub fn model(text: &str) -> Self {
        ChatMessage {
            role: ChatRole::Model,
            parts: vec![MessagePart::text(text)],
        }
    }

    /// The first text part, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(MessagePart::as_text)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

/// Bounded conversation history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    max_messages: usize,
}

impl ChatHistory {
    /// A history keeping at most `max_exchanges` user/model pairs.
    pub fn new(max_exchanges: usize) -> Self {
        ChatHistory {
            messages: Vec::new(),
            max_messages: max_exchanges.saturating_mul(2),
        }
    }

    /// Append a message, dropping the oldest entries beyond the cap.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    /// Remove and return the most recent message.
    pub fn pop(&mut self) -> Option<ChatMessage> {
        self.messages.pop()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
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

    /// The slice to hand to the backend.
    ///
    /// The backend contract requires a non-empty history to start with a
    /// user turn; leading model turns (left behind when the cap drops their
    /// user counterpart) are skipped.
    pub fn prepared(&self) -> &[ChatMessage] {
        if self.messages.is_empty() {
            return &[];
        }
        match self
            .messages
            .iter()
            .position(|message| message.role == ChatRole::User)
        {
            Some(0) => &self.messages,
            Some(first_user) => {
                warn!(
                    "Chat history does not start with a user turn, skipping {} leading entries",
                    first_user
                );
                &self.messages[first_user..]
            }
            None => {
                warn!("Chat history has no user turns, sending none");
                &[]
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn user_msg(text: &str) -> ChatMessage {
        ChatMessage::user(vec![MessagePart::text(text)])
    }

    #[test]
    fn test_message_wire_format() {
        let message = ChatMessage::user(vec![
            MessagePart::text("hi"),
            MessagePart::inline_data("image/png", "QUJD"),
        ]);
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(
            json,
            r#"{"role":"user","parts":[{"text":"hi"},{"inlineData":{"mimeType":"image/png","data":"QUJD"}}]}"#
        );

        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn test_first_text_skips_inline_data() {
        let message = ChatMessage::user(vec![
            MessagePart::inline_data("application/pdf", "QUJD"),
            MessagePart::text("see attached"),
        ]);
        assert_eq!(message.first_text(), Some("see attached"));

        let data_only = ChatMessage::user(vec![MessagePart::inline_data("image/png", "QUJD")]);
        assert_eq!(data_only.first_text(), None);
    }

    #[test]
    fn test_push_caps_history_dropping_oldest() {
        let mut history = ChatHistory::new(2);
        for i in 0..3 {
            history.push(user_msg(&format!("q{}", i)));
            history.push(ChatMessage::model(&format!("a{}", i)));
        }

        assert_eq!(history.len(), 4);
        assert_eq!(history.messages()[0].first_text(), Some("q1"));
        assert_eq!(history.messages()[3].first_text(), Some("a2"));
    }

    #[test]
    fn test_prepared_skips_leading_model_turns() {
        let mut history = ChatHistory::new(8);
        history.push(ChatMessage::model("orphaned answer"));
        history.push(user_msg("question"));
        history.push(ChatMessage::model("answer"));

        let prepared = history.prepared();
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].role, ChatRole::User);
    }

    #[test]
    fn test_prepared_empty_when_no_user_turns() {
        let mut history = ChatHistory::new(8);
        assert!(history.prepared().is_empty());

        history.push(ChatMessage::model("stray"));
        assert!(history.prepared().is_empty());
    }

    #[test]
    fn test_pop_and_clear() {
        let mut history = ChatHistory::new(8);
        history.push(user_msg("q"));
        history.push(ChatMessage::model("a"));

        let last = history.pop();
        assert_eq!(last.and_then(|m| m.first_text().map(String::from)), Some("a".to_string()));
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
    }
}
