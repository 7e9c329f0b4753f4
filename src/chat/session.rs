//! Chat session orchestration
//!
//! A session owns the conversation history and glues three collaborators
//! together: an authentication provider gating access, a streaming backend
//! producing response chunks, and the Markdown renderer turning accumulated
//! text into HTML after every chunk.
//!
//! The backend and auth provider are injected at construction, so sessions
//! are testable with scripted stand-ins.

use crate::auth::AuthProvider;
use crate::chat::{ChatHistory, ChatMessage, MessagePart};
use crate::config::PortalSettings;
use crate::error::{Error, Result};
use crate::markdown::MarkdownLite;
use base64::Engine;
use log::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Backend Seam
// ─────────────────────────────────────────────────────────────────────────────

/// Response chunks from the streaming backend.
///
/// Terminates normally at end of response; a mid-stream failure yields one
/// `Err` and the iterator should not be advanced further.
pub type ChatStream = Box<dyn Iterator<Item = Result<String>>>;

/// Streaming chat collaborator.
pub trait ChatBackend {
    /// Start a response stream for the new message `parts`, given the prior
    /// conversation `history` (which does not include the new message).
    fn send_message(&mut self, history: &[ChatMessage], parts: &[MessagePart])
        -> Result<ChatStream>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Attachments
// ─────────────────────────────────────────────────────────────────────────────

/// Attachment types the backend accepts.
pub const ALLOWED_ATTACHMENT_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/heic",
    "image/heif",
    "application/pdf",
];

/// A file attached to an outgoing message, held as raw bytes until encoding
/// at the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Check an attachment against the type allow-list and the configured size
/// cap before it is accepted into a message.
pub fn validate_attachment(attachment: &Attachment, settings: &PortalSettings) -> Result<()> {
    if !ALLOWED_ATTACHMENT_TYPES.contains(&attachment.mime_type.as_str()) {
        return Err(Error::AttachmentUnsupported {
            mime_type: attachment.mime_type.clone(),
        });
    }
    let limit_bytes = settings.max_attachment_mb * 1024 * 1024;
    let size_bytes = attachment.data.len() as u64;
    if size_bytes > limit_bytes {
        return Err(Error::AttachmentTooLarge {
            size_bytes,
            limit_bytes,
        });
    }
    Ok(())
}

fn encode_attachment(attachment: &Attachment) -> MessagePart {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&attachment.data);
    MessagePart::inline_data(&attachment.mime_type, &encoded)
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// One user's chat conversation.
pub struct ChatSession<B: ChatBackend, A: AuthProvider> {
    backend: B,
    auth: A,
    history: ChatHistory,
    renderer: MarkdownLite,
    settings: PortalSettings,
}

impl<B: ChatBackend, A: AuthProvider> ChatSession<B, A> {
    pub fn new(backend: B, auth: A, settings: &PortalSettings) -> Self {
        ChatSession {
            backend,
            auth,
            history: ChatHistory::new(settings.max_chat_history),
            renderer: MarkdownLite::new(),
            settings: settings.clone(),
        }
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Whether sends are currently permitted.
    pub fn can_send(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Send a message and stream the response.
    ///
    /// `on_update` receives the rendered HTML of the full accumulated
    /// response after every chunk; each call supersedes the previous one.
    /// Returns the final rendered HTML.
    ///
    /// An empty message with no attachment is ignored. If the backend fails
    /// before streaming starts, the history is left untouched; a mid-stream
    /// failure keeps the user turn and the partial response, and the caller
    /// decides what notice to show for the returned error.
    pub fn send(
        &mut self,
        text: &str,
        attachment: Option<Attachment>,
        on_update: &mut dyn FnMut(&str),
    ) -> Result<String> {
        if !self.auth.is_authenticated() {
            return Err(Error::ChatAccessDenied);
        }

        let text = text.trim();
        if text.is_empty() && attachment.is_none() {
            debug!("Ignoring empty chat message");
            return Ok(String::new());
        }

        let mut parts = Vec::new();
        if !text.is_empty() {
            parts.push(MessagePart::text(text));
        }
        if let Some(attachment) = &attachment {
            validate_attachment(attachment, &self.settings)?;
            parts.push(encode_attachment(attachment));
        }

        let stream = self.backend.send_message(self.history.prepared(), &parts)?;
        self.history.push(ChatMessage::user(parts));

        let mut accumulated = String::new();
        let mut rendered = String::new();
        for chunk in stream {
            match chunk {
                Ok(chunk) => {
                    accumulated.push_str(&chunk);
                    rendered = self.renderer.render(&accumulated);
                    on_update(&rendered);
                }
                Err(err) => {
                    warn!("Chat stream failed mid-response: {}", err);
                    self.history.push(ChatMessage::model(&accumulated));
                    return Err(err);
                }
            }
        }

        self.history.push(ChatMessage::model(&accumulated));
        Ok(rendered)
    }

    /// Drop the conversation, keeping the session usable.
    pub fn clear(&mut self) {
        debug!("Clearing chat history");
        self.history.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
