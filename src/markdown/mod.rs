//! Markdown rendering module
//!
//! This module converts the restricted Markdown dialect used in chat
//! responses (bold, inline code, fenced code blocks, lists, paragraphs)
//! into safe HTML for the presentation layer.
//!
//! # Example
//! ```ignore
//! use crate::markdown::{render_markdown, MarkdownLite, RenderBlock};
//!
//! let html = render_markdown("**bold** and `code`");
//! assert_eq!(html, "<p><strong>bold</strong> and <code>code</code></p>");
//!
//! // Structured form for callers that post-process blocks
//! let blocks = MarkdownLite::new().render_blocks("* item");
//! ```

mod renderer;

pub use renderer::{render_markdown, MarkdownLite, RenderBlock};
