//! Chat tutor module
//!
//! This module models the conversation with the AI tutor: the message and
//! history types shared with the streaming backend, attachment validation,
//! and the session loop that renders each streamed chunk to HTML.

mod history;
mod session;

pub use history::*;
pub use session::*;
