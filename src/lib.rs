//! Core logic for the EduHelp learning portal
//!
//! This crate holds the platform-independent heart of a bilingual school
//! resource portal: grade/subject navigation for the document library and
//! video sections, a global resource search, a lightweight Markdown renderer
//! for chat responses, chat session handling with attachments, translations,
//! and persisted user settings. All I/O except the settings file is injected
//! through traits so a presentation layer can supply its own backends.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod i18n;
pub mod markdown;
pub mod navigation;
pub mod resources;
pub mod state;

pub use error::{Error, Result};
pub use state::{Page, PortalState};
