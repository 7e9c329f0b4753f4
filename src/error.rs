//! Centralized error handling for the portal core
//!
//! This module provides a unified error type that covers all error scenarios
//! in the library: settings persistence, collaborator failures (resource
//! lookup, chat backend, authentication), attachment validation, and
//! translation catalogs.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the portal core.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the portal core.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Collaborator Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The resource-lookup collaborator failed to deliver results
    ResourceLookup { message: String },

    /// The streaming chat collaborator reported a failure
    ChatBackend { message: String },

    /// A chat send was attempted without an authenticated user
    ChatAccessDenied,

    // ─────────────────────────────────────────────────────────────────────────
    // Attachment Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Chat attachment exceeds the configured size limit
    AttachmentTooLarge { size_bytes: u64, limit_bytes: u64 },

    /// Chat attachment has a mime type outside the allow-list
    AttachmentUnsupported { mime_type: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Translation Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to parse a translation catalog for a language
    TranslationParse {
        language: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// Implement From traits for convenient error conversion
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // File I/O Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }

            // Collaborator Errors
            Error::ResourceLookup { message } => {
                write!(f, "Resource lookup failed: {}", message)
            }
            Error::ChatBackend { message } => {
                write!(f, "Chat backend error: {}", message)
            }
            Error::ChatAccessDenied => {
                write!(f, "Chat access denied: sign-in required")
            }

            // Attachment Errors
            Error::AttachmentTooLarge {
                size_bytes,
                limit_bytes,
            } => {
                write!(
                    f,
                    "Attachment too large: {} bytes (limit {} bytes)",
                    size_bytes, limit_bytes
                )
            }
            Error::AttachmentUnsupported { mime_type } => {
                write!(f, "Unsupported attachment type: {}", mime_type)
            }

            // Translation Errors
            Error::TranslationParse { language, source } => {
                write!(
                    f,
                    "Failed to parse translations for '{}': {}",
                    language, source
                )
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::TranslationParse { source, .. } => Some(source.as_ref()),
            Error::ConfigDirNotFound
            | Error::ResourceLookup { .. }
            | Error::ChatBackend { .. }
            | Error::ChatAccessDenied
            | Error::AttachmentTooLarge { .. }
            | Error::AttachmentUnsupported { .. } => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
