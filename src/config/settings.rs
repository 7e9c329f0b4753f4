//! User settings and preferences for the portal
//!
//! This module defines the `PortalSettings` struct that holds all
//! user-configurable options, with serde support for JSON persistence,
//! plus the grade-span grouping used by the presentation layer.

use crate::i18n::Language;
use crate::resources::Grade;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Grade Spans
// ─────────────────────────────────────────────────────────────────────────────

/// School-level grouping of grades, used to lay out subject grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradeSpan {
    /// Grades 1-5.
    Primary,
    /// Grades 6-9.
    JuniorSecondary,
    /// Grades 10-11 (O/L).
    SeniorSecondary,
    /// Grades 12-13 (A/L).
    Collegiate,
}

impl GradeSpan {
    /// The span a grade belongs to.
    pub fn of(grade: Grade) -> Self {
        match grade.value() {
            1..=5 => GradeSpan::Primary,
            6..=9 => GradeSpan::JuniorSecondary,
            10..=11 => GradeSpan::SeniorSecondary,
            _ => GradeSpan::Collegiate,
        }
    }

    /// Get the display label for the span.
    pub fn label(&self) -> &'static str {
        match self {
            GradeSpan::Primary => "Primary",
            GradeSpan::JuniorSecondary => "Junior Secondary",
            GradeSpan::SeniorSecondary => "Senior Secondary (O/L)",
            GradeSpan::Collegiate => "Collegiate (A/L)",
        }
    }

    /// Get all spans in ascending grade order.
    pub fn all() -> &'static [GradeSpan] {
        &[
            GradeSpan::Primary,
            GradeSpan::JuniorSecondary,
            GradeSpan::SeniorSecondary,
            GradeSpan::Collegiate,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config
/// directory. All fields have sensible defaults via the `Default` trait and
/// `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    /// UI language applied on startup
    pub language: Language,

    /// Number of chat exchanges (user + model pairs) retained in history
    pub max_chat_history: usize,

    /// Maximum chat attachment size in megabytes
    pub max_attachment_mb: u64,

    /// Debounce interval for free-text search inputs, in milliseconds
    pub search_debounce_ms: u64,

    /// Whether loaded translation files are kept in memory
    pub cache_translations: bool,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            max_chat_history: 16,
            max_attachment_mb: 10,
            search_debounce_ms: 300,
            cache_translations: true,
        }
    }
}

impl PortalSettings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum retained chat exchanges.
    pub const MIN_CHAT_HISTORY: usize = 1;
    /// Maximum retained chat exchanges.
    pub const MAX_CHAT_HISTORY: usize = 64;
    /// Minimum attachment size cap in megabytes.
    pub const MIN_ATTACHMENT_MB: u64 = 1;
    /// Maximum attachment size cap in megabytes.
    pub const MAX_ATTACHMENT_MB: u64 = 50;
    /// Maximum search debounce interval in milliseconds.
    pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 5000;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.max_chat_history = self
            .max_chat_history
            .clamp(Self::MIN_CHAT_HISTORY, Self::MAX_CHAT_HISTORY);

        self.max_attachment_mb = self
            .max_attachment_mb
            .clamp(Self::MIN_ATTACHMENT_MB, Self::MAX_ATTACHMENT_MB);

        if self.search_debounce_ms > Self::MAX_SEARCH_DEBOUNCE_MS {
            self.search_debounce_ms = Self::MAX_SEARCH_DEBOUNCE_MS;
        }
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(n: u8) -> Grade {
        Grade::new(n).unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = PortalSettings::default();

        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.max_chat_history, 16);
        assert_eq!(settings.max_attachment_mb, 10);
        assert_eq!(settings.search_debounce_ms, 300);
        assert!(settings.cache_translations);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = PortalSettings::default();
        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: PortalSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        // Minimal JSON - should fill in defaults
        let json = r#"{"language": "ta"}"#;
        let settings: PortalSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.language, Language::Ta);
        assert_eq!(settings.max_chat_history, 16);
        assert!(settings.cache_translations);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        // Empty JSON object - should use all defaults
        let json = "{}";
        let settings: PortalSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings, PortalSettings::default());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sanitization tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_sanitize_chat_history() {
        let mut settings = PortalSettings::default();
        settings.max_chat_history = 0;
        settings.sanitize();
        assert_eq!(settings.max_chat_history, PortalSettings::MIN_CHAT_HISTORY);

        settings.max_chat_history = 1000;
        settings.sanitize();
        assert_eq!(settings.max_chat_history, PortalSettings::MAX_CHAT_HISTORY);
    }

    #[test]
    fn test_sanitize_attachment_cap() {
        let mut settings = PortalSettings::default();
        settings.max_attachment_mb = 0;
        settings.sanitize();
        assert_eq!(settings.max_attachment_mb, PortalSettings::MIN_ATTACHMENT_MB);

        settings.max_attachment_mb = 500;
        settings.sanitize();
        assert_eq!(settings.max_attachment_mb, PortalSettings::MAX_ATTACHMENT_MB);
    }

    #[test]
    fn test_sanitize_debounce() {
        let mut settings = PortalSettings::default();
        settings.search_debounce_ms = 60_000;
        settings.sanitize();
        assert_eq!(
            settings.search_debounce_ms,
            PortalSettings::MAX_SEARCH_DEBOUNCE_MS
        );

        settings.search_debounce_ms = 0;
        settings.sanitize();
        assert_eq!(settings.search_debounce_ms, 0);
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = r#"{"max_chat_history": 0, "max_attachment_mb": 500}"#;
        let settings = PortalSettings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.max_chat_history, PortalSettings::MIN_CHAT_HISTORY);
        assert_eq!(settings.max_attachment_mb, PortalSettings::MAX_ATTACHMENT_MB);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grade span tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_grade_span_boundaries() {
        assert_eq!(GradeSpan::of(grade(1)), GradeSpan::Primary);
        assert_eq!(GradeSpan::of(grade(5)), GradeSpan::Primary);
        assert_eq!(GradeSpan::of(grade(6)), GradeSpan::JuniorSecondary);
        assert_eq!(GradeSpan::of(grade(9)), GradeSpan::JuniorSecondary);
        assert_eq!(GradeSpan::of(grade(10)), GradeSpan::SeniorSecondary);
        assert_eq!(GradeSpan::of(grade(11)), GradeSpan::SeniorSecondary);
        assert_eq!(GradeSpan::of(grade(12)), GradeSpan::Collegiate);
        assert_eq!(GradeSpan::of(grade(13)), GradeSpan::Collegiate);
    }

    #[test]
    fn test_grade_span_serialization() {
        assert_eq!(
            serde_json::to_string(&GradeSpan::JuniorSecondary).unwrap(),
            "\"juniorSecondary\""
        );
        assert_eq!(
            serde_json::from_str::<GradeSpan>("\"collegiate\"").unwrap(),
            GradeSpan::Collegiate
        );
    }

    #[test]
    fn test_grade_span_labels() {
        assert_eq!(GradeSpan::Primary.label(), "Primary");
        assert_eq!(GradeSpan::SeniorSecondary.label(), "Senior Secondary (O/L)");
        assert_eq!(GradeSpan::all().len(), 4);
    }
}
