//! Languages and translation tables
//!
//! The portal ships bilingual (English and Tamil). This module holds the
//! `Language` enum, the per-language key/value `Translations` table, and a
//! `TranslationCatalog` that optionally caches parsed tables so switching
//! back to a language does not require re-supplying its JSON. The catalog
//! never fetches anything itself; callers hand it raw JSON strings.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────────────────────────────────────

/// A UI language supported by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ta,
}

impl Language {
    /// ISO 639-1 code used in config files and translation file names.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }

    /// Native-script label shown on the language switcher.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ta => "தமிழ்",
        }
    }

    /// Parse a language code, tolerating surrounding whitespace and case.
    ///
    /// Returns `None` for anything other than the supported codes.
    pub fn parse(code: &str) -> Option<Language> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Language::En),
            "ta" => Some(Language::Ta),
            _ => None,
        }
    }

    /// All supported languages, in switcher order.
    pub fn all() -> [Language; 2] {
        [Language::En, Language::Ta]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Translations
// ─────────────────────────────────────────────────────────────────────────────

/// A key → string table for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    /// Parse a translation table from a JSON object of string values.
    ///
    /// # Errors
    ///
    /// Returns `Error::TranslationParse` when the input is not a JSON object
    /// mapping keys to strings.
    pub fn from_json(language: Language, json: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| Error::TranslationParse {
                language: language.code().to_string(),
                source: Box::new(e),
            })?;
        Ok(Self { entries })
    }

    /// Look up a translation by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a translation, falling back to the key itself.
    ///
    /// An empty value counts as missing so a blank entry never blanks out
    /// UI text.
    pub fn get_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        match self.entries.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => key,
        }
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TranslationCatalog
// ─────────────────────────────────────────────────────────────────────────────

/// Per-language store of parsed translation tables.
///
/// With caching enabled every loaded language stays resident, so switching
/// back is free. With caching disabled only the most recently loaded
/// language is kept and callers must supply the JSON again on each switch.
#[derive(Debug)]
pub struct TranslationCatalog {
    cache_enabled: bool,
    tables: HashMap<Language, Translations>,
}

impl TranslationCatalog {
    /// Create an empty catalog.
    pub fn new(cache_enabled: bool) -> Self {
        Self {
            cache_enabled,
            tables: HashMap::new(),
        }
    }

    /// Whether previously loaded languages stay resident.
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Returns `true` if a table for the language is currently stored.
    pub fn contains(&self, language: Language) -> bool {
        self.tables.contains_key(&language)
    }

    /// Parse and store a translation table from JSON.
    ///
    /// When caching is enabled and the language is already stored, the input
    /// is not parsed again and the stored table is kept as-is.
    ///
    /// # Errors
    ///
    /// Returns `Error::TranslationParse` when the JSON is malformed.
    pub fn load_json(&mut self, language: Language, json: &str) -> Result<()> {
        if self.cache_enabled && self.contains(language) {
            debug!("Translations for '{}' already cached", language);
            return Ok(());
        }

        let table = Translations::from_json(language, json)?;
        self.insert(language, table);
        Ok(())
    }

    /// Store an already-parsed table for a language.
    pub fn insert(&mut self, language: Language, translations: Translations) {
        if !self.cache_enabled {
            self.tables.clear();
        }
        debug!(
            "Stored {} translation entries for '{}'",
            translations.len(),
            language
        );
        self.tables.insert(language, translations);
    }

    /// The stored table for a language, if any.
    pub fn translations_for(&self, language: Language) -> Option<&Translations> {
        self.tables.get(&language)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Language tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_language_codes_and_labels() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::Ta.code(), "ta");
        assert_eq!(Language::En.label(), "English");
        assert_eq!(Language::Ta.label(), "தமிழ்");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("TA"), Some(Language::Ta));
        assert_eq!(Language::parse("  ta  "), Some(Language::Ta));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse(""), None);
    }

    #[test]
    fn test_language_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Ta).unwrap(), "\"ta\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }

    #[test]
    fn test_language_display_is_code() {
        assert_eq!(format!("{}", Language::Ta), "ta");
    }

    #[test]
    fn test_language_all_lists_both() {
        assert_eq!(Language::all(), [Language::En, Language::Ta]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Translations tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_from_json_valid() {
        let json = r#"{"selectSubject": "Select Subject", "grade5": "Grade 5"}"#;
        let table = Translations::from_json(Language::En, json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("selectSubject"), Some("Select Subject"));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn test_from_json_malformed_reports_language() {
        let result = Translations::from_json(Language::Ta, "{ not json");
        match result {
            Err(Error::TranslationParse { language, .. }) => assert_eq!(language, "ta"),
            other => panic!("Expected TranslationParse, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Translations::from_json(Language::En, "[1, 2, 3]").is_err());
        assert!(Translations::from_json(Language::En, "\"hello\"").is_err());
    }

    #[test]
    fn test_empty_object_is_valid_and_empty() {
        let table = Translations::from_json(Language::En, "{}").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_get_or_key_falls_back_to_key() {
        let table = Translations::from_json(Language::En, r#"{"known": "Known"}"#).unwrap();
        assert_eq!(table.get_or_key("known"), "Known");
        assert_eq!(table.get_or_key("unknownKey"), "unknownKey");
    }

    #[test]
    fn test_get_or_key_empty_value_falls_back() {
        let table = Translations::from_json(Language::En, r#"{"blank": ""}"#).unwrap();
        assert_eq!(table.get_or_key("blank"), "blank");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // TranslationCatalog tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_catalog_caches_tables() {
        let mut catalog = TranslationCatalog::new(true);
        catalog
            .load_json(Language::En, r#"{"hello": "Hello"}"#)
            .unwrap();
        catalog
            .load_json(Language::Ta, r#"{"hello": "வணக்கம்"}"#)
            .unwrap();

        assert!(catalog.contains(Language::En));
        assert!(catalog.contains(Language::Ta));
        assert_eq!(
            catalog
                .translations_for(Language::Ta)
                .unwrap()
                .get("hello"),
            Some("வணக்கம்")
        );
    }

    #[test]
    fn test_catalog_without_cache_keeps_only_latest() {
        let mut catalog = TranslationCatalog::new(false);
        catalog
            .load_json(Language::En, r#"{"hello": "Hello"}"#)
            .unwrap();
        catalog
            .load_json(Language::Ta, r#"{"hello": "வணக்கம்"}"#)
            .unwrap();

        assert!(!catalog.contains(Language::En));
        assert!(catalog.contains(Language::Ta));
    }

    #[test]
    fn test_load_json_skips_parse_when_cached() {
        let mut catalog = TranslationCatalog::new(true);
        catalog
            .load_json(Language::En, r#"{"hello": "Hello"}"#)
            .unwrap();

        // Already cached, so even malformed input is fine and the stored
        // table is untouched.
        assert!(catalog.load_json(Language::En, "{ broken").is_ok());
        assert_eq!(
            catalog
                .translations_for(Language::En)
                .unwrap()
                .get("hello"),
            Some("Hello")
        );
    }

    #[test]
    fn test_load_json_reparses_when_cache_disabled() {
        let mut catalog = TranslationCatalog::new(false);
        catalog
            .load_json(Language::En, r#"{"hello": "Hello"}"#)
            .unwrap();

        assert!(catalog.load_json(Language::En, "{ broken").is_err());
    }

    #[test]
    fn test_missing_language_yields_none() {
        let catalog = TranslationCatalog::new(true);
        assert!(catalog.translations_for(Language::Ta).is_none());
    }
}
