//! Application state management for the portal
//!
//! This module defines the central `PortalState` struct tying the sections
//! together: persisted settings, the library and video navigation machines,
//! the translation catalog, and the current page. It also computes the
//! dynamic section titles from the current selections.

use crate::config::{load_config, save_config_silent, PortalSettings};
use crate::error::Result;
use crate::i18n::{Language, TranslationCatalog, Translations};
use crate::navigation::{LibraryNav, LibraryView, UnitId, VideoNav, VideoView};
use crate::resources::{Grade, ResourceType, SubjectId};
use log::{debug, info};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Pages
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level pages of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Library,
    Videos,
    Chat,
    About,
}

impl Page {
    /// Canonical page identifier, as used in navigation targets.
    pub fn id(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Library => "library",
            Page::Videos => "videos",
            Page::Chat => "chat",
            Page::About => "about",
        }
    }

    /// Translation key for the navigation label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Page::Home => "navHome",
            Page::Library => "navLibrary",
            Page::Videos => "navVideos",
            Page::Chat => "navChat",
            Page::About => "navAbout",
        }
    }

    /// Parse a page identifier, tolerating surrounding whitespace and case.
    pub fn parse(input: &str) -> Option<Page> {
        match input.trim().to_lowercase().as_str() {
            "home" => Some(Page::Home),
            "library" => Some(Page::Library),
            "videos" => Some(Page::Videos),
            "chat" => Some(Page::Chat),
            "about" => Some(Page::About),
            _ => None,
        }
    }

    /// All pages in navigation order.
    pub fn all() -> [Page; 5] {
        [Page::Home, Page::Library, Page::Videos, Page::Chat, Page::About]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Portal State
// ─────────────────────────────────────────────────────────────────────────────

/// Central portal state struct.
///
/// This struct holds all runtime state shared across sections:
/// - User settings (loaded from config)
/// - The library and video navigation machines
/// - Parsed translation tables
/// - The current page
///
/// # Example
///
/// ```ignore
/// let mut state = PortalState::new();
/// state.navigate_to(Page::Library);
/// ```
#[derive(Debug)]
pub struct PortalState {
    /// User settings (loaded from config)
    pub settings: PortalSettings,
    /// Library section navigation
    pub library: LibraryNav,
    /// Video section navigation
    pub videos: VideoNav,
    /// Parsed translation tables per language
    translations: TranslationCatalog,
    /// Currently shown page
    current_page: Page,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

impl PortalState {
    /// Create a new PortalState with settings loaded from config.
    pub fn new() -> Self {
        let settings = load_config();
        info!("Portal state initialized with settings");
        debug!(
            "Language: {}, cache translations: {}",
            settings.language, settings.cache_translations
        );
        Self::with_settings(settings)
    }

    /// Create PortalState with custom settings (useful for testing).
    pub fn with_settings(settings: PortalSettings) -> Self {
        let translations = TranslationCatalog::new(settings.cache_translations);
        Self {
            settings,
            library: LibraryNav::new(),
            videos: VideoNav::new(),
            translations,
            current_page: Page::default(),
            settings_dirty: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Page Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// The currently shown page.
    pub fn current_page(&self) -> Page {
        self.current_page
    }

    /// Switch to another page.
    ///
    /// Entering the library or videos section resets that section to its
    /// grade-selection root; the section keeps its drill-down state while
    /// another page is shown and only resets on re-entry.
    ///
    /// Returns `false` when the target is already the current page.
    pub fn navigate_to(&mut self, page: Page) -> bool {
        if page == self.current_page {
            debug!("Already on page '{}'", page);
            return false;
        }

        debug!("Navigating to page '{}'", page);
        self.current_page = page;

        match page {
            Page::Library => self.library.reset_section(),
            Page::Videos => self.videos.reset_section(),
            _ => {}
        }
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Language & Translations
    // ─────────────────────────────────────────────────────────────────────────

    /// The active UI language.
    pub fn language(&self) -> Language {
        self.settings.language
    }

    /// Switch the active UI language.
    ///
    /// Returns `false` when the language is already active. The caller is
    /// responsible for persisting settings afterwards.
    pub fn switch_language(&mut self, language: Language) -> bool {
        if language == self.settings.language {
            debug!("Language already '{}'", language);
            return false;
        }

        info!("Switching language to '{}'", language);
        self.settings.language = language;
        self.settings_dirty = true;
        true
    }

    /// Parse and store a translation table for a language.
    ///
    /// # Errors
    ///
    /// Returns `Error::TranslationParse` when the JSON is malformed.
    pub fn load_translations(&mut self, language: Language, json: &str) -> Result<()> {
        self.translations.load_json(language, json)
    }

    /// The translation table for the active language, if loaded.
    pub fn translations(&self) -> Option<&Translations> {
        self.translations.translations_for(self.settings.language)
    }

    /// The full per-language translation store.
    pub fn translation_catalog(&self) -> &TranslationCatalog {
        &self.translations
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut PortalSettings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Save settings to the config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty && save_config_silent(&self.settings) {
            self.settings_dirty = false;
            info!("Settings saved");
            return true;
        }
        false
    }

    /// Force save settings to the config file.
    pub fn save_settings(&mut self) -> bool {
        self.settings_dirty = true;
        self.save_settings_if_dirty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dynamic Section Titles
    // ─────────────────────────────────────────────────────────────────────────

    /// Title of the library section for its current view.
    ///
    /// Built from the current selections with translated names, e.g.
    /// "Grade 5 - Books - Select Subject". Search results replace the whole
    /// title with the translated `searchResultsTitle`.
    pub fn library_title(&self, translations: &Translations) -> String {
        if self.library.in_search_mode() {
            return translations.get_or_key("searchResultsTitle").to_string();
        }

        let grade = self
            .library
            .selected_grade()
            .map(|g| grade_text(translations, g))
            .unwrap_or_default();
        let kind = self
            .library
            .selected_resource_type()
            .map(|rt| type_text(translations, rt))
            .unwrap_or_default();

        match self.library.view() {
            LibraryView::GradeSelect => translations.get_or_key("selectGrade").to_string(),
            LibraryView::ResourceTypeSelect => format!(
                "{} {}",
                lookup(translations, "selectResourceType").unwrap_or("Select Type for"),
                grade
            ),
            LibraryView::SubjectSelect => format!(
                "{} - {} - {}",
                grade,
                kind,
                lookup(translations, "selectSubject").unwrap_or("Select Subject")
            ),
            LibraryView::List => {
                let mut parts = vec![grade];
                if !kind.is_empty() {
                    parts.push(kind);
                }
                // The "other" shelf is not subject-categorized, so its
                // sentinel subject never shows up in the title.
                if let Some(subject) = self.library.selected_subject() {
                    if self.library.selected_resource_type() != Some(ResourceType::Other) {
                        parts.push(subject_text(translations, subject));
                    }
                }
                parts.join(" - ")
            }
        }
    }

    /// Title of the videos section for its current view.
    pub fn videos_title(&self, translations: &Translations) -> String {
        let grade = self
            .videos
            .selected_grade()
            .map(|g| grade_text(translations, g))
            .unwrap_or_default();
        let subject = self
            .videos
            .selected_subject()
            .map(|s| subject_text(translations, s))
            .unwrap_or_default();

        match self.videos.view() {
            VideoView::GradeSelect => translations.get_or_key("selectGrade").to_string(),
            VideoView::SubjectSelect => format!(
                "{} - {}",
                grade,
                lookup(translations, "selectSubject").unwrap_or("Select Subject")
            ),
            VideoView::UnitSelect => format!(
                "{} - {} - {}",
                grade,
                subject,
                lookup(translations, "selectUnit").unwrap_or("Select Unit")
            ),
            VideoView::List => {
                let unit = self
                    .videos
                    .selected_unit()
                    .map(|u| unit_text(translations, u))
                    .unwrap_or_default();
                format!("{} - {} - {}", grade, subject, unit)
            }
        }
    }
}

impl Default for PortalState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Title Pieces
// ─────────────────────────────────────────────────────────────────────────────

/// A translation value, with blank entries counting as missing.
fn lookup<'a>(translations: &'a Translations, key: &str) -> Option<&'a str> {
    translations.get(key).filter(|value| !value.is_empty())
}

fn grade_text(translations: &Translations, grade: Grade) -> String {
    lookup(translations, &grade.translation_key())
        .map(str::to_string)
        .unwrap_or_else(|| grade.to_string())
}

fn subject_text(translations: &Translations, subject: &SubjectId) -> String {
    lookup(translations, &subject.translation_key())
        .map(str::to_string)
        .unwrap_or_else(|| subject.display_name())
}

fn type_text(translations: &Translations, resource_type: ResourceType) -> String {
    lookup(translations, resource_type.translation_key())
        .map(str::to_string)
        .unwrap_or_else(|| resource_type.label().to_string())
}

fn unit_text(translations: &Translations, unit: &UnitId) -> String {
    lookup(translations, unit.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| unit.display_name())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
