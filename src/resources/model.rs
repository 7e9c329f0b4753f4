//! Typed vocabulary for library and video resources
//!
//! The raw records delivered by the resource backend are loosely typed
//! (string grades, free-form category names, year-as-string). This module
//! defines the strict types the rest of the crate works with, plus the
//! normalization from raw records into them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Grade
// ─────────────────────────────────────────────────────────────────────────────

/// A school-year identifier, valid from 1 through 13.
///
/// Serialized as a bare number; deserialization rejects out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    /// Lowest valid grade.
    pub const MIN: u8 = 1;
    /// Highest valid grade.
    pub const MAX: u8 = 13;

    /// Create a grade, returning `None` when out of range.
    pub fn new(value: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Grade(value))
        } else {
            None
        }
    }

    /// The numeric value (1..=13).
    pub fn value(self) -> u8 {
        self.0
    }

    /// Iterate over every grade in ascending order.
    pub fn all() -> impl Iterator<Item = Grade> {
        (Self::MIN..=Self::MAX).map(Grade)
    }

    /// Parse a grade from user/backend text.
    ///
    /// Accepts bare numbers (`"5"`) and folder-style names (`"grade5"`,
    /// `"Grade 13"`). Anything else, including the `"all"` placeholder the
    /// backend uses for ungraded material, yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();
        let digits = lowered.strip_prefix("grade").map_or(lowered.as_str(), |rest| rest.trim());
        digits.parse::<u8>().ok().and_then(Grade::new)
    }

    /// Translation key for this grade (`grade1` .. `grade13`).
    pub fn translation_key(self) -> String {
        format!("grade{}", self.0)
    }
}

impl TryFrom<u8> for Grade {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Grade::new(value).ok_or_else(|| format!("grade out of range: {}", value))
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> u8 {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade {}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource Type
// ─────────────────────────────────────────────────────────────────────────────

/// Category of library material.
///
/// The backend folder structure uses `textbooks` / `past-papers` / `others`;
/// the portal works with the canonical short forms. Unrecognized categories
/// normalize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Books,
    Papers,
    #[default]
    Other,
}

impl ResourceType {
    /// Get a display label for the type.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Books => "Books",
            ResourceType::Papers => "Past Papers",
            ResourceType::Other => "Other",
        }
    }

    /// Translation key for the type label.
    pub fn translation_key(&self) -> &'static str {
        match self {
            ResourceType::Books => "resourceBooks",
            ResourceType::Papers => "resourcePapers",
            ResourceType::Other => "resourceOther",
        }
    }

    /// Parse a type from canonical or backend folder spellings.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "books" | "textbooks" | "textbook" => ResourceType::Books,
            "papers" | "past-papers" | "pastpapers" | "past papers" => ResourceType::Papers,
            _ => ResourceType::Other,
        }
    }

    /// Get all resource types in menu order.
    pub fn all() -> &'static [ResourceType] {
        &[ResourceType::Books, ResourceType::Papers, ResourceType::Other]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Term
// ─────────────────────────────────────────────────────────────────────────────

/// School term within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Term1,
    Term2,
    Term3,
}

impl Term {
    /// Get a display label for the term.
    pub fn label(&self) -> &'static str {
        match self {
            Term::Term1 => "Term 1",
            Term::Term2 => "Term 2",
            Term::Term3 => "Term 3",
        }
    }

    /// Parse a term from `"term1"` / `"1"` style input; `None` for anything
    /// else (the backend marks termless material as `"other"`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "term1" | "term 1" | "1" => Some(Term::Term1),
            "term2" | "term 2" | "2" => Some(Term::Term2),
            "term3" | "term 3" | "3" => Some(Term::Term3),
            _ => None,
        }
    }

    /// Get all terms in order.
    pub fn all() -> &'static [Term] {
        &[Term::Term1, Term::Term2, Term::Term3]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subject Identifier
// ─────────────────────────────────────────────────────────────────────────────

/// Normalized subject identifier: lowercase, whitespace collapsed to hyphens.
///
/// The special value `"all"` is a sentinel meaning "no subject filtering",
/// used when resource type `Other` skips subject selection entirely.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// The sentinel spelling for "no subject filtering".
    pub const ALL: &'static str = "all";

    /// Create a normalized subject id from raw text.
    pub fn new(raw: &str) -> Self {
        let mut normalized = String::with_capacity(raw.len());
        for part in raw.trim().to_lowercase().split_whitespace() {
            if !normalized.is_empty() {
                normalized.push('-');
            }
            normalized.push_str(part);
        }
        SubjectId(normalized)
    }

    /// The sentinel subject used when type `Other` bypasses subject choice.
    pub fn all_sentinel() -> Self {
        SubjectId(Self::ALL.to_string())
    }

    /// Whether this is the "all" sentinel.
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    /// The normalized identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable fallback name: hyphens to spaces, words capitalized.
    pub fn display_name(&self) -> String {
        let mut name = String::with_capacity(self.0.len());
        for part in self.0.split('-') {
            if !name.is_empty() {
                name.push(' ');
            }
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(chars.as_str());
            }
        }
        name
    }

    /// Translation key for the subject (`subjectPureMathematics` style).
    pub fn translation_key(&self) -> String {
        let mut key = String::from("subject");
        for part in self.0.split('-') {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                key.extend(first.to_uppercase());
                key.push_str(chars.as_str());
            }
        }
        key
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter Facets
// ─────────────────────────────────────────────────────────────────────────────

/// Grade facet of a filter: `All` passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradeFilter {
    #[default]
    All,
    Only(Grade),
}

impl GradeFilter {
    /// Parse from dropdown-style input; `"all"` and unparsable grades mean no
    /// constraint.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("all") {
            GradeFilter::All
        } else {
            Grade::parse(input).map_or(GradeFilter::All, GradeFilter::Only)
        }
    }

    /// Whether a resource with the given grade passes this facet.
    ///
    /// A resource without a grade only ever matches `All`.
    pub fn matches(&self, grade: Option<Grade>) -> bool {
        match self {
            GradeFilter::All => true,
            GradeFilter::Only(wanted) => grade == Some(*wanted),
        }
    }
}

/// Year facet of a filter: `All` passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Only(u16),
}

impl YearFilter {
    /// Parse from dropdown-style input.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("all") {
            YearFilter::All
        } else {
            input
                .trim()
                .parse::<u16>()
                .map_or(YearFilter::All, YearFilter::Only)
        }
    }

    /// Whether a resource with the given year passes this facet.
    ///
    /// A resource without a year only ever matches `All`.
    pub fn matches(&self, year: Option<u16>) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Only(wanted) => year == Some(*wanted),
        }
    }
}

/// Term facet of a filter: `All` passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermFilter {
    #[default]
    All,
    Only(Term),
}

impl TermFilter {
    /// Parse from dropdown-style input.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("all") {
            TermFilter::All
        } else {
            Term::parse(input).map_or(TermFilter::All, TermFilter::Only)
        }
    }

    /// Whether a resource with the given term passes this facet.
    pub fn matches(&self, term: Option<Term>) -> bool {
        match self {
            TermFilter::All => true,
            TermFilter::Only(wanted) => term == Some(*wanted),
        }
    }
}

/// Resource-type facet of a filter: `All` passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ResourceType),
}

impl TypeFilter {
    /// Parse from dropdown-style input.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("all") {
            TypeFilter::All
        } else {
            TypeFilter::Only(ResourceType::parse(input))
        }
    }

    /// Whether a resource of the given type passes this facet.
    pub fn matches(&self, resource_type: ResourceType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => resource_type == *wanted,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource Records
// ─────────────────────────────────────────────────────────────────────────────

/// A fully normalized library resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Backend-assigned identifier.
    pub id: String,
    /// Display title (also the free-text search target).
    pub title: String,
    /// Grade, when the resource is grade-categorized.
    #[serde(default)]
    pub grade: Option<Grade>,
    /// Normalized subject; `"other"` when the backend had none.
    pub subject: SubjectId,
    /// Resource category.
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// School term, when known.
    #[serde(default)]
    pub term: Option<Term>,
    /// Publication/exam year, when known.
    #[serde(default)]
    pub year: Option<u16>,
    /// Download or view link.
    #[serde(default)]
    pub url: String,
    /// Mime type reported by the backend, when known.
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl Resource {
    /// Case-insensitive substring match on the title.
    ///
    /// An empty (or whitespace-only) query matches everything.
    pub fn title_matches(&self, query: &str) -> bool {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&trimmed.to_lowercase())
    }
}

/// A year value as the backend delivers it: number or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawYear {
    Number(i64),
    Text(String),
}

impl RawYear {
    fn normalize(&self) -> Option<u16> {
        match self {
            RawYear::Number(n) => u16::try_from(*n).ok(),
            RawYear::Text(s) => s.trim().parse::<u16>().ok(),
        }
    }
}

/// A loosely typed record straight from the resource backend.
///
/// Grades arrive as strings (sometimes the `"all"` placeholder), categories
/// under folder spellings, years as numbers or strings. `normalize` applies
/// the portal defaults: missing subject becomes `"other"`, unknown category
/// becomes `Other`, unparsable grade/term/year become `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawResource {
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    pub grade: Option<String>,
    pub subject: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub term: Option<String>,
    pub year: Option<RawYear>,
    pub url: Option<String>,
    #[serde(alias = "mimeType")]
    pub mime_type: Option<String>,
}

impl RawResource {
    /// Convert into a normalized [`Resource`].
    pub fn normalize(self) -> Resource {
        let subject = self
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map_or_else(|| SubjectId::new("other"), SubjectId::new);
        Resource {
            id: self.id,
            title: self.title,
            grade: self.grade.as_deref().and_then(Grade::parse),
            subject,
            resource_type: self
                .kind
                .as_deref()
                .map(ResourceType::parse)
                .unwrap_or_default(),
            term: self.term.as_deref().and_then(Term::parse),
            year: self.year.as_ref().and_then(RawYear::normalize),
            url: self.url.unwrap_or_default(),
            mime_type: self.mime_type,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Grade tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_grade_new_bounds() {
        assert!(Grade::new(0).is_none());
        assert!(Grade::new(1).is_some());
        assert!(Grade::new(13).is_some());
        assert!(Grade::new(14).is_none());
    }

    #[test]
    fn test_grade_all_covers_range() {
        let grades: Vec<u8> = Grade::all().map(Grade::value).collect();
        assert_eq!(grades.len(), 13);
        assert_eq!(grades.first(), Some(&1));
        assert_eq!(grades.last(), Some(&13));
    }

    #[test]
    fn test_grade_parse_forms() {
        assert_eq!(Grade::parse("5"), Grade::new(5));
        assert_eq!(Grade::parse("grade5"), Grade::new(5));
        assert_eq!(Grade::parse("Grade 13"), Grade::new(13));
        assert_eq!(Grade::parse("  7  "), Grade::new(7));
        assert_eq!(Grade::parse("all"), None);
        assert_eq!(Grade::parse("grade14"), None);
        assert_eq!(Grade::parse(""), None);
    }

    #[test]
    fn test_grade_display() {
        let grade = Grade::new(5).unwrap();
        assert_eq!(format!("{}", grade), "Grade 5");
        assert_eq!(grade.translation_key(), "grade5");
    }

    #[test]
    fn test_grade_serde_roundtrip() {
        let grade = Grade::new(11).unwrap();
        let json = serde_json::to_string(&grade).unwrap();
        assert_eq!(json, "11");
        let back: Grade = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grade);
    }

    #[test]
    fn test_grade_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Grade>("0").is_err());
        assert!(serde_json::from_str::<Grade>("14").is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resource type tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_resource_type_parse_aliases() {
        assert_eq!(ResourceType::parse("books"), ResourceType::Books);
        assert_eq!(ResourceType::parse("Textbooks"), ResourceType::Books);
        assert_eq!(ResourceType::parse("papers"), ResourceType::Papers);
        assert_eq!(ResourceType::parse("past-papers"), ResourceType::Papers);
        assert_eq!(ResourceType::parse("others"), ResourceType::Other);
        assert_eq!(ResourceType::parse("worksheet"), ResourceType::Other);
        assert_eq!(ResourceType::parse(""), ResourceType::Other);
    }

    #[test]
    fn test_resource_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ResourceType::Books).unwrap(),
            "\"books\""
        );
        assert_eq!(
            serde_json::to_string(&ResourceType::Papers).unwrap(),
            "\"papers\""
        );
        assert_eq!(
            serde_json::to_string(&ResourceType::Other).unwrap(),
            "\"other\""
        );
    }

    #[test]
    fn test_resource_type_labels() {
        assert_eq!(ResourceType::Books.label(), "Books");
        assert_eq!(ResourceType::Papers.label(), "Past Papers");
        assert_eq!(ResourceType::Books.translation_key(), "resourceBooks");
        assert_eq!(ResourceType::all().len(), 3);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Term tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_term_parse_forms() {
        assert_eq!(Term::parse("term1"), Some(Term::Term1));
        assert_eq!(Term::parse("Term 2"), Some(Term::Term2));
        assert_eq!(Term::parse("3"), Some(Term::Term3));
        assert_eq!(Term::parse("other"), None);
        assert_eq!(Term::parse(""), None);
    }

    #[test]
    fn test_term_serialization() {
        assert_eq!(serde_json::to_string(&Term::Term1).unwrap(), "\"term1\"");
        assert_eq!(
            serde_json::from_str::<Term>("\"term3\"").unwrap(),
            Term::Term3
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subject tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_subject_normalization() {
        assert_eq!(SubjectId::new("Mathematics").as_str(), "mathematics");
        assert_eq!(SubjectId::new("  Pure  Maths ").as_str(), "pure-maths");
        assert_eq!(SubjectId::new("TAMIL").as_str(), "tamil");
    }

    #[test]
    fn test_subject_sentinel() {
        let sentinel = SubjectId::all_sentinel();
        assert!(sentinel.is_all());
        assert!(!SubjectId::new("science").is_all());
    }

    #[test]
    fn test_subject_display_name() {
        assert_eq!(SubjectId::new("pure maths").display_name(), "Pure Maths");
        assert_eq!(SubjectId::new("science").display_name(), "Science");
    }

    #[test]
    fn test_subject_translation_key() {
        assert_eq!(SubjectId::new("maths").translation_key(), "subjectMaths");
        assert_eq!(
            SubjectId::new("pure mathematics").translation_key(),
            "subjectPureMathematics"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filter facet tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_year_filter_missing_year_never_matches_specific() {
        assert!(YearFilter::All.matches(None));
        assert!(YearFilter::All.matches(Some(2020)));
        assert!(!YearFilter::Only(2020).matches(None));
        assert!(YearFilter::Only(2020).matches(Some(2020)));
        assert!(!YearFilter::Only(2020).matches(Some(2021)));
    }

    #[test]
    fn test_grade_filter_matches() {
        let g5 = Grade::new(5).unwrap();
        assert!(GradeFilter::All.matches(None));
        assert!(GradeFilter::Only(g5).matches(Some(g5)));
        assert!(!GradeFilter::Only(g5).matches(None));
        assert!(!GradeFilter::Only(g5).matches(Grade::new(6)));
    }

    #[test]
    fn test_filter_parse_all_and_values() {
        assert_eq!(GradeFilter::parse("all"), GradeFilter::All);
        assert_eq!(
            GradeFilter::parse("5"),
            GradeFilter::Only(Grade::new(5).unwrap())
        );
        assert_eq!(YearFilter::parse("2023"), YearFilter::Only(2023));
        assert_eq!(YearFilter::parse("All"), YearFilter::All);
        assert_eq!(YearFilter::parse("not-a-year"), YearFilter::All);
        assert_eq!(TermFilter::parse("term2"), TermFilter::Only(Term::Term2));
        assert_eq!(
            TypeFilter::parse("textbooks"),
            TypeFilter::Only(ResourceType::Books)
        );
        assert_eq!(TypeFilter::parse("all"), TypeFilter::All);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resource record tests
    // ─────────────────────────────────────────────────────────────────────────

    fn raw_record(json: &str) -> Resource {
        serde_json::from_str::<RawResource>(json).unwrap().normalize()
    }

    #[test]
    fn test_raw_resource_normalization_defaults() {
        let resource = raw_record(r#"{"id": "f1", "name": "Notes"}"#);
        assert_eq!(resource.id, "f1");
        assert_eq!(resource.title, "Notes");
        assert_eq!(resource.grade, None);
        assert_eq!(resource.subject.as_str(), "other");
        assert_eq!(resource.resource_type, ResourceType::Other);
        assert_eq!(resource.term, None);
        assert_eq!(resource.year, None);
        assert_eq!(resource.url, "");
    }

    #[test]
    fn test_raw_resource_normalization_full() {
        let resource = raw_record(
            r#"{
                "id": "f2",
                "title": "Grade 5 Maths Term 1",
                "grade": "5",
                "subject": "Mathematics",
                "type": "textbooks",
                "term": "term1",
                "year": "2023",
                "url": "https://example.org/f2",
                "mimeType": "application/pdf"
            }"#,
        );
        assert_eq!(resource.grade, Grade::new(5));
        assert_eq!(resource.subject.as_str(), "mathematics");
        assert_eq!(resource.resource_type, ResourceType::Books);
        assert_eq!(resource.term, Some(Term::Term1));
        assert_eq!(resource.year, Some(2023));
        assert_eq!(resource.mime_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_raw_resource_year_as_number() {
        let resource = raw_record(r#"{"id": "f3", "title": "Paper", "year": 2019}"#);
        assert_eq!(resource.year, Some(2019));
    }

    #[test]
    fn test_raw_resource_all_grade_becomes_none() {
        let resource = raw_record(r#"{"id": "f4", "title": "Guide", "grade": "all"}"#);
        assert_eq!(resource.grade, None);
    }

    #[test]
    fn test_title_matches_case_insensitive_substring() {
        let resource = raw_record(r#"{"id": "f5", "title": "Pure Mathematics Paper"}"#);
        assert!(resource.title_matches("mathematics"));
        assert!(resource.title_matches("PURE MATH"));
        assert!(resource.title_matches(""));
        assert!(resource.title_matches("   "));
        assert!(!resource.title_matches("chemistry"));
    }

    #[test]
    fn test_resource_serde_roundtrip() {
        let resource = raw_record(
            r#"{"id": "f6", "title": "Science", "grade": "7", "subject": "science", "type": "papers", "year": 2021}"#,
        );
        let json = serde_json::to_string(&resource).unwrap();
        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resource);
    }
}
