//! Resource shelving and filter predicates
//!
//! The backend hands over a flat list of records; this module organizes them
//! into per-grade shelves bucketed by resource type, and defines the filter
//! predicates shared by navigation (year-option computation) and the
//! presentation layer (list rendering). Both must apply identical rules.

use crate::error::Result;
use crate::resources::model::{
    Grade, GradeFilter, RawResource, Resource, ResourceType, SubjectId, TermFilter, TypeFilter,
    YearFilter,
};
use log::debug;
use std::collections::BTreeMap;

// ─────────────────────────────────────────────────────────────────────────────
// Filter Sets
// ─────────────────────────────────────────────────────────────────────────────

/// The in-list filter controls shown on the hierarchical list view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    /// Year dropdown; `All` by default.
    pub year: YearFilter,
    /// Term dropdown; `All` by default.
    pub term: TermFilter,
    /// Free-text title search.
    pub query: String,
}

impl ListFilter {
    /// Restore the defaults (everything passes).
    pub fn reset(&mut self) {
        *self = ListFilter::default();
    }
}

/// The global-search filter set, queried across all grades and subjects.
///
/// There is deliberately no subject facet: global search spans subjects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Free-text title search.
    pub query: String,
    pub grade: GradeFilter,
    pub year: YearFilter,
    pub term: TermFilter,
    pub resource_type: TypeFilter,
}

impl SearchCriteria {
    /// Whether a resource passes every facet of this criteria set.
    pub fn matches(&self, resource: &Resource) -> bool {
        self.grade.matches(resource.grade)
            && self.term.matches(resource.term)
            && self.year.matches(resource.year)
            && self.resource_type.matches(resource.resource_type)
            && resource.title_matches(&self.query)
    }
}

/// Whether a resource passes the hierarchical list-view predicate.
///
/// The `"all"` sentinel subject bypasses subject comparison entirely (the
/// resource type `Other` path, whose material is not subject-categorized).
pub fn matches_hierarchy(resource: &Resource, subject: &SubjectId, filter: &ListFilter) -> bool {
    (subject.is_all() || resource.subject == *subject)
        && resource.title_matches(&filter.query)
        && filter.year.matches(resource.year)
        && filter.term.matches(resource.term)
}

/// Distinct years present in a resource set, newest first.
///
/// This is the option set for the year dropdown.
pub fn distinct_years<'a, I>(resources: I) -> Vec<u16>
where
    I: IntoIterator<Item = &'a Resource>,
{
    let mut years: Vec<u16> = resources.into_iter().filter_map(|r| r.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource Provider Seam
// ─────────────────────────────────────────────────────────────────────────────

/// The resource-lookup collaborator.
///
/// Navigation uses `lookup_resources` only to compute the distinct years for
/// the year dropdown; the presentation layer uses both calls to source list
/// contents, applying the predicates above.
pub trait ResourceProvider {
    /// Resources shelved under `{grade, resource_type}`, narrowed to one
    /// subject. The `"all"` sentinel returns the whole shelf bucket.
    fn lookup_resources(
        &self,
        grade: Grade,
        resource_type: ResourceType,
        subject: &SubjectId,
    ) -> Result<Vec<Resource>>;

    /// Resources matching a global-search criteria set, across all shelves.
    fn search_resources(&self, criteria: &SearchCriteria) -> Result<Vec<Resource>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Shelves
// ─────────────────────────────────────────────────────────────────────────────

/// One grade's resources, bucketed by type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shelf {
    books: Vec<Resource>,
    papers: Vec<Resource>,
    other: Vec<Resource>,
}

impl Shelf {
    /// The bucket for one resource type.
    pub fn bucket(&self, resource_type: ResourceType) -> &[Resource] {
        match resource_type {
            ResourceType::Books => &self.books,
            ResourceType::Papers => &self.papers,
            ResourceType::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, resource_type: ResourceType) -> &mut Vec<Resource> {
        match resource_type {
            ResourceType::Books => &mut self.books,
            ResourceType::Papers => &mut self.papers,
            ResourceType::Other => &mut self.other,
        }
    }

    /// Total resources on this shelf.
    pub fn len(&self) -> usize {
        self.books.len() + self.papers.len() + self.other.len()
    }

    /// Whether the shelf holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.books.iter().chain(self.papers.iter()).chain(self.other.iter())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-Memory Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory catalog of all fetched resources, shelved by grade and type.
///
/// Every grade 1..=13 gets a shelf even when empty. Resources without a
/// valid grade cannot be shelved and are dropped with a debug log.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    shelves: BTreeMap<Grade, Shelf>,
}

impl Catalog {
    /// Build a catalog from normalized resources.
    pub fn new(resources: Vec<Resource>) -> Self {
        let mut shelves: BTreeMap<Grade, Shelf> =
            Grade::all().map(|grade| (grade, Shelf::default())).collect();

        for resource in resources {
            match resource.grade {
                Some(grade) => {
                    if let Some(shelf) = shelves.get_mut(&grade) {
                        shelf.bucket_mut(resource.resource_type).push(resource);
                    }
                }
                None => {
                    debug!("Skipping ungraded resource '{}'", resource.title);
                }
            }
        }

        Catalog { shelves }
    }

    /// Build a catalog straight from raw backend records.
    pub fn from_raw(records: Vec<RawResource>) -> Self {
        Self::new(records.into_iter().map(RawResource::normalize).collect())
    }

    /// The shelf for one grade.
    pub fn shelf(&self, grade: Grade) -> &Shelf {
        static EMPTY: Shelf = Shelf {
            books: Vec::new(),
            papers: Vec::new(),
            other: Vec::new(),
        };
        self.shelves.get(&grade).unwrap_or(&EMPTY)
    }

    /// Distinct subjects present in one shelf bucket, sorted.
    ///
    /// Drives the subject-selection grid.
    pub fn subjects_for(&self, grade: Grade, resource_type: ResourceType) -> Vec<SubjectId> {
        let mut subjects: Vec<SubjectId> = self
            .shelf(grade)
            .bucket(resource_type)
            .iter()
            .map(|r| r.subject.clone())
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    /// Iterate every shelved resource.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.shelves.values().flat_map(Shelf::iter)
    }

    /// Total shelved resources.
    pub fn len(&self) -> usize {
        self.shelves.values().map(Shelf::len).sum()
    }

    /// Whether nothing is shelved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for Catalog {
    fn lookup_resources(
        &self,
        grade: Grade,
        resource_type: ResourceType,
        subject: &SubjectId,
    ) -> Result<Vec<Resource>> {
        let matches = self
            .shelf(grade)
            .bucket(resource_type)
            .iter()
            .filter(|r| subject.is_all() || r.subject == *subject)
            .cloned()
            .collect();
        Ok(matches)
    }

    fn search_resources(&self, criteria: &SearchCriteria) -> Result<Vec<Resource>> {
        Ok(self.iter().filter(|r| criteria.matches(r)).cloned().collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
