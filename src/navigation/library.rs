//! Library section navigation state machine
//!
//! The library drills down grade → resource type → subject → list, with a
//! parallel global-search mode that bypasses the hierarchy entirely. This
//! module owns the transition rules, back-navigation, and reset semantics.
//!
//! Action events that do not match the current view are silently ignored
//! (logged at debug level): duplicate or out-of-order UI events must never
//! corrupt the state, and navigation never visibly fails.

use crate::error::ResultExt;
use crate::resources::{
    distinct_years, Grade, GradeFilter, ListFilter, ResourceProvider, ResourceType, SearchCriteria,
    SubjectId, TermFilter, TypeFilter, YearFilter,
};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Views
// ─────────────────────────────────────────────────────────────────────────────

/// Position in the library drill-down hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibraryView {
    /// Grade grid (the section root).
    #[default]
    GradeSelect,
    /// Books / past papers / other choice for the chosen grade.
    ResourceTypeSelect,
    /// Subject grid for the chosen grade and type.
    SubjectSelect,
    /// Resource list; doubles as the search-results view while global
    /// search is active.
    List,
}

impl LibraryView {
    /// Depth in the drill-down; the root is 0.
    fn depth(self) -> u8 {
        match self {
            LibraryView::GradeSelect => 0,
            LibraryView::ResourceTypeSelect => 1,
            LibraryView::SubjectSelect => 2,
            LibraryView::List => 3,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Search State
// ─────────────────────────────────────────────────────────────────────────────

/// The global-search filter set.
///
/// While `active`, these fields override the hierarchical selection for
/// list-sourcing purposes. The field values survive ordinary navigation
/// elsewhere (only `active` flips off) so a later "search again" restores
/// them; they are wiped only when leaving the results via back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalSearch {
    pub active: bool,
    /// Free-text title search.
    pub query: String,
    pub grade: GradeFilter,
    pub year: YearFilter,
    pub term: TermFilter,
    pub resource_type: TypeFilter,
}

impl GlobalSearch {
    fn clear(&mut self) {
        *self = GlobalSearch::default();
    }

    /// The criteria set to hand to the resource provider.
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            query: self.query.clone(),
            grade: self.grade,
            year: self.year,
            term: self.term,
            resource_type: self.resource_type,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Library Navigation State
// ─────────────────────────────────────────────────────────────────────────────

/// Navigation state for the library section.
///
/// Created once and reset (never recreated) when the user navigates away
/// and back. Fields are private so every mutation goes through a guarded
/// transition, keeping the active view consistent with the deepest
/// non-empty selection at all times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryNav {
    view: LibraryView,
    selected_grade: Option<Grade>,
    selected_resource_type: Option<ResourceType>,
    selected_subject: Option<SubjectId>,
    list_filter: ListFilter,
    global_search: GlobalSearch,
    year_options: Vec<u16>,
}

impl LibraryNav {
    /// A fresh machine at the grade-selection root.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The currently visible view.
    pub fn view(&self) -> LibraryView {
        self.view
    }

    pub fn selected_grade(&self) -> Option<Grade> {
        self.selected_grade
    }

    pub fn selected_resource_type(&self) -> Option<ResourceType> {
        self.selected_resource_type
    }

    pub fn selected_subject(&self) -> Option<&SubjectId> {
        self.selected_subject.as_ref()
    }

    /// The in-list filter controls (hierarchy mode only).
    pub fn list_filter(&self) -> &ListFilter {
        &self.list_filter
    }

    pub fn global_search(&self) -> &GlobalSearch {
        &self.global_search
    }

    /// Option set for the year dropdown, newest first.
    pub fn year_options(&self) -> &[u16] {
        &self.year_options
    }

    /// Whether the list view is currently sourced from global search.
    pub fn in_search_mode(&self) -> bool {
        self.view == LibraryView::List && self.global_search.active
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Choose a grade from the grade grid.
    ///
    /// Valid only on `GradeSelect`; returns `false` (no-op) otherwise.
    pub fn select_grade(&mut self, grade: Grade) -> bool {
        if self.view != LibraryView::GradeSelect {
            debug!("Ignoring grade selection while in {:?}", self.view);
            return false;
        }

        self.selected_grade = Some(grade);
        self.selected_resource_type = None;
        self.selected_subject = None;
        self.list_filter.reset();
        self.year_options.clear();
        // Ordinary navigation only deactivates the search; the field values
        // survive for a later "search again".
        self.global_search.active = false;
        self.view = LibraryView::ResourceTypeSelect;
        debug!("Library: {} selected", grade);
        true
    }

    /// Choose a resource type for the selected grade.
    ///
    /// `Other` material carries no subject categorization: the subject is
    /// set to the `"all"` sentinel and the subject view is skipped.
    pub fn select_resource_type(
        &mut self,
        resource_type: ResourceType,
        provider: &dyn ResourceProvider,
    ) -> bool {
        if self.view != LibraryView::ResourceTypeSelect {
            debug!("Ignoring resource type selection while in {:?}", self.view);
            return false;
        }
        let grade = match self.selected_grade {
            Some(grade) => grade,
            None => {
                debug!("Ignoring resource type selection without a grade");
                return false;
            }
        };

        self.selected_resource_type = Some(resource_type);
        self.list_filter.reset();
        self.global_search.active = false;

        if resource_type == ResourceType::Other {
            let sentinel = SubjectId::all_sentinel();
            self.year_options = Self::compute_year_options(grade, resource_type, &sentinel, provider);
            self.selected_subject = Some(sentinel);
            self.view = LibraryView::List;
            debug!("Library: type 'other' selected, skipping subject view");
        } else {
            self.selected_subject = None;
            self.year_options.clear();
            self.view = LibraryView::SubjectSelect;
            debug!("Library: type {:?} selected", resource_type);
        }
        true
    }

    /// Choose a subject for the selected grade and type.
    ///
    /// Recomputes the year dropdown options from the distinct years among
    /// resources matching the full grade/type/subject selection.
    pub fn select_subject(&mut self, subject: SubjectId, provider: &dyn ResourceProvider) -> bool {
        if self.view != LibraryView::SubjectSelect {
            debug!("Ignoring subject selection while in {:?}", self.view);
            return false;
        }
        let (grade, resource_type) = match (self.selected_grade, self.selected_resource_type) {
            (Some(grade), Some(resource_type)) => (grade, resource_type),
            _ => {
                debug!("Ignoring subject selection without grade/type context");
                return false;
            }
        };

        self.list_filter.year = YearFilter::All;
        self.year_options = Self::compute_year_options(grade, resource_type, &subject, provider);
        debug!("Library: subject '{}' selected", subject);
        self.selected_subject = Some(subject);
        self.view = LibraryView::List;
        true
    }

    /// Navigate back to a shallower view.
    ///
    /// Landing on a view clears the selection that view exists to make and
    /// everything deeper, so the view always matches the deepest selection.
    /// Leaving the list additionally resets the in-list filter.
    ///
    /// Leaving the list while global search is active ignores `target`:
    /// search results have no intermediate back stack, so the search fields
    /// are wiped and the machine jumps straight to the grade grid.
    pub fn go_back(&mut self, target: LibraryView) -> bool {
        if self.in_search_mode() {
            self.global_search.clear();
            self.list_filter.reset();
            self.selected_grade = None;
            self.selected_resource_type = None;
            self.selected_subject = None;
            self.year_options.clear();
            self.view = LibraryView::GradeSelect;
            debug!("Library: left search results, back at grade selection");
            return true;
        }

        if target.depth() >= self.view.depth() {
            debug!(
                "Ignoring back navigation from {:?} to {:?}",
                self.view, target
            );
            return false;
        }

        if self.view == LibraryView::List {
            self.list_filter.reset();
        }
        match target {
            LibraryView::GradeSelect => {
                self.selected_grade = None;
                self.selected_resource_type = None;
                self.selected_subject = None;
                self.year_options.clear();
            }
            LibraryView::ResourceTypeSelect => {
                self.selected_resource_type = None;
                self.selected_subject = None;
                self.year_options.clear();
            }
            LibraryView::SubjectSelect => {
                self.selected_subject = None;
                self.year_options.clear();
            }
            LibraryView::List => {}
        }
        self.view = target;
        debug!("Library: back to {:?}", target);
        true
    }

    /// Run a global search across all grades and subjects.
    ///
    /// Valid from any state; the hierarchical selection is cleared entirely
    /// and the list view shows the search results.
    pub fn run_global_search(
        &mut self,
        query: &str,
        grade: GradeFilter,
        year: YearFilter,
        term: TermFilter,
        resource_type: TypeFilter,
    ) {
        self.global_search = GlobalSearch {
            active: true,
            query: query.to_string(),
            grade,
            year,
            term,
            resource_type,
        };
        self.selected_grade = None;
        self.selected_resource_type = None;
        self.selected_subject = None;
        self.list_filter.reset();
        self.year_options.clear();
        self.view = LibraryView::List;
        debug!("Library: global search for '{}'", query);
    }

    /// Reset every field to defaults and return to the grade grid.
    ///
    /// Invoked when the user navigates away from the section and back.
    pub fn reset_section(&mut self) {
        *self = LibraryNav::default();
        debug!("Library: section reset");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // In-List Filter Mutators
    // ─────────────────────────────────────────────────────────────────────────

    /// Update the in-list free-text search. List view, hierarchy mode only.
    pub fn set_search_query(&mut self, query: &str) -> bool {
        if self.view != LibraryView::List || self.global_search.active {
            debug!("Ignoring list search outside the hierarchical list view");
            return false;
        }
        self.list_filter.query = query.to_string();
        true
    }

    /// Update the in-list year dropdown. List view, hierarchy mode only.
    pub fn set_year_filter(&mut self, year: YearFilter) -> bool {
        if self.view != LibraryView::List || self.global_search.active {
            debug!("Ignoring year filter outside the hierarchical list view");
            return false;
        }
        self.list_filter.year = year;
        true
    }

    /// Update the in-list term dropdown. List view, hierarchy mode only.
    pub fn set_term_filter(&mut self, term: TermFilter) -> bool {
        if self.view != LibraryView::List || self.global_search.active {
            debug!("Ignoring term filter outside the hierarchical list view");
            return false;
        }
        self.list_filter.term = term;
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Distinct years for the year dropdown; lookup failures degrade to an
    /// empty option set so navigation itself never fails.
    fn compute_year_options(
        grade: Grade,
        resource_type: ResourceType,
        subject: &SubjectId,
        provider: &dyn ResourceProvider,
    ) -> Vec<u16> {
        provider
            .lookup_resources(grade, resource_type, subject)
            .map(|resources| distinct_years(&resources))
            .unwrap_or_warn_default(Vec::new(), "Year filter options unavailable")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
