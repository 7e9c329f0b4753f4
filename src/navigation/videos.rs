//! Videos section navigation state machine
//!
//! A simpler sibling of the library machine: grade → subject → unit → list,
//! with no resource-type step, no in-list filters, and no global search.
//! The same guarded-transition rules apply; out-of-order events are ignored
//! and logged at debug level.

use crate::resources::{Grade, SubjectId};
use log::debug;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Views
// ─────────────────────────────────────────────────────────────────────────────

/// Position in the videos drill-down hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoView {
    /// Grade grid (the section root).
    #[default]
    GradeSelect,
    /// Subject grid for the chosen grade.
    SubjectSelect,
    /// Unit grid for the chosen grade and subject.
    UnitSelect,
    /// Video list for the chosen unit.
    List,
}

impl VideoView {
    /// Depth in the drill-down; the root is 0.
    fn depth(self) -> u8 {
        match self {
            VideoView::GradeSelect => 0,
            VideoView::SubjectSelect => 1,
            VideoView::UnitSelect => 2,
            VideoView::List => 3,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical unit identifier: lowercase, whitespace collapsed to hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(raw: &str) -> Self {
        let mut normalized = String::with_capacity(raw.len());
        for part in raw.trim().to_lowercase().split_whitespace() {
            if !normalized.is_empty() {
                normalized.push('-');
            }
            normalized.push_str(part);
        }
        UnitId(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form: hyphens back to spaces, words capitalized.
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
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Videos Navigation State
// ─────────────────────────────────────────────────────────────────────────────

/// Navigation state for the videos section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoNav {
    view: VideoView,
    selected_grade: Option<Grade>,
    selected_subject: Option<SubjectId>,
    selected_unit: Option<UnitId>,
}

impl VideoNav {
    /// A fresh machine at the grade-selection root.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> VideoView {
        self.view
    }

    pub fn selected_grade(&self) -> Option<Grade> {
        self.selected_grade
    }

    pub fn selected_subject(&self) -> Option<&SubjectId> {
        self.selected_subject.as_ref()
    }

    pub fn selected_unit(&self) -> Option<&UnitId> {
        self.selected_unit.as_ref()
    }

    /// Choose a grade from the grade grid.
    pub fn select_grade(&mut self, grade: Grade) -> bool {
        if self.view != VideoView::GradeSelect {
            debug!("Ignoring grade selection while in {:?}", self.view);
            return false;
        }
        self.selected_grade = Some(grade);
        self.selected_subject = None;
        self.selected_unit = None;
        self.view = VideoView::SubjectSelect;
        debug!("Videos: {} selected", grade);
        true
    }

    /// Choose a subject for the selected grade.
    pub fn select_subject(&mut self, subject: SubjectId) -> bool {
        if self.view != VideoView::SubjectSelect {
            debug!("Ignoring subject selection while in {:?}", self.view);
            return false;
        }
        if self.selected_grade.is_none() {
            debug!("Ignoring subject selection without a grade");
            return false;
        }
        debug!("Videos: subject '{}' selected", subject);
        self.selected_subject = Some(subject);
        self.selected_unit = None;
        self.view = VideoView::UnitSelect;
        true
    }

    /// Choose a unit for the selected grade and subject.
    pub fn select_unit(&mut self, unit: UnitId) -> bool {
        if self.view != VideoView::UnitSelect {
            debug!("Ignoring unit selection while in {:?}", self.view);
            return false;
        }
        if self.selected_grade.is_none() || self.selected_subject.is_none() {
            debug!("Ignoring unit selection without grade/subject context");
            return false;
        }
        debug!("Videos: unit '{}' selected", unit);
        self.selected_unit = Some(unit);
        self.view = VideoView::List;
        true
    }

    /// Navigate back to a shallower view.
    ///
    /// Landing on a view clears the selection that view exists to make and
    /// everything deeper, mirroring the library machine.
    pub fn go_back(&mut self, target: VideoView) -> bool {
        if target.depth() >= self.view.depth() {
            debug!(
                "Ignoring back navigation from {:?} to {:?}",
                self.view, target
            );
            return false;
        }
        match target {
            VideoView::GradeSelect => {
                self.selected_grade = None;
                self.selected_subject = None;
                self.selected_unit = None;
            }
            VideoView::SubjectSelect => {
                self.selected_subject = None;
                self.selected_unit = None;
            }
            VideoView::UnitSelect => {
                self.selected_unit = None;
            }
            VideoView::List => {}
        }
        self.view = target;
        debug!("Videos: back to {:?}", target);
        true
    }

    /// Reset every field to defaults and return to the grade grid.
    pub fn reset_section(&mut self) {
        *self = VideoNav::default();
        debug!("Videos: section reset");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
