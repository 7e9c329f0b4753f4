//! Library resource module
//!
//! This module defines the typed resource vocabulary (grades, resource
//! types, terms, subjects, filter facets), the normalization of raw backend
//! records, the in-memory catalog that shelves them, and the filter
//! predicates shared between navigation and the presentation layer.

mod catalog;
mod model;

pub use catalog::*;
pub use model::*;
