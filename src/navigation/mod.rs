//! Section navigation state machines
//!
//! The library and videos sections each own a drill-down hierarchy with
//! strict transition rules: every selection event is validated against the
//! currently visible view, invalid events are ignored, and back navigation
//! clears the selections it walks past.

mod library;
mod videos;

pub use library::*;
pub use videos::*;
