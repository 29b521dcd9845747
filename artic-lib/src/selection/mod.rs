//! Cross-page row selection.
//!
//! Each navigation replaces the current [`Page`](crate::api::Page) wholesale,
//! but the user's selection must survive it. Two pieces of state cover that:
//!
//! - [`SelectionSet`] - every record the user has selected on any page,
//!   keyed by id. Never dropped on navigation.
//! - the visible selection - the part of the set whose ids are on the
//!   current page, in row order. Always derived, never edited directly.
//!
//! [`Reconciler`] owns both and only changes them through its transitions.

mod reconciler;
mod set;

pub use reconciler::Reconciler;
pub use reconciler::SelectionEvent;
pub use set::SelectionSet;
