//! Selection error types

/// Errors raised by selection gestures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Row number outside the bounds of the current page.
    ///
    /// Row numbers are 1-based and never span pages.
    #[error("Row {row} isn't valid for the current page ({rows} rows)")]
    InvalidRow {
        /// The requested row number.
        row: usize,
        /// Number of rows on the current page.
        rows: usize,
    },
}
