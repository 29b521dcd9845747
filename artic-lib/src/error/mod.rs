//! Error types

mod api;
mod selection;

pub use api::*;
pub use selection::*;

/// Top-level error returned by the client and the selection state machine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failure talking to the artworks API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A selection gesture referred to something that does not exist.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// A page index or page size of zero.
    #[error("Invalid page request: {0}")]
    InvalidPage(String),
}

/// Coarse classification of an [`Error`].
///
/// Frontends use this to decide how an error is surfaced: network and
/// format failures are logged and leave the current page in place, invalid
/// rows are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout, or non-success HTTP status.
    Network,
    /// The response body did not have the expected shape.
    Format,
    /// Row number outside the current page.
    InvalidRow,
    /// Bad input to the client itself (zero page, malformed base URL).
    InvalidInput,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(ApiError::Parse { .. }) => ErrorKind::Format,
            Self::Api(ApiError::InvalidUrl(_)) => ErrorKind::InvalidInput,
            Self::Api(_) => ErrorKind::Network,
            Self::Selection(SelectionError::InvalidRow { .. }) => ErrorKind::InvalidRow,
            Self::InvalidPage(_) => ErrorKind::InvalidInput,
        }
    }

    /// Returns `true` if this is a network-class error.
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// Returns `true` if this is a format-class error.
    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    /// Returns `true` if this is an invalid row error.
    pub fn is_invalid_row(&self) -> bool {
        self.kind() == ErrorKind::InvalidRow
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_kind_classification() {
        let http: Error = ApiError::http(503, "unavailable").into();
        assert_eq!(http.kind(), ErrorKind::Network);

        let timeout: Error = ApiError::Timeout(Duration::from_secs(10)).into();
        assert!(timeout.is_network());

        let parse: Error = ApiError::parse("missing field `pagination`").into();
        assert!(parse.is_format());

        let row: Error = SelectionError::InvalidRow { row: 13, rows: 12 }.into();
        assert!(row.is_invalid_row());

        let page = Error::InvalidPage("page index must be at least 1".to_string());
        assert_eq!(page.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_invalid_row_message() {
        let err: Error = SelectionError::InvalidRow { row: 13, rows: 12 }.into();
        assert_eq!(
            err.to_string(),
            "Row 13 isn't valid for the current page (12 rows)"
        );
    }
}
