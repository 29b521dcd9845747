//! Artwork records as returned by the listing endpoint.

use serde::Deserialize;

use super::opaque::opaque_text;

/// Fields requested from the listing endpoint when payloads are restricted.
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// A single artwork row.
///
/// Only `id` is interpreted. Every display field is kept as opaque text:
/// the API sends strings, numbers (the date fields are years) or `null`,
/// and all of them end up as `Option<String>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtworkRecord {
    /// Unique identifier within the source.
    pub id: u64,
    #[serde(default, deserialize_with = "opaque_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "opaque_text")]
    pub place_of_origin: Option<String>,
    #[serde(default, deserialize_with = "opaque_text")]
    pub artist_display: Option<String>,
    #[serde(default, deserialize_with = "opaque_text")]
    pub inscriptions: Option<String>,
    #[serde(default, deserialize_with = "opaque_text")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "opaque_text")]
    pub date_end: Option<String>,
}

impl ArtworkRecord {
    /// Creates a record with only an id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the place of origin.
    pub fn with_place_of_origin(mut self, place: impl Into<String>) -> Self {
        self.place_of_origin = Some(place.into());
        self
    }

    /// Sets the artist display string.
    pub fn with_artist_display(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = Some(artist.into());
        self
    }

    /// Sets the inscriptions text.
    pub fn with_inscriptions(mut self, inscriptions: impl Into<String>) -> Self {
        self.inscriptions = Some(inscriptions.into());
        self
    }

    /// Sets the start and end dates.
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.date_start = Some(start.into());
        self.date_end = Some(end.into());
        self
    }

    /// Returns the title, or an empty string.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Returns the date range as `start–end`, collapsing equal years.
    pub fn date_range(&self) -> Option<String> {
        match (self.date_start.as_deref(), self.date_end.as_deref()) {
            (Some(start), Some(end)) if start == end => Some(start.to_string()),
            (Some(start), Some(end)) => Some(format!("{start}–{end}")),
            (Some(single), None) | (None, Some(single)) => Some(single.to_string()),
            (None, None) => None,
        }
    }
}
