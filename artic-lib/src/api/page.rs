//! Page type for paginated listing results.

use crate::model::ArtworkRecord;

/// One fetched slice of the artworks listing.
///
/// A page is replaced wholesale on every navigation and is never merged
/// with other pages.
///
/// # Example
///
/// ```ignore
/// let page = client.fetch_page(1, 12).await?;
///
/// for (row, record) in page.records().iter().enumerate() {
///     println!("{:>2} {}", row + 1, record.title());
/// }
///
/// println!("page {} of {}", page.index(), page.page_count());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    records: Vec<ArtworkRecord>,
    /// 1-based page index.
    index: u32,
    /// Requested page size.
    size: u32,
    /// Total record count reported by the source.
    total: u64,
}

impl Page {
    /// Creates a new page.
    pub fn new(index: u32, size: u32, records: Vec<ArtworkRecord>, total: u64) -> Self {
        Self {
            records,
            index,
            size,
            total,
        }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[ArtworkRecord] {
        &self.records
    }

    /// Returns the 1-based page index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Returns the page size this page was requested with.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the total record count reported by the source.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of pages implied by `total` and `size`.
    pub fn page_count(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        let count = self.total.div_ceil(u64::from(self.size));
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Returns `true` if a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.index < self.page_count()
    }

    /// Returns `true` if a page before this one exists.
    pub fn has_previous(&self) -> bool {
        self.index > 1
    }

    /// Returns the record at a 1-based row number.
    pub fn row(&self, row: usize) -> Option<&ArtworkRecord> {
        row.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// Returns `true` if a record with this id is on the page.
    pub fn contains(&self, id: u64) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Iterates the record ids in row order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
