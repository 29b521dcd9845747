//! Durable selection set.

use std::collections::BTreeMap;

use crate::api::Page;
use crate::model::ArtworkRecord;

/// All selected records across every page visited, keyed by id.
///
/// Set semantics: inserting a record whose id is already present replaces
/// the stored copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    records: BTreeMap<u64, ArtworkRecord>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record with the same id.
    ///
    /// Returns the previously stored copy, if any.
    pub fn upsert(&mut self, record: ArtworkRecord) -> Option<ArtworkRecord> {
        self.records.insert(record.id, record)
    }

    /// Removes every record whose id is on `page`.
    pub fn remove_page(&mut self, page: &Page) {
        self.records.retain(|id, _| !page.contains(*id));
    }

    /// Returns the stored copies of the records on `page`, in row order.
    pub fn project(&self, page: &Page) -> Vec<ArtworkRecord> {
        page.ids()
            .filter_map(|id| self.records.get(&id).cloned())
            .collect()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.records.contains_key(&id)
    }

    pub fn get(&self, id: u64) -> Option<&ArtworkRecord> {
        self.records.get(&id)
    }

    /// Iterates the selected records ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &ArtworkRecord> + '_ {
        self.records.values()
    }

    /// Iterates the selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.keys().copied()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ArtworkRecord> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ArtworkRecord>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for record in iter {
            set.upsert(record);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_last_write_wins() {
        let mut set = SelectionSet::new();
        set.upsert(ArtworkRecord::new(7).with_title("old"));
        let previous = set.upsert(ArtworkRecord::new(7).with_title("new"));

        assert_eq!(previous.map(|r| r.title), Some(Some("old".to_string())));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(7).map(|r| r.title()), Some("new"));
    }

    #[test]
    fn test_project_uses_page_order_and_stored_copies() {
        let set: SelectionSet = [
            ArtworkRecord::new(9).with_title("stored"),
            ArtworkRecord::new(2),
            ArtworkRecord::new(40),
        ]
        .into_iter()
        .collect();
        let page = Page::new(
            1,
            12,
            vec![
                ArtworkRecord::new(9).with_title("fresh"),
                ArtworkRecord::new(5),
                ArtworkRecord::new(2),
            ],
            3,
        );

        let visible = set.project(&page);
        assert_eq!(visible.iter().map(|r| r.id).collect::<Vec<_>>(), vec![9, 2]);
        assert_eq!(visible[0].title(), "stored");
    }

    #[test]
    fn test_remove_page_keeps_other_pages() {
        let mut set: SelectionSet = [1, 2, 15].into_iter().map(ArtworkRecord::new).collect();
        let page = Page::new(1, 12, (1..=12).map(ArtworkRecord::new).collect(), 24);

        set.remove_page(&page);
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![15]);
    }
}
