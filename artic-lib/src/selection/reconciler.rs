//! Selection state machine.

use log::warn;

use super::SelectionSet;
use crate::api::Page;
use crate::error::Error;
use crate::error::SelectionError;
use crate::model::ArtworkRecord;

/// Inputs to the [`Reconciler`].
#[derive(Debug, Clone)]
pub enum SelectionEvent {
    /// A new page replaced the current one.
    PageLoaded(Page),
    /// The table's multi-select produced a new chosen list for the current page.
    SelectionChanged(Vec<ArtworkRecord>),
    /// The row-number form was submitted (1-based).
    RowSelected(usize),
}

/// Holds the current page, the durable selection set and the visible selection.
///
/// Invariant: the visible selection is always a subset of the selection set
/// restricted to the current page's ids.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    selection: SelectionSet,
    page: Option<Page>,
    visible: Vec<ArtworkRecord>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing selection set with no page loaded.
    pub fn with_selection(selection: SelectionSet) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    /// Applies an event.
    ///
    /// Only [`SelectionEvent::RowSelected`] can fail; a failed event leaves
    /// all state untouched.
    pub fn transition(&mut self, event: SelectionEvent) -> Result<(), Error> {
        match event {
            SelectionEvent::PageLoaded(page) => self.page_loaded(page),
            SelectionEvent::SelectionChanged(chosen) => self.selection_changed(chosen),
            SelectionEvent::RowSelected(row) => {
                self.select_row(row)?;
            }
        }
        Ok(())
    }

    /// Replaces the current page and recomputes the visible selection.
    ///
    /// The selection set is read, never written.
    pub fn page_loaded(&mut self, page: Page) {
        self.visible = self.selection.project(&page);
        self.page = Some(page);
    }

    /// Replaces the current page's part of the selection set with `chosen`.
    ///
    /// Records on other pages are untouched. Duplicate ids in `chosen`
    /// collapse, last one wins. Records not on the current page are ignored.
    pub fn selection_changed(&mut self, chosen: Vec<ArtworkRecord>) {
        let Some(page) = &self.page else {
            if !chosen.is_empty() {
                warn!("selection change with no page loaded, ignoring {} records", chosen.len());
            }
            return;
        };

        let mut on_page: Vec<ArtworkRecord> = Vec::with_capacity(chosen.len());
        for record in chosen {
            if !page.contains(record.id) {
                warn!("record {} is not on page {}, ignoring", record.id, page.index());
                continue;
            }
            match on_page.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => on_page.push(record),
            }
        }

        self.selection.remove_page(page);
        for record in on_page {
            self.selection.upsert(record);
        }
        self.visible = self.selection.project(page);
    }

    /// Selects the record at a 1-based row of the current page.
    ///
    /// The record is upserted into the selection set and becomes the only
    /// visibly selected row. Fails with [`SelectionError::InvalidRow`] if the
    /// row is outside the current page, or no page is loaded.
    pub fn select_row(&mut self, row: usize) -> Result<&ArtworkRecord, Error> {
        let target = match &self.page {
            Some(page) => page.row(row).cloned().ok_or(SelectionError::InvalidRow {
                row,
                rows: page.len(),
            })?,
            None => return Err(SelectionError::InvalidRow { row, rows: 0 }.into()),
        };

        self.selection.upsert(target.clone());
        self.visible = vec![target];
        Ok(&self.visible[0])
    }

    /// Empties the selection set and the visible selection.
    pub fn clear_all(&mut self) {
        self.selection.clear();
        self.visible.clear();
    }

    /// Returns the durable selection set.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Returns the visible selection in row order.
    pub fn visible(&self) -> &[ArtworkRecord] {
        &self.visible
    }

    /// Returns the current page, if one has been loaded.
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Returns `true` if the record is shown as selected on the current page.
    pub fn is_selected(&self, id: u64) -> bool {
        self.visible.iter().any(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: u32) -> Page {
        let first = u64::from(index - 1) * 12 + 1;
        let records = (first..first + 12)
            .map(|id| ArtworkRecord::new(id).with_title(format!("Artwork {id}")))
            .collect();
        Page::new(index, 12, records, 120)
    }

    fn records(page: &Page, ids: &[u64]) -> Vec<ArtworkRecord> {
        page.records()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect()
    }

    fn visible_ids(reconciler: &Reconciler) -> Vec<u64> {
        reconciler.visible().iter().map(|r| r.id).collect()
    }

    fn selected_ids(reconciler: &Reconciler) -> Vec<u64> {
        reconciler.selection().ids().collect()
    }

    fn assert_visible_subset(reconciler: &Reconciler) {
        let page = reconciler.page().unwrap();
        for record in reconciler.visible() {
            assert!(page.contains(record.id), "{} not on page", record.id);
            assert!(reconciler.selection().contains(record.id), "{} not selected", record.id);
        }
    }

    #[test]
    fn test_cross_page_scenario() {
        let mut reconciler = Reconciler::new();

        let page1 = page(1);
        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[3, 7]));

        let page2 = page(2);
        reconciler.page_loaded(page2.clone());
        assert!(reconciler.visible().is_empty());
        reconciler.selection_changed(records(&page2, &[15]));

        reconciler.page_loaded(page(1));
        assert_eq!(visible_ids(&reconciler), vec![3, 7]);
        assert_eq!(selected_ids(&reconciler), vec![3, 7, 15]);
        assert_visible_subset(&reconciler);
    }

    #[test]
    fn test_round_trip_reproduces_visible_selection() {
        let mut reconciler = Reconciler::new();
        let page1 = page(1);
        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[12, 1, 5]));
        let before = reconciler.visible().to_vec();

        reconciler.page_loaded(page(2));
        reconciler.page_loaded(page(3));
        reconciler.page_loaded(page(1));

        assert_eq!(reconciler.visible(), before.as_slice());
    }

    #[test]
    fn test_page_load_does_not_mutate_selection() {
        let mut reconciler = Reconciler::new();
        let page1 = page(1);
        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[2]));
        let before = reconciler.selection().clone();

        reconciler.transition(SelectionEvent::PageLoaded(page(4))).unwrap();
        assert_eq!(reconciler.selection(), &before);
        assert_visible_subset(&reconciler);
    }

    #[test]
    fn test_empty_chosen_clears_only_current_page() {
        let mut reconciler = Reconciler::new();
        let page1 = page(1);
        let page2 = page(2);

        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[1, 2]));
        reconciler.page_loaded(page2.clone());
        reconciler.selection_changed(records(&page2, &[20]));
        reconciler.page_loaded(page1);

        reconciler.selection_changed(Vec::new());
        assert!(reconciler.visible().is_empty());
        assert_eq!(selected_ids(&reconciler), vec![20]);
    }

    #[test]
    fn test_selection_change_replaces_current_page_part() {
        let mut reconciler = Reconciler::new();
        let page1 = page(1);
        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[1, 2, 3]));
        reconciler.selection_changed(records(&page1, &[3, 4]));

        assert_eq!(visible_ids(&reconciler), vec![3, 4]);
        assert_eq!(selected_ids(&reconciler), vec![3, 4]);
    }

    #[test]
    fn test_duplicate_chosen_ids_collapse_last_wins() {
        let mut reconciler = Reconciler::new();
        reconciler.page_loaded(page(1));
        reconciler.selection_changed(vec![
            ArtworkRecord::new(6).with_title("first"),
            ArtworkRecord::new(6).with_title("second"),
        ]);

        assert_eq!(reconciler.selection().len(), 1);
        assert_eq!(reconciler.visible().len(), 1);
        assert_eq!(reconciler.visible()[0].title(), "second");
    }

    #[test]
    fn test_chosen_records_off_page_are_ignored() {
        let mut reconciler = Reconciler::new();
        reconciler.page_loaded(page(1));
        reconciler.selection_changed(vec![ArtworkRecord::new(4), ArtworkRecord::new(99)]);

        assert_eq!(selected_ids(&reconciler), vec![4]);
        assert_visible_subset(&reconciler);
    }

    #[test]
    fn test_selection_change_without_page_is_ignored() {
        let mut reconciler = Reconciler::new();
        reconciler.selection_changed(vec![ArtworkRecord::new(1)]);
        assert!(reconciler.selection().is_empty());
    }

    #[test]
    fn test_select_row_replaces_visible_selection() {
        let mut reconciler = Reconciler::new();
        let page1 = page(1);
        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[1, 2]));

        let selected = reconciler.select_row(5).unwrap();
        assert_eq!(selected.id, 5);
        assert_eq!(visible_ids(&reconciler), vec![5]);
        assert_eq!(selected_ids(&reconciler), vec![1, 2, 5]);
        assert_visible_subset(&reconciler);
    }

    #[test]
    fn test_select_row_is_idempotent() {
        let mut reconciler = Reconciler::new();
        reconciler.page_loaded(page(2));

        reconciler.select_row(3).unwrap();
        let before = reconciler.selection().len();
        reconciler.select_row(3).unwrap();

        assert_eq!(reconciler.selection().len(), before);
        assert_eq!(selected_ids(&reconciler), vec![15]);
    }

    #[test]
    fn test_select_row_upserts_stale_copy() {
        let mut reconciler = Reconciler::with_selection(
            [ArtworkRecord::new(1).with_title("stale")].into_iter().collect(),
        );
        reconciler.page_loaded(page(1));

        reconciler.select_row(1).unwrap();
        assert_eq!(reconciler.selection().get(1).map(|r| r.title()), Some("Artwork 1"));
    }

    #[test]
    fn test_select_row_out_of_range_changes_nothing() {
        let mut reconciler = Reconciler::new();
        let page1 = page(1);
        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[7]));
        let selection = reconciler.selection().clone();
        let visible = reconciler.visible().to_vec();

        let err = reconciler.transition(SelectionEvent::RowSelected(13)).unwrap_err();
        assert!(err.is_invalid_row());
        assert!(reconciler.select_row(0).unwrap_err().is_invalid_row());

        assert_eq!(reconciler.selection(), &selection);
        assert_eq!(reconciler.visible(), visible.as_slice());
    }

    #[test]
    fn test_select_row_without_page() {
        let mut reconciler = Reconciler::new();
        let err = reconciler.select_row(1).unwrap_err();
        assert!(matches!(
            err,
            Error::Selection(SelectionError::InvalidRow { row: 1, rows: 0 })
        ));
    }

    #[test]
    fn test_is_selected_follows_current_page() {
        let mut reconciler = Reconciler::new();
        let page1 = page(1);
        reconciler.page_loaded(page1.clone());
        reconciler.selection_changed(records(&page1, &[4]));
        assert!(reconciler.is_selected(4));
        assert!(!reconciler.is_selected(5));

        reconciler.page_loaded(page(2));
        assert!(!reconciler.is_selected(4));
        assert!(reconciler.selection().contains(4));
    }

    #[test]
    fn test_clear_all() {
        let mut reconciler = Reconciler::new();
        reconciler.page_loaded(page(1));
        reconciler.select_row(1).unwrap();

        reconciler.clear_all();
        assert!(reconciler.selection().is_empty());
        assert!(reconciler.visible().is_empty());
        assert!(reconciler.page().is_some());
    }
}
