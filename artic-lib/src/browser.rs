//! Browser controller: page navigation on top of the selection reconciler.
//!
//! Every navigation issues a [`FetchTicket`]. Only the most recently issued
//! ticket may change state when its fetch completes; older completions are
//! dropped, so a slow response can never overwrite a newer page.
//!
//! The fetch itself is done by a [`PageFetcher`], which is `Send` and can be
//! moved into a spawned task while the controller keeps handling input.
//!
//! ```ignore
//! let mut browser = Browser::new(client, 12);
//!
//! if let Some(ticket) = browser.request(2) {
//!     let result = browser.fetcher().fetch(ticket).await;
//!     browser.complete(ticket, result);
//! }
//! ```

use std::sync::Arc;

use log::debug;
use log::error;

use crate::api::Page;
use crate::api::PageSource;
use crate::error::Error;
use crate::model::ArtworkRecord;
use crate::selection::Reconciler;
use crate::selection::SelectionSet;

/// Identifies one issued page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
}

impl FetchTicket {
    /// Returns the 1-based page index this ticket fetches.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the generation number. Later tickets have larger numbers.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened when a fetch result was handed back.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The page replaced the current one.
    Applied,
    /// A newer fetch was issued since; the result was dropped.
    Stale,
    /// The fetch failed; the previous page and selection are unchanged.
    Failed(Error),
    /// A fetch for the same page is already in flight; nothing was issued.
    InFlight,
}

impl LoadOutcome {
    /// Returns `true` if the page was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of asking for the next or previous page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// A fetch should be started for this ticket.
    Issued(FetchTicket),
    /// That page is already being fetched.
    Loading(u32),
    /// There is no page in that direction, or no page is loaded.
    NoPage,
}

impl Navigation {
    /// Returns the issued ticket, if any.
    pub fn ticket(self) -> Option<FetchTicket> {
        match self {
            Self::Issued(ticket) => Some(ticket),
            _ => None,
        }
    }
}

/// Fetches pages for a [`Browser`] without borrowing it.
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn PageSource>,
    page_size: u32,
}

impl PageFetcher {
    /// Performs the fetch described by `ticket`.
    pub async fn fetch(&self, ticket: FetchTicket) -> Result<Page, Error> {
        self.source.fetch_page(ticket.page, self.page_size).await
    }
}

/// Owns the reconciler and sequences page loads.
pub struct Browser {
    source: Arc<dyn PageSource>,
    page_size: u32,
    reconciler: Reconciler,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl Browser {
    /// Creates a browser over `source` with `page_size` rows per page.
    pub fn new(source: impl PageSource + 'static, page_size: u32) -> Self {
        Self::with_shared_source(Arc::new(source), page_size)
    }

    /// Creates a browser over an already shared source.
    pub fn with_shared_source(source: Arc<dyn PageSource>, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            reconciler: Reconciler::new(),
            generation: 0,
            in_flight: None,
        }
    }

    /// Issues a ticket for `page`.
    ///
    /// Returns `None` if the same page is already being fetched. Issuing a
    /// ticket for any other page supersedes the one in flight.
    pub fn request(&mut self, page: u32) -> Option<FetchTicket> {
        let page = page.max(1);
        if let Some(pending) = self.in_flight
            && pending.page == page
        {
            debug!("page {} already in flight (generation {})", page, pending.generation);
            return None;
        }

        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            page,
        };
        if let Some(superseded) = self.in_flight.replace(ticket) {
            debug!(
                "page {} (generation {}) superseded by page {}",
                superseded.page, superseded.generation, page
            );
        }
        Some(ticket)
    }

    /// Issues a ticket for the page after the current one, if there is one.
    pub fn request_next(&mut self) -> Navigation {
        let next = match self.reconciler.page() {
            Some(page) if page.has_next() => page.index() + 1,
            _ => return Navigation::NoPage,
        };
        self.navigate_to(next)
    }

    /// Issues a ticket for the page before the current one, if there is one.
    pub fn request_previous(&mut self) -> Navigation {
        let previous = match self.reconciler.page() {
            Some(page) if page.has_previous() => page.index() - 1,
            _ => return Navigation::NoPage,
        };
        self.navigate_to(previous)
    }

    fn navigate_to(&mut self, page: u32) -> Navigation {
        match self.request(page) {
            Some(ticket) => Navigation::Issued(ticket),
            None => Navigation::Loading(page),
        }
    }

    /// Returns a fetcher that can run the fetch for a ticket.
    pub fn fetcher(&self) -> PageFetcher {
        PageFetcher {
            source: self.source.clone(),
            page_size: self.page_size,
        }
    }

    /// Hands back the result of a ticket's fetch.
    ///
    /// Results for anything but the latest ticket are discarded. Errors are
    /// logged and leave the current page and selection untouched.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Page, Error>) -> LoadOutcome {
        if self.in_flight != Some(ticket) {
            debug!(
                "discarding stale result for page {} (generation {})",
                ticket.page, ticket.generation
            );
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                debug!("applying page {} ({} records)", page.index(), page.len());
                self.reconciler.page_loaded(page);
                LoadOutcome::Applied
            }
            Err(e) => {
                error!("failed to load page {}: {}", ticket.page, e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Requests, fetches and applies `page` in one step.
    pub async fn load(&mut self, page: u32) -> LoadOutcome {
        let Some(ticket) = self.request(page) else {
            return LoadOutcome::InFlight;
        };
        let result = self.fetcher().fetch(ticket).await;
        self.complete(ticket, result)
    }

    /// Re-fetches the current page, or the first page if none is loaded.
    pub async fn reload(&mut self) -> LoadOutcome {
        let page = self.current_page().unwrap_or(1);
        self.load(page).await
    }

    /// Applies a multi-select change for the current page.
    ///
    /// Never triggers a fetch.
    pub fn change_selection(&mut self, chosen: Vec<ArtworkRecord>) {
        self.reconciler.selection_changed(chosen);
    }

    /// Selects a 1-based row of the current page.
    pub fn select_row(&mut self, row: usize) -> Result<&ArtworkRecord, Error> {
        self.reconciler.select_row(row)
    }

    /// Clears every selection on every page.
    pub fn clear_selection(&mut self) {
        self.reconciler.clear_all();
    }

    /// Returns the index of the page currently shown.
    pub fn current_page(&self) -> Option<u32> {
        self.reconciler.page().map(Page::index)
    }

    /// Returns the page currently shown.
    pub fn page(&self) -> Option<&Page> {
        self.reconciler.page()
    }

    /// Returns the ticket currently in flight, if any.
    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// Returns the durable selection set.
    pub fn selection(&self) -> &SelectionSet {
        self.reconciler.selection()
    }

    /// Returns the visible selection for the current page.
    pub fn visible(&self) -> &[ArtworkRecord] {
        self.reconciler.visible()
    }
}
