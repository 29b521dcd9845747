//! Page source abstraction.

use async_trait::async_trait;

use super::Page;
use crate::ArticClient;
use crate::error::Error;

/// Something that can produce a page of artworks.
///
/// Implemented by [`ArticClient`]. The browser controller only talks to
/// this trait, so it can be driven by an in-memory source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the 1-based page `index` with `size` records per page.
    async fn fetch_page(&self, index: u32, size: u32) -> Result<Page, Error>;
}

#[async_trait]
impl PageSource for ArticClient {
    async fn fetch_page(&self, index: u32, size: u32) -> Result<Page, Error> {
        ArticClient::fetch_page(self, index, size).await
    }
}
