//! Artworks listing endpoint.

use log::debug;
use serde::Deserialize;
use url::Url;

use super::Page;
use crate::ArticClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::ARTWORK_FIELDS;
use crate::model::ArtworkRecord;

impl ArticClient {
    /// Fetches one page of the artworks listing.
    ///
    /// `index` is 1-based. Fails with a network-class error on transport
    /// failure, timeout or non-success status, and with a format-class error
    /// if the body is not `{ data: [...], pagination: { total } }`.
    pub async fn fetch_page(&self, index: u32, size: u32) -> Result<Page, Error> {
        if index == 0 {
            return Err(Error::InvalidPage("page index must be at least 1".to_string()));
        }
        if size == 0 {
            return Err(Error::InvalidPage("page size must be at least 1".to_string()));
        }

        let url = self.artworks_url(index, size)?;
        debug!("fetching artworks page {} (limit {})", index, size);

        let response = self.request(url.as_str()).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout()))?;

        let listing: ListingResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.clone()))?;

        debug!(
            "artworks page {}: {} records, {} total",
            index,
            listing.data.len(),
            listing.pagination.total
        );

        Ok(Page::new(index, size, listing.data, listing.pagination.total))
    }

    /// Builds the listing URL for a page.
    pub(crate) fn artworks_url(&self, index: u32, size: u32) -> Result<Url, Error> {
        let base = format!("{}/artworks", self.base_url().trim_end_matches('/'));
        let mut url = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &index.to_string());
            query.append_pair("limit", &size.to_string());
            if self.restricts_fields() {
                query.append_pair("fields", &ARTWORK_FIELDS.join(","));
            }
        }

        Ok(url)
    }
}

/// Listing response body.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: Vec<ArtworkRecord>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(restrict_fields: bool) -> ArticClient {
        ArticClient::builder()
            .url("https://api.artic.edu/api/v1/")
            .restrict_fields(restrict_fields)
            .build()
            .unwrap()
    }

    #[test]
    fn test_artworks_url() {
        let url = client(false).artworks_url(3, 12).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.artic.edu/api/v1/artworks?page=3&limit=12"
        );
    }

    #[test]
    fn test_artworks_url_with_fields() {
        let url = client(true).artworks_url(1, 12).unwrap();
        let fields = url
            .query_pairs()
            .find(|(k, _)| k == "fields")
            .map(|(_, v)| v.into_owned());
        assert_eq!(
            fields.as_deref(),
            Some("id,title,place_of_origin,artist_display,inscriptions,date_start,date_end")
        );
    }

    #[tokio::test]
    async fn test_zero_page_rejected_without_request() {
        let err = client(true).fetch_page(0, 12).await.unwrap_err();
        assert!(matches!(err, Error::InvalidPage(_)));

        let err = client(true).fetch_page(1, 0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidPage(_)));
    }

    #[test]
    fn test_listing_missing_pagination_is_parse_error() {
        let result: Result<ListingResponse, _> = serde_json::from_str(r#"{"data": []}"#);
        assert!(result.is_err());
    }
}
