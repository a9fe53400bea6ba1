//! Page-number pagination over collection endpoints
//!
//! Pages are requested one after another with a fixed page size. A page
//! shorter than the page size ends the walk; there is no total-count check,
//! so a short page in the middle of a collection would end it early.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::client::RequestOptions;
use crate::{Error, GitHubClient, Result};

/// Items requested per page
pub const PAGE_SIZE: usize = 100;

impl GitHubClient {
    /// Fetch every page of a collection endpoint, in upstream order
    ///
    /// The endpoint may already carry query parameters; `page` and
    /// `per_page` are replaced. The first failing page fails the whole
    /// fetch and the pages gathered so far are dropped.
    pub async fn paginate<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let mut all_items: Vec<T> = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self.page_url(endpoint, page)?;
            let items: Vec<T> = self.request(&url, &RequestOptions::default()).await?;
            let count = items.len();

            debug!(endpoint, page, count, "Fetched page");
            all_items.extend(items);

            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!(
            endpoint,
            pages = page,
            total = all_items.len(),
            "Finished pagination"
        );
        Ok(all_items)
    }

    /// Absolute URL of one page of `endpoint`
    pub(crate) fn page_url(&self, endpoint: &str, page: u32) -> Result<String> {
        let resolved = self.resolve_url(endpoint);
        let mut url = Url::parse(&resolved)
            .map_err(|e| Error::Parse(format!("Invalid endpoint URL {}: {}", resolved, e)))?;

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "page" && k != "per_page")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string());

        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{mock_client, API};
    use crate::http::HttpResponse;
    use crate::Error;
    use serde_json::json;

    fn numbers(range: std::ops::Range<u64>) -> serde_json::Value {
        json!(range.collect::<Vec<_>>())
    }

    #[test]
    fn test_page_url_adds_paging_params() {
        let (client, _) = mock_client();
        assert_eq!(
            client.page_url("/repos/acme/api/branches", 1).unwrap(),
            format!("{}/repos/acme/api/branches?per_page=100&page=1", API)
        );
    }

    #[test]
    fn test_page_url_keeps_other_params_and_replaces_paging() {
        let (client, _) = mock_client();
        assert_eq!(
            client
                .page_url("/repos/acme/api/issues?state=all&page=9&per_page=5", 3)
                .unwrap(),
            format!("{}/repos/acme/api/issues?state=all&per_page=100&page=3", API)
        );
    }

    #[tokio::test]
    async fn test_stops_on_short_page() {
        let (client, transport) = mock_client();
        let base = format!("{}/orgs/acme/repos?type=all&per_page=100", API);
        transport.push_json(format!("{}&page=1", base), numbers(0..100));
        transport.push_json(format!("{}&page=2", base), numbers(100..200));
        transport.push_json(format!("{}&page=3", base), numbers(200..237));

        let items: Vec<u64> = client.paginate("/orgs/acme/repos?type=all").await.unwrap();
        assert_eq!(items.len(), 237);
        assert_eq!(items, (0..237).collect::<Vec<_>>());
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn test_stops_on_empty_page() {
        let (client, transport) = mock_client();
        let base = format!("{}/orgs/acme/repos?per_page=100", API);
        transport.push_json(format!("{}&page=1", base), numbers(0..100));
        transport.push_json(format!("{}&page=2", base), numbers(100..200));
        transport.push_json(format!("{}&page=3", base), numbers(200..300));
        transport.push_json(format!("{}&page=4", base), json!([]));

        let items: Vec<u64> = client.paginate("/orgs/acme/repos").await.unwrap();
        assert_eq!(items.len(), 300);
        assert_eq!(transport.request_count(), 4);
    }

    #[tokio::test]
    async fn test_failure_discards_earlier_pages() {
        let (client, transport) = mock_client();
        let base = format!("{}/orgs/acme/repos?per_page=100", API);
        transport.push_json(format!("{}&page=1", base), numbers(0..100));
        transport.push_response(
            format!("{}&page=2", base),
            HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: br#"{"message":"Server Error"}"#.to_vec(),
            },
        );

        let err = client.paginate::<u64>("/orgs/acme/repos").await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 500, .. }));
        assert_eq!(transport.request_count(), 2);
    }
}
