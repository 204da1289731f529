//! HTTP resource fetcher backed by `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::Request;
use woc_i18n::{FetchError, FetchResult, ResourceFetcher};

/// Fetches translation files relative to the current page.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HttpFetcher;

#[async_trait(?Send)]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let transport = |err: gloo_net::Error| FetchError::Transport {
            url: url.to_string(),
            detail: err.to_string(),
        };
        let response = Request::get(url).send().await.map_err(transport)?;
        if !response.ok() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        response.text().await.map_err(transport)
    }
}
