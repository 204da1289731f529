//! Fake resource fetchers.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::oneshot;
use woc_i18n::{FetchError, FetchResult, ResourceFetcher};

use crate::fixtures::{resource_path, sample_locales};

/// Fetcher answering from a fixed URL map; unknown URLs return 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, FetchResult<String>>,
    calls: RefCell<Vec<String>>,
}

impl StaticFetcher {
    /// Empty fetcher (every request is a 404).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher serving every sample locale at its relative path.
    #[must_use]
    pub fn with_sample_locales() -> Self {
        sample_locales()
            .into_iter()
            .fold(Self::new(), |fetcher, (tag, body)| fetcher.with_locale(tag, body))
    }

    /// Serve `body` for `locale` at its relative path.
    #[must_use]
    pub fn with_locale(self, locale: &str, body: &str) -> Self {
        let url = resource_path(locale);
        self.with_response(&url, Ok(body.to_string()))
    }

    /// Serve an arbitrary response for `url`.
    #[must_use]
    pub fn with_response(mut self, url: &str, response: FetchResult<String>) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Fail requests for `url` at the transport level.
    #[must_use]
    pub fn with_transport_failure(self, url: &str) -> Self {
        let failure = Err(FetchError::Transport {
            url: url.to_string(),
            detail: "connection reset".to_string(),
        });
        self.with_response(url, failure)
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        self.calls.borrow_mut().push(url.to_string());
        self.responses.get(url).cloned().unwrap_or_else(|| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        })
    }
}

/// Fetcher whose responses are released by the test, one request at a time.
///
/// Used to reproduce overlapping switches whose fetches resolve out of order.
#[derive(Debug, Default)]
pub struct GatedFetcher {
    waiting: RefCell<HashMap<String, VecDeque<oneshot::Sender<FetchResult<String>>>>>,
}

impl GatedFetcher {
    /// Fetcher with no outstanding requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request for `url` is waiting for a response.
    #[must_use]
    pub fn is_waiting(&self, url: &str) -> bool {
        self.waiting
            .borrow()
            .get(url)
            .is_some_and(|queue| !queue.is_empty())
    }

    /// Yield until a request for `url` is waiting.
    pub async fn wait_for(&self, url: &str) {
        while !self.is_waiting(url) {
            tokio::task::yield_now().await;
        }
    }

    /// Answer the oldest waiting request for `url`.
    ///
    /// Returns `false` when nothing was waiting.
    pub fn release(&self, url: &str, response: FetchResult<String>) -> bool {
        let sender = self
            .waiting
            .borrow_mut()
            .get_mut(url)
            .and_then(VecDeque::pop_front);
        sender.is_some_and(|sender| sender.send(response).is_ok())
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for GatedFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let (sender, receiver) = oneshot::channel();
        self.waiting
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(sender);
        receiver.await.unwrap_or_else(|_| {
            Err(FetchError::Transport {
                url: url.to_string(),
                detail: "request abandoned".to_string(),
            })
        })
    }
}
