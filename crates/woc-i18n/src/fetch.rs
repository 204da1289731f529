//! Transport seam for translation resources.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Retrieves the raw body of a translation resource.
///
/// Implementations run on a single-threaded event loop, so the returned
/// futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait ResourceFetcher {
    /// Fetch the body at `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::FetchError`] for non-success statuses and
    /// transport failures.
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;
}

#[async_trait(?Send)]
impl<T> ResourceFetcher for std::rc::Rc<T>
where
    T: ResourceFetcher + ?Sized,
{
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        (**self).fetch_text(url).await
    }
}
