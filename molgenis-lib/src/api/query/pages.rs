//! Async iterator over the pages of a collection query.

use std::marker::PhantomData;
use std::mem;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::MolgenisClient;
use crate::api::request::Resource;
use crate::error::Error;
use crate::model::codec;
use crate::transport::ApiRequest;

use super::PageEnvelope;

/// Where the iterator stands.
enum Cursor {
    /// The first page has not been requested yet.
    Start(Url),
    /// The previous page pointed at this link.
    Next(Url),
    /// The query could not be turned into a URL; reported on the first poll.
    Invalid(Error),
    Completed,
    Failed,
    Cancelled,
}

/// Async iterator that yields pages of a collection query.
///
/// Automatically follows `nextHref` for pagination. Every page request is
/// built when it is issued, so it carries the session token as it is at
/// that moment. After the last page or the first error nothing more is
/// requested.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.query::<EntityType>().page_size(100).pages();
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for entity_type in page.items() {
///         println!("{}", entity_type.id);
///     }
/// }
/// ```
pub struct EntityPages<T> {
    client: MolgenisClient,
    entity: String,
    cursor: Cursor,
    cancel: CancellationToken,
    _item: PhantomData<fn() -> T>,
}

impl<T> EntityPages<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(
        client: MolgenisClient,
        entity: String,
        start: Result<Url, Error>,
        cancel: CancellationToken,
    ) -> Self {
        let cursor = match start {
            Ok(url) => Cursor::Start(url),
            Err(e) => Cursor::Invalid(e),
        };
        Self {
            client,
            entity,
            cursor,
            cancel,
            _item: PhantomData,
        }
    }

    /// Returns the token that stops this iterator.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Returns `true` once no further page will be requested.
    pub fn is_done(&self) -> bool {
        matches!(
            self.cursor,
            Cursor::Completed | Cursor::Failed | Cursor::Cancelled
        )
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed or the query was
    /// cancelled.
    pub async fn next(&mut self) -> Option<Result<PageEnvelope<T>, Error>> {
        let url = match mem::replace(&mut self.cursor, Cursor::Failed) {
            Cursor::Start(url) | Cursor::Next(url) => url,
            Cursor::Invalid(e) => return Some(Err(e)),
            Cursor::Completed => {
                self.cursor = Cursor::Completed;
                return None;
            }
            Cursor::Cancelled => {
                self.cursor = Cursor::Cancelled;
                return None;
            }
            Cursor::Failed => return None,
        };

        if self.cancel.is_cancelled() {
            tracing::debug!(entity = %self.entity, "Query cancelled");
            self.cursor = Cursor::Cancelled;
            return None;
        }

        let request = self.client.request_for_url(Method::GET, url);
        let page = match self.fetch(request).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(entity = %self.entity, error = %e, "Page request failed");
                return Some(Err(e));
            }
        };

        tracing::debug!(
            entity = %self.entity,
            start = page.start(),
            count = page.len(),
            total = page.total(),
            has_next = page.has_more(),
            "Fetched page"
        );

        self.cursor = match page.next_href() {
            Some(href) => match Resource::Link(href.to_string()).resolve(self.client.base_url()) {
                Ok(url) => Cursor::Next(url),
                Err(e) => Cursor::Invalid(e),
            },
            None => Cursor::Completed,
        };

        Some(Ok(page))
    }

    async fn fetch(&self, request: ApiRequest) -> Result<PageEnvelope<T>, Error> {
        let response = self.client.send(request).await?.error_for_status()?;
        Ok(codec::decode(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    #[tokio::test]
    async fn invalid_query_reports_once() {
        let client = MolgenisClient::new("https://molgenis.example.org").unwrap();
        let mut pages = client.query_as::<Row>("").pages();

        assert!(matches!(pages.next().await, Some(Err(Error::InvalidResource { .. }))));
        assert!(pages.next().await.is_none());
        assert!(pages.is_done());
    }

    #[tokio::test]
    async fn cancelled_before_first_poll_requests_nothing() {
        let client = MolgenisClient::new("https://molgenis.example.org").unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let mut pages = client.query_as::<Row>("demo").cancel_on(token).pages();
        assert!(pages.next().await.is_none());
        assert!(pages.next().await.is_none());
        assert!(pages.is_done());
    }
}
