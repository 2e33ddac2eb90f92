//! Item stream over all pages of a collection query.

use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

use async_stream::try_stream;
use futures::Stream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::Error;

use super::pages::EntityPages;

/// A lazy stream of items across every page of a query.
///
/// The next page is only requested once the consumer has polled past the
/// last item of the current one. Items of earlier pages stay delivered when
/// a later page fails: the stream yields the error and then ends. Dropping
/// the stream, or cancelling its token, stops any further page request and
/// ends the stream without an error.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
///
/// let mut stream = client.query::<Package>().stream();
/// while let Some(package) = stream.next().await {
///     let package = package?;
///     println!("{}", package.id);
/// }
/// ```
pub struct EntityStream<T> {
    inner: Pin<Box<dyn Stream<Item = Result<T, Error>> + Send>>,
    cancel: CancellationToken,
}

impl<T> EntityStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(mut pages: EntityPages<T>) -> Self {
        let cancel = pages.cancellation_token().clone();
        let token = cancel.clone();

        let inner = try_stream! {
            'pages: while let Some(page) = pages.next().await {
                for item in page?.into_items() {
                    if token.is_cancelled() {
                        break 'pages;
                    }
                    yield item;
                }
            }
        };

        Self {
            inner: Box::pin(inner),
            cancel,
        }
    }

    /// Stops the stream: no further page is requested and no further item
    /// is yielded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns the token that stops this stream.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Drains the stream into a vector.
    ///
    /// Returns the first error encountered; items read before it are dropped.
    /// Consume the stream directly to keep them.
    pub async fn collect_all(mut self) -> Result<Vec<T>, Error> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        tracing::debug!(count = items.len(), "Collected query results");
        Ok(items)
    }
}

impl<T> Stream for EntityStream<T> {
    type Item = Result<T, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
