//! Page envelope returned by collection resources.

use serde::Deserialize;

/// One page of a collection response.
///
/// `next_href` is taken literally: when present the client requests exactly
/// that link next, when absent the sequence is complete.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.query::<Package>().page_size(100).pages();
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///
///     for package in page.items() {
///         println!("{}", package.id);
///     }
///
///     if let Some(link) = page.next_href() {
///         println!("More results available: {}", link);
///     }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    href: String,
    #[serde(default)]
    next_href: Option<String>,
    #[serde(default, alias = "prefHref")]
    prev_href: Option<String>,
    start: u64,
    num: u64,
    total: u64,
    items: Vec<T>,
}

impl<T> PageEnvelope<T> {
    /// Returns the link of this page.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Returns the link of the next page, if there is one.
    pub fn next_href(&self) -> Option<&str> {
        self.next_href.as_deref()
    }

    /// Returns the link of the previous page, if there is one.
    pub fn prev_href(&self) -> Option<&str> {
        self.prev_href.as_deref()
    }

    /// Offset of the first item of this page.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Requested page size.
    pub fn num(&self) -> u64 {
        self.num
    }

    /// Total number of matching rows across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns a reference to the items in this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are more pages available.
    pub fn has_more(&self) -> bool {
        self.next_href.is_some()
    }
}
