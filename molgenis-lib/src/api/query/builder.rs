//! Collection query builder.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::MolgenisClient;
use crate::api::request::Resource;
use crate::error::Error;
use crate::model::Entity;

use super::Filter;
use super::Sort;
use super::pages::EntityPages;
use super::stream::EntityStream;

/// Builder for queries against a collection resource (`api/v2/<entity>`).
///
/// Use [`MolgenisClient::query`] for typed entities or
/// [`MolgenisClient::query_as`] to decode any entity type into your own shape.
/// Nothing is requested until the pages or the stream are polled.
///
/// # Example
///
/// ```ignore
/// let biobanks: Vec<Biobank> = client
///     .query::<Biobank>()
///     .filter(Filter::eq("country", "NL"))
///     .sort(Sort::asc("name"))
///     .page_size(100)
///     .collect_all()
///     .await?;
/// ```
pub struct QueryBuilder<T> {
    client: MolgenisClient,
    entity: String,
    filter: Option<Filter>,
    attrs: Vec<String>,
    sort: Option<Sort>,
    page_size: Option<u32>,
    start: Option<u64>,
    cancel: CancellationToken,
    _item: PhantomData<fn() -> T>,
}

impl<T> QueryBuilder<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(client: MolgenisClient, entity: impl Into<String>) -> Self {
        Self {
            client,
            entity: entity.into(),
            filter: None,
            attrs: Vec::new(),
            sort: None,
            page_size: None,
            start: None,
            cancel: CancellationToken::new(),
            _item: PhantomData,
        }
    }

    /// Restricts the rows with an RSQL filter (`q=`).
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Specifies which attributes to return (`attrs=`).
    ///
    /// If not called, all attributes are returned.
    pub fn attrs(mut self, attrs: &[&str]) -> Self {
        self.attrs = attrs.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the ordering of results (`sort=`).
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the number of rows per page (`num=`).
    ///
    /// The default is determined by the server (100).
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Skips the first `start` rows (`start=`).
    pub fn start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Ties the query to an external cancellation token.
    ///
    /// Once the token is cancelled no further page is requested.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns the entity type this query reads.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the query parameters of the first page request.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(filter) = &self.filter {
            params.push(("q", filter.to_rsql()));
        }
        if !self.attrs.is_empty() {
            params.push(("attrs", self.attrs.join(",")));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.to_param()));
        }
        if let Some(num) = self.page_size {
            params.push(("num", num.to_string()));
        }
        if let Some(start) = self.start {
            params.push(("start", start.to_string()));
        }
        params
    }

    /// Builds the URL of the first page.
    pub(crate) fn build_url(&self) -> Result<Url, Error> {
        let mut url = Resource::collection(self.entity.as_str()).resolve(self.client.base_url())?;
        let params = self.query_params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// Converts this query into an async iterator over pages.
    pub fn pages(self) -> EntityPages<T> {
        let start = self.build_url();
        EntityPages::new(self.client, self.entity, start, self.cancel)
    }

    /// Converts this query into a stream of items across all pages.
    pub fn stream(self) -> EntityStream<T> {
        EntityStream::new(self.pages())
    }

    /// Reads every page and returns all items.
    ///
    /// Stops at the first failing page and returns its error.
    pub async fn collect_all(self) -> Result<Vec<T>, Error> {
        self.stream().collect_all().await
    }

    /// Returns the first matching row, fetching a single one-row page.
    pub async fn first(self) -> Result<Option<T>, Error> {
        let builder = Self {
            page_size: Some(1),
            ..self
        };
        let mut pages = builder.pages();
        match pages.next().await {
            Some(Ok(page)) => Ok(page.into_items().into_iter().next()),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    /// Returns the number of matching rows as reported by the server.
    pub async fn count(self) -> Result<u64, Error> {
        let builder = Self {
            page_size: Some(1),
            ..self
        };
        let mut pages = builder.pages();
        match pages.next().await {
            Some(Ok(page)) => Ok(page.total()),
            Some(Err(e)) => Err(e),
            None => Ok(0),
        }
    }
}

impl MolgenisClient {
    /// Starts a query over all rows of `T`'s entity type.
    pub fn query<T: Entity>(&self) -> QueryBuilder<T> {
        QueryBuilder::new(self.clone(), T::ENTITY_NAME)
    }

    /// Starts a query over `entity`, decoding every row as `T`.
    ///
    /// Use [`Row`](crate::model::Row) when the shape is not known up front.
    pub fn query_as<T>(&self, entity: impl Into<String>) -> QueryBuilder<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        QueryBuilder::new(self.clone(), entity)
    }
}
