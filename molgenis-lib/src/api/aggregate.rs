//! Aggregation query builder.
//!
//! The collection resource cross-tabulates rows server side when given an
//! `aggs` parameter. The result is a count matrix over the distinct values
//! of one (`x`) or two (`x`, `y`) attributes, optionally counting distinct
//! values of a third attribute instead of rows.
//!
//! # Example
//!
//! ```ignore
//! let result = client.aggregate("lifelines_subjects", "age")
//!     .y("sex")
//!     .filter(Filter::ge("age", 18))
//!     .execute::<u32, String>()
//!     .await?;
//!
//! for (y, sex) in result.y_labels.iter().enumerate() {
//!     for (x, age) in result.x_labels.iter().enumerate() {
//!         println!("{sex} {age}: {:?}", result.get(y, x));
//!     }
//! }
//! ```

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::MolgenisClient;
use crate::api::query::Filter;
use crate::api::request::Resource;
use crate::api::request::validate_entity_name;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::codec;
use crate::model::metadata::Attribute;

/// Builder for a single cross-tabulation query.
///
/// The `aggs` expression always lists its terms in the order `x`, `y`,
/// `distinct`, whatever order the builder methods were called in.
pub struct AggregateBuilder<'a> {
    client: &'a MolgenisClient,
    entity: String,
    x: String,
    y: Option<String>,
    distinct: Option<String>,
    filter: Option<Filter>,
}

impl<'a> AggregateBuilder<'a> {
    /// Creates a new aggregate builder for the given entity.
    pub(crate) fn new(client: &'a MolgenisClient, entity: String, x: String) -> Self {
        Self {
            client,
            entity,
            x,
            y: None,
            distinct: None,
            filter: None,
        }
    }

    /// Adds a second grouping attribute, making the result two dimensional.
    pub fn y(mut self, attribute: impl Into<String>) -> Self {
        self.y = Some(attribute.into());
        self
    }

    /// Counts distinct values of `attribute` instead of rows.
    pub fn distinct(mut self, attribute: impl Into<String>) -> Self {
        self.distinct = Some(attribute.into());
        self
    }

    /// Restricts the aggregated rows with an RSQL filter (`q=`).
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Renders the value of the `aggs` query parameter.
    pub fn aggs_expression(&self) -> String {
        let mut terms = vec![format!("x=={}", self.x)];
        if let Some(y) = &self.y {
            terms.push(format!("y=={y}"));
        }
        if let Some(distinct) = &self.distinct {
            terms.push(format!("distinct=={distinct}"));
        }
        terms.join(";")
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("aggs", self.aggs_expression())];
        if let Some(filter) = &self.filter {
            params.push(("q", filter.to_rsql()));
        }
        params
    }

    /// Sends the query and decodes the count matrix.
    ///
    /// `X` and `Y` are the types of the x and y labels. Fails with
    /// [`ApiError::InvalidUrl`] before sending anything when the entity or
    /// an attribute is unusable, and with a decode error when the matrix
    /// does not match the labels.
    pub async fn execute<X, Y>(self) -> Result<AggregateResult<X, Y>, Error>
    where
        X: DeserializeOwned,
        Y: DeserializeOwned,
    {
        validate_entity_name(&self.entity)
            .map_err(|e| ApiError::InvalidUrl(format!("aggregate on '{}': {e}", self.entity)))?;
        for attribute in [Some(&self.x), self.y.as_ref(), self.distinct.as_ref()]
            .into_iter()
            .flatten()
        {
            if !is_valid_attribute(attribute) {
                return Err(ApiError::InvalidUrl(format!(
                    "aggregate on '{}': invalid attribute '{attribute}'",
                    self.entity
                ))
                .into());
            }
        }

        let request = self.client.build_request(
            Method::GET,
            &Resource::collection(self.entity.as_str()),
            &self.query_params(),
        )?;
        let response = self.client.send(request).await?.error_for_status()?;
        let wire: AggregateResponse<X, Y> = codec::decode(&response.body)?;

        let result = AggregateResult::from_wire(wire, self.y.is_some())
            .map_err(|message| ApiError::decode_with_body(message, &response.body))?;

        tracing::debug!(
            entity = %self.entity,
            aggs = %self.aggs_expression(),
            columns = result.x_labels.len(),
            rows = result.matrix.len(),
            "Fetched aggregate"
        );
        Ok(result)
    }
}

/// An `aggs` term value must be a bare attribute name.
fn is_valid_attribute(attribute: &str) -> bool {
    !attribute.trim().is_empty() && !attribute.contains(';') && !attribute.contains("==")
}

/// A decoded count matrix.
///
/// `matrix[y][x]` is the count for `y_labels[y]` and `x_labels[x]`. Without
/// a y attribute there is exactly one row and `y_labels` is empty.
#[derive(Debug, Clone)]
pub struct AggregateResult<X, Y = serde_json::Value> {
    pub x_attribute: Attribute,
    pub y_attribute: Option<Attribute>,
    pub x_labels: Vec<X>,
    pub y_labels: Vec<Y>,
    pub matrix: Vec<Vec<u64>>,
}

impl<X, Y> AggregateResult<X, Y> {
    fn from_wire(wire: AggregateResponse<X, Y>, has_y: bool) -> Result<Self, String> {
        let AggregateResponse {
            x_attr,
            y_attr,
            aggs,
        } = wire;

        let expected_rows = if has_y { aggs.y_labels.len() } else { 1 };
        if aggs.matrix.len() != expected_rows {
            return Err(format!(
                "aggregate matrix has {} rows, expected {expected_rows}",
                aggs.matrix.len()
            ));
        }
        let columns = aggs.x_labels.len();
        if let Some((index, row)) = aggs
            .matrix
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns)
        {
            return Err(format!(
                "aggregate matrix row {index} has {} columns, expected {columns}",
                row.len()
            ));
        }

        Ok(Self {
            x_attribute: x_attr,
            y_attribute: y_attr,
            x_labels: aggs.x_labels,
            y_labels: aggs.y_labels,
            matrix: aggs.matrix,
        })
    }

    /// Returns the count at row `y`, column `x`.
    pub fn get(&self, y: usize, x: usize) -> Option<u64> {
        self.matrix.get(y)?.get(x).copied()
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> u64 {
        self.matrix.iter().flatten().sum()
    }

    /// Returns the count per x label, summed over all rows.
    pub fn totals_by_x(&self) -> Vec<u64> {
        (0..self.x_labels.len())
            .map(|x| self.matrix.iter().filter_map(|row| row.get(x)).sum())
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregateResponse<X, Y> {
    x_attr: Attribute,
    #[serde(default)]
    y_attr: Option<Attribute>,
    aggs: AggregateData<X, Y>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregateData<X, Y> {
    x_labels: Vec<X>,
    #[serde(default = "Vec::new")]
    y_labels: Vec<Y>,
    matrix: Vec<Vec<u64>>,
}

impl MolgenisClient {
    /// Starts a cross-tabulation of `entity` over the values of `x`.
    pub fn aggregate(&self, entity: impl Into<String>, x: impl Into<String>) -> AggregateBuilder<'_> {
        AggregateBuilder::new(self, entity.into(), x.into())
    }
}
