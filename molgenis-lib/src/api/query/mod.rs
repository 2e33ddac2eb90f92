//! Collection queries and pagination.
//!
//! # Shared Types
//!
//! - [`Filter`] - RSQL filter conditions (`q=`), also used by aggregates
//! - [`Sort`] - Ordering of query results
//! - [`PageEnvelope`] - A page of query results with pagination links
//!
//! # Query Execution
//!
//! - [`QueryBuilder`] - collects the query parameters
//! - [`EntityPages`] - page-by-page async iterator following `nextHref`
//! - [`EntityStream`] - item stream across all pages

mod builder;
mod filter;
mod order;
mod page;
mod pages;
mod stream;

pub use builder::QueryBuilder;
pub use filter::Filter;
pub use order::Direction;
pub use order::Sort;
pub use page::PageEnvelope;
pub use pages::EntityPages;
pub use stream::EntityStream;
