//! MOLGENIS API client library
//!
//! A Rust async client library for the MOLGENIS REST data-catalog API:
//! token login, single row and paginated collection retrieval, server-side
//! aggregation, and typed decoding of the metadata model.
//!
//! ```ignore
//! use futures::StreamExt;
//! use molgenis_lib::MolgenisClient;
//! use molgenis_lib::model::metadata::EntityType;
//!
//! let client = MolgenisClient::new("https://molgenis.example.org")?;
//! client.authenticate("admin", "secret").await;
//!
//! let mut types = client.query::<EntityType>().stream();
//! while let Some(entity_type) = types.next().await {
//!     println!("{}", entity_type?.id);
//! }
//! ```

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod transport;

mod client;

pub use api::AggregateBuilder;
pub use api::AggregateResult;
pub use api::query::EntityStream;
pub use api::query::Filter;
pub use api::query::PageEnvelope;
pub use api::query::Sort;
pub use client::*;
pub use error::Error;
pub use model::Entity;
