//! The MOLGENIS metadata model
//!
//! Packages group entity types, entity types own attributes, and all three
//! can be annotated with ontology tags. These are ordinary rows of the
//! `sys_md_*` entity types and can be fetched like any other [`Entity`].
//!
//! Nothing here enforces the constraints the metadata describes
//! (nullability, ranges, tag relations); the values are decoded as sent.
//!
//! [`Entity`]: crate::model::Entity

mod attribute;
mod entity_type;
mod localized;
mod package;
mod tag;

pub use attribute::*;
pub use entity_type::*;
pub use localized::*;
pub use package::*;
pub use tag::*;
