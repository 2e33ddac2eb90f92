//! Typed models

pub mod codec;
mod entity;
pub mod metadata;
mod row;

pub use entity::*;
pub use row::*;
