//! REST API operations

mod aggregate;
pub mod query;
pub mod request;
mod retrieve;

pub use aggregate::*;
pub use request::Resource;
