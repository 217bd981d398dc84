//! Catalog query building (search, filtering, pagination).

mod builder;

pub use builder::{ProductQuery, RawParams};
