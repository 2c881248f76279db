//! Overpass API backend for nearby place discovery.

pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::{OverpassClient, DEFAULT_ENDPOINT};
pub use error::OverpassError;
pub use normalize::normalize_elements;
pub use query::build_nearby_query;
pub use types::{OverpassElement, OverpassResponse};
