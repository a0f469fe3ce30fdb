//! HTTP client for the hosted geocoding/place-search provider.
//!
//! The provider is treated as an opaque collaborator: this crate owns the
//! wire types, the endpoint plumbing, and the extraction of the bits the
//! rest of the system cares about (display name, coordinates, category,
//! country code).

mod client;
mod error;
mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use types::{ContextEntry, FeatureProperties, ProviderFeature};
