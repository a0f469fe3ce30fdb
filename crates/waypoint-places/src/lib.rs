//! Dual-source place resolution.
//!
//! Turns a free-text query into a ranked, deduplicated list of place
//! candidates drawn from two independent sources — the remote geocoding
//! provider and the community place table — and promotes a provider-only
//! selection into the durable store.
//!
//! The two sources are explicit dependencies of [`PlaceResolver`], behind
//! the [`RemoteSearch`] and [`PlaceStore`] traits, so tests substitute
//! in-memory stubs and production wires up [`waypoint_geocode::GeocodeClient`]
//! and [`PgPlaceStore`].

mod error;
mod merge;
mod resolver;
mod sources;

pub use error::{PromotionError, SearchError};
pub use merge::{merge_candidates, COORD_EPSILON_DEG, MAX_RESULTS};
pub use resolver::PlaceResolver;
pub use sources::{PgPlaceStore, PlaceStore, RemoteSearch};
