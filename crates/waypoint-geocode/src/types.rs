//! Wire types for the geocoding provider's search endpoints.
//!
//! ## Observed response shape
//!
//! All three endpoints (forward, retrieve, reverse) return a feature
//! collection: `{ "features": [ ... ] }`. Each feature carries:
//!
//! - `id` — opaque provider identifier, e.g. `"poi.1234"`.
//! - `place_name` — full display string, comma-separated from most to least
//!   specific: `"Blue Lagoon, Grindavík, Iceland"`.
//! - `center` — `[longitude, latitude]`. Occasionally absent for some
//!   address-level results; modeled as `Option` and defaulted to `(0, 0)`
//!   downstream (consumers treat that as "unknown").
//! - `place_type` — e.g. `["poi"]` or `["address"]`; drives category
//!   extraction.
//! - `properties.category` — free-text POI category, only on POI features.
//! - `context` — parent geography chain; the entry whose id starts with
//!   `"country"` carries the ISO short code.

use serde::Deserialize;

use waypoint_core::{Coordinates, PlaceCategory, RemoteCandidate};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub features: Vec<ProviderFeature>,
}

/// One place feature from the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderFeature {
    pub id: String,
    pub place_name: String,
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub place_type: Vec<String>,
    #[serde(default)]
    pub properties: FeatureProperties,
    #[serde(default)]
    pub context: Vec<ContextEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub category: Option<String>,
}

/// A parent-geography entry in a feature's context chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub short_code: Option<String>,
}

impl ProviderFeature {
    /// The main display name: the segment of `place_name` before the first
    /// comma.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.place_name
            .split(',')
            .next()
            .unwrap_or(&self.place_name)
            .trim()
    }

    /// ISO country code from the context chain, when the provider supplied
    /// one.
    #[must_use]
    pub fn country_code(&self) -> Option<String> {
        self.context
            .iter()
            .find(|ctx| ctx.id.starts_with("country"))
            .and_then(|ctx| ctx.short_code.clone())
    }

    /// Category derived from `place_type` and POI properties.
    ///
    /// POI features without an explicit category default to
    /// [`PlaceCategory::Attraction`]; plain address features map to
    /// [`PlaceCategory::Address`].
    #[must_use]
    pub fn category(&self) -> PlaceCategory {
        if self.place_type.iter().any(|t| t == "poi") {
            return self
                .properties
                .category
                .as_deref()
                .map_or(PlaceCategory::Attraction, PlaceCategory::parse);
        }
        if self.place_type.iter().any(|t| t == "address") {
            return PlaceCategory::Address;
        }
        PlaceCategory::Other
    }

    /// Converts the feature into the resolver's remote candidate shape.
    #[must_use]
    pub fn into_candidate(self) -> RemoteCandidate {
        let coordinates = self
            .center
            .map_or_else(|| Coordinates::new(0.0, 0.0), |c| Coordinates::new(c[0], c[1]));
        RemoteCandidate {
            category: self.category(),
            country_code: self.country_code(),
            name: self.primary_name().to_string(),
            coordinates,
            provider_id: self.id,
            address: self.place_name,
        }
    }
}
