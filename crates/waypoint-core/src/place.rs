//! Domain types for place search and promotion.
//!
//! A [`Candidate`] is the in-memory, non-durable representation of a place
//! produced by a search. It is a tagged union rather than one struct with
//! optional fields so that illegal combinations (a provider result carrying
//! a database id, a stored place without one) cannot be constructed.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair, longitude first.
///
/// Sources that omit coordinates contribute `(0.0, 0.0)`; consumers must
/// treat that value as "unknown", not as a point in the Gulf of Guinea.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Coarse place classification shared by the geocoder and the database.
///
/// Both sides store and transmit free-text category strings; this enum is
/// the normalized form used for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Lodging,
    Food,
    Attraction,
    Transport,
    Hospital,
    Embassy,
    Address,
    Other,
}

impl PlaceCategory {
    /// Normalizes a free-text category string from either source.
    ///
    /// Unrecognized strings map to [`PlaceCategory::Other`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "hotel" | "lodging" | "accommodation" | "hostel" | "guesthouse" => Self::Lodging,
            "restaurant" | "food" | "food_and_drink" | "cafe" | "coffee" | "bar" => Self::Food,
            "attraction" | "tourism" | "museum" | "landmark" | "park" => Self::Attraction,
            "transport" | "bus_station" | "train_station" | "airport" | "ferry" => Self::Transport,
            "hospital" | "clinic" | "pharmacy" => Self::Hospital,
            "embassy" | "consulate" => Self::Embassy,
            "address" => Self::Address,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lodging => "lodging",
            Self::Food => "food",
            Self::Attraction => "attraction",
            Self::Transport => "transport",
            Self::Hospital => "hospital",
            Self::Embassy => "embassy",
            Self::Address => "address",
            Self::Other => "other",
        }
    }
}

/// Aggregated community review data, computed by the store query.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Mean of all review ratings; `0.0` when the place has no reviews.
    pub average: f64,
    /// Number of reviews behind the average.
    pub count: i64,
}

/// A place already persisted in the community directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalCandidate {
    /// Durable row id in the `places` table.
    pub id: i64,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub category: PlaceCategory,
    /// Whether the row was entered manually by a user, as opposed to being
    /// promoted from a geocoder result.
    pub user_added: bool,
    pub rating: Rating,
}

/// A place known only to the remote geocoding provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCandidate {
    /// Provider-scoped opaque identifier. Not comparable to store ids.
    pub provider_id: String,
    pub name: String,
    /// Full provider place string, e.g. `"Blue Lagoon, Grindavík, Iceland"`.
    pub address: String,
    pub coordinates: Coordinates,
    pub category: PlaceCategory,
    /// ISO country code derived from provider context metadata, when present.
    pub country_code: Option<String>,
}

/// A search result from either source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum Candidate {
    Local(LocalCandidate),
    Remote(RemoteCandidate),
}

impl Candidate {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local(c) => &c.name,
            Self::Remote(c) => &c.name,
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Local(c) => &c.address,
            Self::Remote(c) => &c.address,
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        match self {
            Self::Local(c) => c.coordinates,
            Self::Remote(c) => c.coordinates,
        }
    }

    #[must_use]
    pub fn category(&self) -> PlaceCategory {
        match self {
            Self::Local(c) => c.category,
            Self::Remote(c) => c.category,
        }
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

/// Input record for inserting a place into the durable store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub provider_place_id: Option<String>,
    pub name: String,
    pub country_code: Option<String>,
    pub coordinates: Coordinates,
    pub category: PlaceCategory,
    pub address: Option<String>,
    pub user_added: bool,
}

impl NewPlace {
    /// Builds the store record for promoting a provider result.
    ///
    /// Promoted rows are marked `user_added = false`: they originate from
    /// the external provider, not manual community entry.
    #[must_use]
    pub fn from_remote(candidate: &RemoteCandidate) -> Self {
        Self {
            provider_place_id: Some(candidate.provider_id.clone()),
            name: candidate.name.clone(),
            country_code: candidate.country_code.clone(),
            coordinates: candidate.coordinates,
            category: candidate.category,
            address: Some(candidate.address.clone()),
            user_added: false,
        }
    }
}
