use chrono::{DateTime, Utc};
use sqlx::FromRow;

use waypoint_core::{Coordinates, LocalCandidate, PlaceCategory, Rating};

/// One row from the name-search query, with review aggregates attached.
#[derive(Debug, Clone, FromRow)]
pub struct PlaceSearchRow {
    pub id: i64,
    pub name: String,
    pub country_code: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub category: String,
    pub address: Option<String>,
    pub user_added: bool,
    /// `AVG(rating)` over the place's reviews; `0.0` when it has none.
    pub average_rating: f64,
    /// `COUNT` of the place's reviews.
    pub review_count: i64,
}

impl From<PlaceSearchRow> for LocalCandidate {
    fn from(row: PlaceSearchRow) -> Self {
        // Rows without an address fall back to the country code so the UI
        // always has a location string to show.
        let address = row
            .address
            .or(row.country_code)
            .unwrap_or_default();
        Self {
            id: row.id,
            name: row.name,
            address,
            coordinates: Coordinates::new(
                row.longitude.unwrap_or(0.0),
                row.latitude.unwrap_or(0.0),
            ),
            category: PlaceCategory::parse(&row.category),
            user_added: row.user_added,
            rating: Rating {
                average: row.average_rating,
                count: row.review_count,
            },
        }
    }
}

/// One row from the `place_reviews` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlaceReviewRow {
    pub id: i64,
    pub place_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
