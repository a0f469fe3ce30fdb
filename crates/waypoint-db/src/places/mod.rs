//! Queries for the `places` and `place_reviews` tables.

mod read;
mod types;
mod write;

pub use read::{list_reviews_for_place, search_places_by_name};
pub use types::{PlaceReviewRow, PlaceSearchRow};
pub use write::{insert_place, insert_review};
