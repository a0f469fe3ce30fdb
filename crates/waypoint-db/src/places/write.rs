//! Write operations for the `places` and `place_reviews` tables.

use sqlx::PgPool;

use waypoint_core::NewPlace;

/// Insert a place and return its generated id.
///
/// Used both for manual community entries (`user_added = true`) and for
/// promoting a geocoder result on selection (`user_added = false`, with
/// the provider id recorded for provenance). No uniqueness is enforced
/// against concurrent writers; two racing promotions of the same physical
/// place produce two rows.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails.
pub async fn insert_place(pool: &PgPool, place: &NewPlace) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO places \
             (provider_place_id, name, country_code, longitude, latitude, \
              category, address, user_added) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id",
    )
    .bind(&place.provider_place_id)
    .bind(&place.name)
    .bind(&place.country_code)
    .bind(place.coordinates.longitude)
    .bind(place.coordinates.latitude)
    .bind(place.category.as_str())
    .bind(&place.address)
    .bind(place.user_added)
    .fetch_one(pool)
    .await
}

/// Insert a review for a place and return its generated id.
///
/// The rating range (1–5) is enforced by a table constraint.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails, including when `place_id`
/// does not exist or `rating` is out of range.
pub async fn insert_review(
    pool: &PgPool,
    place_id: i64,
    rating: i32,
    comment: Option<&str>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO place_reviews (place_id, rating, comment) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(place_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await
}
