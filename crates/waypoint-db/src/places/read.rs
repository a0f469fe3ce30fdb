//! Read operations for the `places` and `place_reviews` tables.

use sqlx::PgPool;

use super::types::{PlaceReviewRow, PlaceSearchRow};

/// Case-insensitive substring search over place names, with review
/// aggregates computed per row.
///
/// `LIKE` wildcards in `query` are escaped, so a literal `%` in user input
/// matches a literal `%` in a name. Results are ordered by `id ASC`
/// (insertion order), capped at `limit`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn search_places_by_name(
    pool: &PgPool,
    query: &str,
    limit: i64,
) -> Result<Vec<PlaceSearchRow>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(query));

    sqlx::query_as::<_, PlaceSearchRow>(
        "SELECT p.id, p.name, p.country_code, \
                p.longitude, p.latitude, p.category, p.address, p.user_added, \
                COALESCE(AVG(r.rating), 0)::float8 AS average_rating, \
                COUNT(r.id) AS review_count \
         FROM places p \
         LEFT JOIN place_reviews r ON r.place_id = p.id \
         WHERE p.name ILIKE $1 \
         GROUP BY p.id \
         ORDER BY p.id ASC \
         LIMIT $2",
    )
    .bind(pattern)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// List reviews for a place, newest first.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_reviews_for_place(
    pool: &PgPool,
    place_id: i64,
) -> Result<Vec<PlaceReviewRow>, sqlx::Error> {
    sqlx::query_as::<_, PlaceReviewRow>(
        "SELECT id, place_id, rating, comment, created_at \
         FROM place_reviews \
         WHERE place_id = $1 \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(place_id)
    .fetch_all(pool)
    .await
}

/// Escapes `LIKE` metacharacters (`\`, `%`, `_`) in a search term.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
