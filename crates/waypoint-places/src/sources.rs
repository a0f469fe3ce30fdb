//! Source seams for the resolver, plus the production implementations.

use std::future::Future;

use sqlx::PgPool;

use waypoint_core::{Coordinates, LocalCandidate, NewPlace, RemoteCandidate};
use waypoint_geocode::{GeocodeClient, GeocodeError};

/// The remote place-search provider, as seen by the resolver.
pub trait RemoteSearch {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Best-effort text search, optionally biased toward a coordinate.
    /// Returns an empty list on no match; errors only on transport or
    /// protocol failure.
    fn search_places(
        &self,
        query: &str,
        proximity: Option<Coordinates>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RemoteCandidate>, Self::Error>> + Send;
}

/// The durable community place store, as seen by the resolver.
pub trait PlaceStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Case-insensitive substring match on place names, with review
    /// aggregates attached, in store order.
    fn search_by_name(
        &self,
        query: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<LocalCandidate>, Self::Error>> + Send;

    /// Persists a place and returns its durable id.
    fn create_place(
        &self,
        place: &NewPlace,
    ) -> impl Future<Output = Result<i64, Self::Error>> + Send;
}

impl RemoteSearch for GeocodeClient {
    type Error = GeocodeError;

    async fn search_places(
        &self,
        query: &str,
        proximity: Option<Coordinates>,
        limit: usize,
    ) -> Result<Vec<RemoteCandidate>, GeocodeError> {
        let bias = proximity.map(|c| (c.longitude, c.latitude));
        let features = self.forward(query, bias, limit).await?;
        Ok(features
            .into_iter()
            .map(waypoint_geocode::ProviderFeature::into_candidate)
            .collect())
    }
}

/// [`PlaceStore`] backed by the Postgres `places` table.
#[derive(Clone)]
pub struct PgPlaceStore {
    pool: PgPool,
}

impl PgPlaceStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PlaceStore for PgPlaceStore {
    type Error = sqlx::Error;

    async fn search_by_name(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<LocalCandidate>, sqlx::Error> {
        let rows = waypoint_db::search_places_by_name(&self.pool, query, limit).await?;
        Ok(rows.into_iter().map(LocalCandidate::from).collect())
    }

    async fn create_place(&self, place: &NewPlace) -> Result<i64, sqlx::Error> {
        waypoint_db::insert_place(&self.pool, place).await
    }
}
