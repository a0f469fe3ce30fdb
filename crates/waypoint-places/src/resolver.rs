//! The resolver: concurrent dual-source search and promotion.

use waypoint_core::{Candidate, Coordinates, LocalCandidate, NewPlace, Rating};

use crate::error::{PromotionError, SearchError};
use crate::merge::merge_candidates;
use crate::sources::{PlaceStore, RemoteSearch};

/// Result cap requested from the provider per search.
const REMOTE_LIMIT: usize = 10;

/// Result cap requested from the store per search.
const LOCAL_LIMIT: i64 = 5;

/// Minimum trimmed query length accepted by [`PlaceResolver::search`].
const MIN_QUERY_CHARS: usize = 3;

/// Resolves free-text queries against the geocoding provider and the
/// community place table, and promotes provider-only selections into the
/// table.
///
/// Holds no mutable state; every call is independent. Overlapping searches
/// may complete out of request order — keystroke-driven callers are
/// responsible for discarding stale responses.
pub struct PlaceResolver<R, S> {
    remote: R,
    store: S,
}

impl<R, S> PlaceResolver<R, S>
where
    R: RemoteSearch,
    S: PlaceStore,
{
    pub fn new(remote: R, store: S) -> Self {
        Self { remote, store }
    }

    /// Searches both sources concurrently and merges the results.
    ///
    /// The two lookups are in flight simultaneously, so latency is bounded
    /// by the slower source rather than their sum. A source that fails
    /// contributes an empty list (logged, not propagated); both failing
    /// yields `Ok` with an empty list. Output is capped at
    /// [`crate::MAX_RESULTS`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::QueryTooShort`] if the trimmed query is under
    /// three characters. Source failures never surface here.
    pub async fn search(
        &self,
        query: &str,
        proximity: Option<Coordinates>,
    ) -> Result<Vec<Candidate>, SearchError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Err(SearchError::QueryTooShort {
                min: MIN_QUERY_CHARS,
                got: query.to_string(),
            });
        }

        let (remote, local) = tokio::join!(
            self.remote.search_places(query, proximity, REMOTE_LIMIT),
            self.store.search_by_name(query, LOCAL_LIMIT),
        );

        let local = local.unwrap_or_else(|e| {
            tracing::warn!(query, error = %e, "place store search failed, using provider results only");
            Vec::new()
        });
        let remote = remote.unwrap_or_else(|e| {
            tracing::warn!(query, error = %e, "provider search failed, using stored places only");
            Vec::new()
        });

        tracing::debug!(
            query,
            local_hits = local.len(),
            remote_hits = remote.len(),
            "collected place candidates"
        );

        Ok(merge_candidates(local, remote))
    }

    /// Makes a search result durable.
    ///
    /// A `Local` candidate is returned unchanged without touching the
    /// store. A `Remote` candidate is written to the store (promotion) and
    /// returned as a `Local` candidate carrying the new id and an empty
    /// rating.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError`] if the store write fails; the error
    /// carries the original candidate, which remains usable for display.
    pub async fn select(
        &self,
        candidate: Candidate,
    ) -> Result<Candidate, PromotionError<S::Error>> {
        let remote = match candidate {
            Candidate::Local(_) => return Ok(candidate),
            Candidate::Remote(remote) => remote,
        };

        let record = NewPlace::from_remote(&remote);
        match self.store.create_place(&record).await {
            Ok(id) => {
                tracing::debug!(id, name = %remote.name, "promoted provider place into store");
                Ok(Candidate::Local(LocalCandidate {
                    id,
                    name: remote.name,
                    address: remote.address,
                    coordinates: remote.coordinates,
                    category: remote.category,
                    user_added: false,
                    rating: Rating::default(),
                }))
            }
            Err(source) => {
                tracing::warn!(name = %remote.name, error = %source, "promotion failed, place stays unpersisted");
                Err(PromotionError {
                    candidate: remote,
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use thiserror::Error;

    use waypoint_core::{PlaceCategory, RemoteCandidate};

    use super::*;
    use crate::MAX_RESULTS;

    #[derive(Debug, Error)]
    #[error("stub source unavailable")]
    struct StubError;

    /// In-memory [`RemoteSearch`] stub, optionally failing, recording the
    /// arguments of the last call.
    struct StubRemote {
        results: Vec<RemoteCandidate>,
        fail: bool,
        last_call: Mutex<Option<(String, Option<Coordinates>, usize)>>,
    }

    impl StubRemote {
        fn ok(results: Vec<RemoteCandidate>) -> Self {
            Self {
                results,
                fail: false,
                last_call: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                results: Vec::new(),
                fail: true,
                last_call: Mutex::new(None),
            }
        }
    }

    impl RemoteSearch for StubRemote {
        type Error = StubError;

        async fn search_places(
            &self,
            query: &str,
            proximity: Option<Coordinates>,
            limit: usize,
        ) -> Result<Vec<RemoteCandidate>, StubError> {
            *self.last_call.lock().unwrap() = Some((query.to_string(), proximity, limit));
            if self.fail {
                Err(StubError)
            } else {
                Ok(self.results.clone())
            }
        }
    }

    /// In-memory [`PlaceStore`] stub counting `create_place` calls.
    struct StubStore {
        results: Vec<LocalCandidate>,
        fail_search: bool,
        fail_create: bool,
        next_id: i64,
        create_calls: AtomicUsize,
    }

    impl StubStore {
        fn ok(results: Vec<LocalCandidate>) -> Self {
            Self {
                results,
                fail_search: false,
                fail_create: false,
                next_id: 101,
                create_calls: AtomicUsize::new(0),
            }
        }

        fn failing_search() -> Self {
            Self {
                fail_search: true,
                ..Self::ok(Vec::new())
            }
        }

        fn failing_create() -> Self {
            Self {
                fail_create: true,
                ..Self::ok(Vec::new())
            }
        }
    }

    impl PlaceStore for StubStore {
        type Error = StubError;

        async fn search_by_name(
            &self,
            _query: &str,
            _limit: i64,
        ) -> Result<Vec<LocalCandidate>, StubError> {
            if self.fail_search {
                Err(StubError)
            } else {
                Ok(self.results.clone())
            }
        }

        async fn create_place(&self, _place: &NewPlace) -> Result<i64, StubError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                Err(StubError)
            } else {
                Ok(self.next_id)
            }
        }
    }

    fn local(id: i64, name: &str, longitude: f64, latitude: f64) -> LocalCandidate {
        LocalCandidate {
            id,
            name: name.to_string(),
            address: "addr".to_string(),
            coordinates: Coordinates::new(longitude, latitude),
            category: PlaceCategory::Food,
            user_added: true,
            rating: Rating {
                average: 4.5,
                count: 2,
            },
        }
    }

    fn remote(id: &str, name: &str, longitude: f64, latitude: f64) -> RemoteCandidate {
        RemoteCandidate {
            provider_id: id.to_string(),
            name: name.to_string(),
            address: format!("{name}, full address"),
            coordinates: Coordinates::new(longitude, latitude),
            category: PlaceCategory::Attraction,
            country_code: Some("is".to_string()),
        }
    }

    #[tokio::test]
    async fn short_query_is_rejected_before_any_source_call() {
        let remote_stub = StubRemote::ok(vec![remote("r", "R", 1.0, 1.0)]);
        let resolver = PlaceResolver::new(remote_stub, StubStore::ok(Vec::new()));

        let err = resolver.search("ab", None).await.unwrap_err();
        assert!(matches!(err, SearchError::QueryTooShort { .. }));
        assert!(resolver.remote.last_call.lock().unwrap().is_none());

        // Whitespace padding does not rescue a short query.
        let err = resolver.search("  a  ", None).await.unwrap_err();
        assert!(matches!(err, SearchError::QueryTooShort { .. }));
    }

    #[tokio::test]
    async fn search_passes_trimmed_query_and_proximity_to_provider() {
        let remote_stub = StubRemote::ok(Vec::new());
        let resolver = PlaceResolver::new(remote_stub, StubStore::ok(Vec::new()));
        let bias = Coordinates::new(-21.9, 64.1);

        resolver.search("  cafe  ", Some(bias)).await.unwrap();

        let call = resolver.remote.last_call.lock().unwrap().clone().unwrap();
        assert_eq!(call.0, "cafe");
        assert_eq!(call.1, Some(bias));
        assert_eq!(call.2, REMOTE_LIMIT);
    }

    #[tokio::test]
    async fn blue_lagoon_scenario() {
        let resolver = PlaceResolver::new(
            StubRemote::ok(vec![
                remote("r1", "Blue Lagoon Iceland", -22.449, 63.881),
                remote("r2", "Blue Lagoon Cafe", -21.2311, 63.8811),
            ]),
            StubStore::ok(vec![local(7, "Blue Lagoon Cafe", -21.231, 63.881)]),
        );

        let results = resolver.search("Blue Lagoon", None).await.unwrap();

        assert_eq!(results.len(), 2);
        match &results[0] {
            Candidate::Local(c) => {
                assert_eq!(c.name, "Blue Lagoon Cafe");
                assert!((c.rating.average - 4.5).abs() < f64::EPSILON);
                assert_eq!(c.rating.count, 2);
            }
            Candidate::Remote(_) => panic!("first result should be the stored cafe"),
        }
        assert_eq!(results[1].name(), "Blue Lagoon Iceland");
        assert!(!results[1].is_local());
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_store_results() {
        let resolver = PlaceResolver::new(
            StubRemote::failing(),
            StubStore::ok(vec![local(1, "Stored Cafe", 1.0, 1.0)]),
        );

        let results = resolver.search("cafe", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "Stored Cafe");
    }

    #[tokio::test]
    async fn store_failure_degrades_to_provider_results() {
        let resolver = PlaceResolver::new(
            StubRemote::ok(vec![remote("r1", "Provider Cafe", 1.0, 1.0)]),
            StubStore::failing_search(),
        );

        let results = resolver.search("cafe", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "Provider Cafe");
    }

    #[tokio::test]
    async fn both_sources_failing_yields_empty_ok() {
        let resolver = PlaceResolver::new(StubRemote::failing(), StubStore::failing_search());
        let results = resolver.search("cafe", None).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn merged_output_never_exceeds_cap() {
        let remotes: Vec<RemoteCandidate> = (0..10)
            .map(|i| remote(&format!("r{i}"), &format!("R{i}"), 100.0 + f64::from(i), 0.0))
            .collect();
        let locals: Vec<LocalCandidate> = (0..5)
            .map(|i| local(i, &format!("L{i}"), f64::from(i as u8), 0.0))
            .collect();
        let resolver = PlaceResolver::new(StubRemote::ok(remotes), StubStore::ok(locals));

        let results = resolver.search("anything", None).await.unwrap();
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[tokio::test]
    async fn select_local_is_noop_without_store_call() {
        let resolver = PlaceResolver::new(StubRemote::ok(Vec::new()), StubStore::ok(Vec::new()));
        let candidate = Candidate::Local(local(7, "Stored Cafe", 1.0, 1.0));

        let selected = resolver.select(candidate.clone()).await.unwrap();
        assert_eq!(selected, candidate);
        assert_eq!(resolver.store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn select_remote_promotes_to_local() {
        let resolver = PlaceResolver::new(StubRemote::ok(Vec::new()), StubStore::ok(Vec::new()));
        let candidate = Candidate::Remote(remote("r1", "Provider Cafe", -21.9, 64.1));

        let selected = resolver.select(candidate).await.unwrap();
        match selected {
            Candidate::Local(c) => {
                assert_eq!(c.id, 101);
                assert_eq!(c.name, "Provider Cafe");
                assert!(!c.user_added);
                assert_eq!(c.rating, Rating::default());
            }
            Candidate::Remote(_) => panic!("promotion should yield a local candidate"),
        }
        assert_eq!(resolver.store.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_promotion_returns_original_candidate_in_error() {
        let resolver =
            PlaceResolver::new(StubRemote::ok(Vec::new()), StubStore::failing_create());
        let original = remote("r1", "Provider Cafe", -21.9, 64.1);

        let err = resolver
            .select(Candidate::Remote(original.clone()))
            .await
            .unwrap_err();

        assert_eq!(err.candidate, original);
        assert_eq!(resolver.store.create_calls.load(Ordering::SeqCst), 1);
    }
}
