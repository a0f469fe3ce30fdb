use thiserror::Error;

use waypoint_core::RemoteCandidate;

/// Errors returned by [`crate::PlaceResolver::search`].
///
/// Source failures are NOT represented here; a failed source degrades to
/// an empty contribution and is only logged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The trimmed query is below the minimum useful length. Short queries
    /// are wasteful round-trips that rarely return meaningful matches, so
    /// they are rejected up front instead of being forwarded to the sources.
    #[error("search query must be at least {min} characters, got {got:?}")]
    QueryTooShort { min: usize, got: String },
}

/// A selected provider place could not be written to the durable store.
///
/// Carries the original, still-unpersisted candidate so the caller can
/// keep using its display data this session, or retry the promotion.
#[derive(Debug, Error)]
#[error("failed to persist selected place {name:?}: {source}", name = .candidate.name)]
pub struct PromotionError<E>
where
    E: std::error::Error + 'static,
{
    pub candidate: RemoteCandidate,
    #[source]
    pub source: E,
}
