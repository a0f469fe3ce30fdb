//! Combining the two source result lists into one ranked candidate list.

use waypoint_core::{Candidate, Coordinates, LocalCandidate, RemoteCandidate};

/// Per-axis coordinate threshold under which two results are considered the
/// same physical place. Roughly 100 m at mid latitudes; this is a plain
/// degree comparison, not geodesic distance, so it degrades near the poles
/// and across the antimeridian.
pub const COORD_EPSILON_DEG: f64 = 0.001;

/// Maximum number of candidates a search returns after merging.
pub const MAX_RESULTS: usize = 8;

fn within_epsilon(a: Coordinates, b: Coordinates) -> bool {
    (a.longitude - b.longitude).abs() < COORD_EPSILON_DEG
        && (a.latitude - b.latitude).abs() < COORD_EPSILON_DEG
}

/// Merges store hits and provider hits into one candidate list.
///
/// Store hits come first, in store order, since they carry community
/// ratings and provenance. A provider hit within [`COORD_EPSILON_DEG`] of
/// ANY store hit on both axes is dropped as a duplicate of that place;
/// survivors follow in provider order. The combined list is truncated to
/// [`MAX_RESULTS`].
#[must_use]
pub fn merge_candidates(local: Vec<LocalCandidate>, remote: Vec<RemoteCandidate>) -> Vec<Candidate> {
    // Duplicate detection runs against every store hit, including any that
    // truncation later drops.
    let local_coords: Vec<Coordinates> = local.iter().map(|c| c.coordinates).collect();

    let mut merged: Vec<Candidate> = Vec::with_capacity(local.len() + remote.len());
    merged.extend(local.into_iter().map(Candidate::Local));
    merged.extend(
        remote
            .into_iter()
            .filter(|candidate| {
                !local_coords
                    .iter()
                    .any(|&lc| within_epsilon(lc, candidate.coordinates))
            })
            .map(Candidate::Remote),
    );

    merged.truncate(MAX_RESULTS);
    merged
}
