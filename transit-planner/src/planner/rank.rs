//! Journey ranking for search results.

use crate::domain::Journey;

/// Rank journeys by duration, shortest first.
///
/// The sort is stable: journeys of equal duration keep the order they
/// were found in, which is round order (fewer boardings first).
pub fn rank_journeys(mut journeys: Vec<Journey>) -> Vec<Journey> {
    journeys.sort_by_key(Journey::duration);
    journeys
}
