//! Re-timed views of a route.
//!
//! The planner reaches the same route many times, from different boarding
//! stops and at different times. Rather than copying stop lists, it works
//! on `RouteSlice`s: a shared reference to the canonical route, an
//! inclusive stop range and the time already elapsed when the first stop
//! of the range is reached.

use std::sync::Arc;

use chrono::Duration;

use super::{DomainError, NodeIndex, Route, RouteStop};

/// A contiguous, re-timed range of a route's stops.
///
/// Uses `Arc<Route>` for cheap cloning into labels and legs. Every
/// transformation returns a new slice; the route itself is never touched.
///
/// # Invariants
///
/// - `start <= end < route.len()`
#[derive(Debug, Clone)]
pub struct RouteSlice {
    route: Arc<Route>,
    start: usize,
    end: usize,
    initial_time: Duration,
}

/// A stop of a slice together with its cumulative time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedStop<'a> {
    pub stop: &'a RouteStop,
    pub cumulative_time: Duration,
}

impl RouteSlice {
    /// A slice covering the whole route, with no time elapsed.
    pub fn full(route: Arc<Route>) -> Self {
        let end = route.len().saturating_sub(1);
        Self {
            route,
            start: 0,
            end,
            initial_time: Duration::zero(),
        }
    }

    /// A slice of the stops `start..=end` of a route, with no time elapsed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the range is empty or out of bounds.
    pub fn new(route: Arc<Route>, start: usize, end: usize) -> Result<Self, DomainError> {
        if start > end || end >= route.len() {
            return Err(DomainError::InvalidSlice {
                start,
                end,
                len: route.len(),
            });
        }
        Ok(Self {
            route,
            start,
            end,
            initial_time: Duration::zero(),
        })
    }

    /// Returns the canonical route.
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Returns the route index of the first stop of the slice.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the route index of the last stop of the slice.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the time elapsed before the first stop of the slice.
    pub fn initial_time(&self) -> Duration {
        self.initial_time
    }

    /// Returns the number of stops in the slice (at least one).
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a slice holds at least one stop.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the stops of the slice.
    pub fn stops(&self) -> &[RouteStop] {
        &self.route.stops()[self.start..=self.end]
    }

    /// Returns the first stop (the boarding stop).
    pub fn first_stop(&self) -> &RouteStop {
        &self.route.stops()[self.start]
    }

    /// Returns the last stop (the alighting stop).
    pub fn last_stop(&self) -> &RouteStop {
        &self.route.stops()[self.end]
    }

    /// Returns the stops between boarding and alighting.
    pub fn intermediate_stops(&self) -> &[RouteStop] {
        if self.len() < 3 {
            return &[];
        }
        &self.route.stops()[self.start + 1..self.end]
    }

    /// Returns the node where the slice is boarded.
    pub fn departure_node(&self) -> NodeIndex {
        self.first_stop().node
    }

    /// Returns the node where the slice is left.
    pub fn arrival_node(&self) -> NodeIndex {
        self.last_stop().node
    }

    /// Returns the cumulative time at a position within the slice.
    pub fn cumulative_time_at(&self, position: usize) -> Option<Duration> {
        if position >= self.len() {
            return None;
        }
        let base = self.route.offset(self.start)?;
        let at = self.route.offset(self.start + position)?;
        Some(self.initial_time + (at - base))
    }

    /// Returns the cumulative time at the last stop.
    pub fn cumulative_time(&self) -> Duration {
        self.cumulative_time_at(self.len() - 1)
            .unwrap_or(self.initial_time)
    }

    /// Returns the time spent on board, from first to last stop.
    pub fn travel_time(&self) -> Duration {
        self.cumulative_time() - self.initial_time
    }

    /// Iterates the stops with their cumulative times.
    pub fn timed_stops(&self) -> impl Iterator<Item = TimedStop<'_>> + '_ {
        self.stops().iter().enumerate().map(|(position, stop)| TimedStop {
            stop,
            cumulative_time: self.initial_time
                + self.route.offsets_from(self.start, self.start + position),
        })
    }

    /// Returns the position within the slice of the first stop at `node`.
    pub fn position_of_node(&self, node: NodeIndex) -> Option<usize> {
        self.stops().iter().position(|s| s.node == node)
    }

    /// Returns a copy re-timed to start at `initial_time`.
    pub fn with_initial_time(&self, initial_time: Duration) -> Self {
        Self {
            initial_time,
            ..self.clone()
        }
    }

    /// Returns a copy beginning at a position of this slice.
    ///
    /// The new first stop is reached at this slice's initial time.
    pub fn begin_at(&self, position: usize) -> Option<Self> {
        (position < self.len()).then(|| Self {
            start: self.start + position,
            ..self.clone()
        })
    }

    /// Returns a copy ending at (and including) a position of this slice.
    pub fn end_at(&self, position: usize) -> Option<Self> {
        (position < self.len()).then(|| Self {
            end: self.start + position,
            ..self.clone()
        })
    }

    /// Returns a copy beginning at the first stop at `node`.
    pub fn slice_beginning_at_node(&self, node: NodeIndex) -> Option<Self> {
        self.begin_at(self.position_of_node(node)?)
    }

    /// Returns a copy ending at the first stop at `node`.
    pub fn slice_ending_at_node(&self, node: NodeIndex) -> Option<Self> {
        self.end_at(self.position_of_node(node)?)
    }
}

impl Route {
    /// Travel time between two stop indices (`from <= to`).
    pub(crate) fn offsets_from(&self, from: usize, to: usize) -> Duration {
        match (self.offset(from), self.offset(to)) {
            (Some(a), Some(b)) => b - a,
            _ => Duration::zero(),
        }
    }
}

impl PartialEq for RouteSlice {
    fn eq(&self, other: &Self) -> bool {
        // Same canonical route (by id) over the same range at the same time
        self.route.id == other.route.id
            && self.start == other.start
            && self.end == other.end
            && self.initial_time == other.initial_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;

    /// A -> B -> C -> D, 5 minutes between stops.
    fn route() -> Arc<Route> {
        let stops = (0..4)
            .map(|i| {
                let time = if i == 0 { 0 } else { 300 };
                RouteStop::new(i as u32 + 1, NodeIndex(i), Duration::seconds(time))
            })
            .collect();
        Arc::new(Route::new(RouteId::new("r"), "R", stops).unwrap())
    }

    #[test]
    fn full_slice() {
        let slice = RouteSlice::full(route());

        assert_eq!(slice.len(), 4);
        assert_eq!(slice.departure_node(), NodeIndex(0));
        assert_eq!(slice.arrival_node(), NodeIndex(3));
        assert_eq!(slice.cumulative_time(), Duration::seconds(900));
        assert_eq!(slice.intermediate_stops().len(), 2);
    }

    #[test]
    fn new_validates_bounds() {
        assert!(RouteSlice::new(route(), 1, 2).is_ok());
        assert!(RouteSlice::new(route(), 2, 2).is_ok());
        assert!(matches!(
            RouteSlice::new(route(), 2, 1),
            Err(DomainError::InvalidSlice { .. })
        ));
        assert!(RouteSlice::new(route(), 0, 4).is_err());
    }

    #[test]
    fn slicing_rebases_times() {
        let slice = RouteSlice::full(route())
            .slice_beginning_at_node(NodeIndex(1))
            .unwrap();

        assert_eq!(slice.start(), 1);
        assert_eq!(slice.departure_node(), NodeIndex(1));
        assert_eq!(slice.cumulative_time_at(0), Some(Duration::zero()));
        assert_eq!(slice.cumulative_time(), Duration::seconds(600));

        let timed = slice.with_initial_time(Duration::seconds(1000));
        assert_eq!(timed.cumulative_time_at(0), Some(Duration::seconds(1000)));
        assert_eq!(timed.cumulative_time_at(1), Some(Duration::seconds(1300)));
        assert_eq!(timed.cumulative_time_at(3), None);
        assert_eq!(timed.travel_time(), Duration::seconds(600));
    }

    #[test]
    fn ending_at_node_is_inclusive() {
        let slice = RouteSlice::full(route())
            .with_initial_time(Duration::seconds(60))
            .slice_ending_at_node(NodeIndex(2))
            .unwrap();

        assert_eq!(slice.len(), 3);
        assert_eq!(slice.arrival_node(), NodeIndex(2));
        assert_eq!(slice.cumulative_time(), Duration::seconds(660));
        assert_eq!(slice.intermediate_stops().len(), 1);
    }

    #[test]
    fn slicing_at_missing_node() {
        let slice = RouteSlice::full(route());
        assert!(slice.slice_beginning_at_node(NodeIndex(42)).is_none());
        assert!(slice.begin_at(4).is_none());
        assert!(slice.end_at(4).is_none());
    }

    #[test]
    fn single_stop_slice() {
        let slice = RouteSlice::full(route()).begin_at(3).unwrap();
        assert_eq!(slice.len(), 1);
        assert!(slice.intermediate_stops().is_empty());
        assert_eq!(slice.travel_time(), Duration::zero());
    }

    #[test]
    fn timed_stops_match_cumulative_times() {
        let slice = RouteSlice::full(route())
            .begin_at(1)
            .unwrap()
            .with_initial_time(Duration::seconds(30));

        let times: Vec<_> = slice.timed_stops().map(|t| t.cumulative_time).collect();
        assert_eq!(
            times,
            vec![
                Duration::seconds(30),
                Duration::seconds(330),
                Duration::seconds(630)
            ]
        );
    }

    #[test]
    fn transformations_leave_original_untouched() {
        let original = RouteSlice::full(route());
        let _ = original.with_initial_time(Duration::seconds(500));
        let _ = original.begin_at(2);

        assert_eq!(original.initial_time(), Duration::zero());
        assert_eq!(original.start(), 0);
        assert_eq!(original, RouteSlice::full(route()));
    }
}
