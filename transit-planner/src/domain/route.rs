//! Routes and their stops.
//!
//! A `Route` is one trip pattern: an ordered, directed sequence of stops
//! with the travel time between consecutive stops. Routes are canonical
//! and immutable; the planner never changes one in place but works on
//! [`RouteSlice`](super::RouteSlice) views of it.

use chrono::Duration;

use super::{AgencyId, DomainError, ModalityId, NodeIndex, RouteId};

/// Icon used for a route when neither the route nor its modality sets one.
pub const DEFAULT_ROUTE_ICON: &str = "train";

/// Display colours of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteColor {
    pub background: String,
    pub text: String,
}

impl Default for RouteColor {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
        }
    }
}

/// A stop of a route at a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStop {
    /// Position as authored in the feed. Stops are ordered by it.
    pub sequence: u32,
    pub node: NodeIndex,
    /// Travel time from the previous stop. Always zero on the first stop.
    pub time: Duration,
    /// Non-halting stops are passed through: no boarding, no alighting.
    pub halts: bool,
    pub cancelled: bool,
    pub platform: Option<String>,
}

impl RouteStop {
    /// Create a halting, non-cancelled stop.
    pub fn new(sequence: u32, node: NodeIndex, time: Duration) -> Self {
        Self {
            sequence,
            node,
            time,
            halts: true,
            cancelled: false,
            platform: None,
        }
    }
}

/// A trip pattern over an ordered sequence of stops.
///
/// # Invariants
///
/// - At least one stop
/// - No negative travel times, so offsets are non-decreasing
/// - `offsets[i]` is the travel time from the first stop to stop `i`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub abbr: Option<String>,
    pub url: Option<String>,
    pub agency: Option<AgencyId>,
    pub modality: Option<ModalityId>,
    /// Overrides the modality's name in descriptions.
    pub modality_name: Option<String>,
    /// Overrides the modality's icon.
    pub icon: Option<String>,
    /// Destination label shown to travellers.
    pub headsign: Option<String>,
    pub color: RouteColor,
    stops: Vec<RouteStop>,
    offsets: Vec<Duration>,
}

impl Route {
    /// Construct a route, computing the offset of every stop.
    ///
    /// The first stop's `time` is reset to zero: it is the boarding point.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are no stops or a stop has a negative time.
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        mut stops: Vec<RouteStop>,
    ) -> Result<Self, DomainError> {
        let first = stops.first_mut().ok_or(DomainError::EmptyRoute)?;
        first.time = Duration::zero();

        let mut offsets = Vec::with_capacity(stops.len());
        let mut elapsed = Duration::zero();
        for stop in &stops {
            if stop.time < Duration::zero() {
                return Err(DomainError::NegativeTime("route stop"));
            }
            elapsed += stop.time;
            offsets.push(elapsed);
        }

        Ok(Self {
            id,
            name: name.into(),
            abbr: None,
            url: None,
            agency: None,
            modality: None,
            modality_name: None,
            icon: None,
            headsign: None,
            color: RouteColor::default(),
            stops,
            offsets,
        })
    }

    /// Returns all stops in order.
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Returns the number of stops (never zero).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns the stop at an index.
    pub fn stop(&self, index: usize) -> Option<&RouteStop> {
        self.stops.get(index)
    }

    /// Returns the travel time from the first stop to the stop at `index`.
    pub fn offset(&self, index: usize) -> Option<Duration> {
        self.offsets.get(index).copied()
    }

    /// Returns the travel time from the first to the last stop.
    pub fn total_time(&self) -> Duration {
        self.offsets.last().copied().unwrap_or_else(Duration::zero)
    }

    /// Returns the index of the first stop at `node`.
    ///
    /// With `exclude_non_halts`, stops the route passes through without
    /// halting are ignored.
    pub fn stop_index_at_node(&self, node: NodeIndex, exclude_non_halts: bool) -> Option<usize> {
        self.stops
            .iter()
            .position(|s| s.node == node && (!exclude_non_halts || s.halts))
    }

    /// Returns the first stop at `node`.
    pub fn stop_at_node(&self, node: NodeIndex, exclude_non_halts: bool) -> Option<&RouteStop> {
        self.stop_index_at_node(node, exclude_non_halts)
            .and_then(|i| self.stops.get(i))
    }

    /// Returns the abbreviation if set, otherwise the full name.
    pub fn display_name(&self) -> &str {
        self.abbr.as_deref().unwrap_or(&self.name)
    }

    /// Returns true if any stop of this route is cancelled.
    pub fn has_cancellations(&self) -> bool {
        self.stops.iter().any(|s| s.cancelled)
    }
}
