//! Journey legs.
//!
//! A `Leg` is one traversed edge of a journey: riding a slice of a route
//! or walking a transfer. Both variants share the same capability surface
//! (cumulative time, departure node, arrival node), so the planner and the
//! journey assembler treat them uniformly.

use chrono::Duration;

use super::{NodeIndex, RouteSlice, Transfer};

/// One leg of a journey.
///
/// Route legs are sliced to exactly the boarded-to-alighted span; transfer
/// legs are aligned to the direction of travel.
#[derive(Debug, Clone, PartialEq)]
pub enum Leg {
    /// Riding a route from its first to its last stop
    Route(RouteSlice),
    /// Walking (or otherwise crossing) a transfer
    Transfer(Transfer),
}

impl Leg {
    /// Returns the time elapsed, since departure, at the end of this leg.
    pub fn cumulative_time(&self) -> Duration {
        match self {
            Leg::Route(slice) => slice.cumulative_time(),
            Leg::Transfer(transfer) => transfer.cumulative_time(),
        }
    }

    /// Returns the time elapsed, since departure, at the start of this leg.
    pub fn initial_time(&self) -> Duration {
        match self {
            Leg::Route(slice) => slice.initial_time(),
            Leg::Transfer(transfer) => transfer.initial_time(),
        }
    }

    /// Returns the time spent on this leg itself.
    pub fn duration(&self) -> Duration {
        self.cumulative_time() - self.initial_time()
    }

    /// Returns the node where this leg starts.
    pub fn departure_node(&self) -> NodeIndex {
        match self {
            Leg::Route(slice) => slice.departure_node(),
            Leg::Transfer(transfer) => transfer.departure_node(),
        }
    }

    /// Returns the node where this leg ends.
    pub fn arrival_node(&self) -> NodeIndex {
        match self {
            Leg::Route(slice) => slice.arrival_node(),
            Leg::Transfer(transfer) => transfer.arrival_node(),
        }
    }

    /// Returns true if this is a route leg.
    pub fn is_route(&self) -> bool {
        matches!(self, Leg::Route(_))
    }

    /// Returns true if this is a transfer leg.
    pub fn is_transfer(&self) -> bool {
        matches!(self, Leg::Transfer(_))
    }

    /// Returns the route slice if this is a route leg.
    pub fn as_route(&self) -> Option<&RouteSlice> {
        match self {
            Leg::Route(slice) => Some(slice),
            Leg::Transfer(_) => None,
        }
    }

    /// Returns the transfer if this is a transfer leg.
    pub fn as_transfer(&self) -> Option<&Transfer> {
        match self {
            Leg::Route(_) => None,
            Leg::Transfer(transfer) => Some(transfer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Route, RouteId, RouteStop, TransferId};
    use std::sync::Arc;

    fn slice() -> RouteSlice {
        let stops = vec![
            RouteStop::new(1, NodeIndex(0), Duration::zero()),
            RouteStop::new(2, NodeIndex(1), Duration::seconds(300)),
            RouteStop::new(3, NodeIndex(2), Duration::seconds(300)),
        ];
        let route = Route::new(RouteId::new("r"), "R", stops).unwrap();
        RouteSlice::full(Arc::new(route)).with_initial_time(Duration::seconds(60))
    }

    fn transfer() -> Transfer {
        Transfer::new(
            TransferId::new("t"),
            NodeIndex(5),
            NodeIndex(2),
            Duration::seconds(120),
        )
        .unwrap()
        .align_to_node(NodeIndex(2))
        .unwrap()
        .with_initial_time(Duration::seconds(660))
    }

    #[test]
    fn route_leg() {
        let leg = Leg::Route(slice());

        assert!(leg.is_route());
        assert!(!leg.is_transfer());
        assert!(leg.as_route().is_some());
        assert!(leg.as_transfer().is_none());
        assert_eq!(leg.departure_node(), NodeIndex(0));
        assert_eq!(leg.arrival_node(), NodeIndex(2));
        assert_eq!(leg.initial_time(), Duration::seconds(60));
        assert_eq!(leg.cumulative_time(), Duration::seconds(660));
        assert_eq!(leg.duration(), Duration::seconds(600));
    }

    #[test]
    fn transfer_leg() {
        let leg = Leg::Transfer(transfer());

        assert!(leg.is_transfer());
        assert!(leg.as_transfer().is_some());
        assert!(leg.as_route().is_none());
        assert_eq!(leg.departure_node(), NodeIndex(2));
        assert_eq!(leg.arrival_node(), NodeIndex(5));
        assert_eq!(leg.cumulative_time(), Duration::seconds(780));
        assert_eq!(leg.duration(), Duration::seconds(120));
    }
}
