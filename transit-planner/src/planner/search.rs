//! Journey search over a feed.
//!
//! Runs one scan from the origin, traces the destination back from every
//! round it was labelled in, and ranks the resulting journeys.

use chrono::{Duration, Local, NaiveDateTime};
use tracing::{debug, info};

use crate::domain::{Journey, NodeId, NodeIndex};
use crate::feed::Feed;

use super::config::PlannerConfig;
use super::rank::rank_journeys;
use super::scan::scan;
use super::trace::trace_back;

/// Error from journey search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The request names a node the feed doesn't have
    #[error("unknown node '{0}'")]
    UnknownNode(NodeId),
}

/// Request for journey search.
#[derive(Debug, Clone)]
pub struct JourneyRequest {
    pub from: NodeId,
    pub to: NodeId,
    /// Departure time; the current local time if not given.
    pub departure: Option<NaiveDateTime>,
}

impl JourneyRequest {
    /// Create a new request departing now.
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            departure: None,
        }
    }

    /// Set the departure time.
    pub fn departing_at(mut self, departure: NaiveDateTime) -> Self {
        self.departure = Some(departure);
        self
    }
}

/// Result of journey search.
#[derive(Debug, Clone, Default)]
pub struct PlanResult {
    /// Found journeys, shortest first.
    pub journeys: Vec<Journey>,

    /// Number of rounds the scan ran.
    pub rounds_scanned: usize,
}

impl PlanResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no journey was found.
    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }
}

/// Journey planner over one feed.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    feed: &'a Feed,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(feed: &'a Feed, config: &'a PlannerConfig) -> Self {
        Self { feed, config }
    }

    pub fn feed(&self) -> &'a Feed {
        self.feed
    }

    /// Resolve a request's node ids and search.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either node id is not in the feed. Finding no
    /// journey is not an error.
    pub fn plan(&self, request: &JourneyRequest) -> Result<PlanResult, PlanError> {
        let from = self.resolve(&request.from)?;
        let to = self.resolve(&request.to)?;
        let departure = request
            .departure
            .unwrap_or_else(|| Local::now().naive_local());

        Ok(self.calculate(from, to, departure))
    }

    /// Search for journeys between two nodes.
    ///
    /// Returns one journey per round in which `to` was reached, shortest
    /// first. A journey from a node to itself is never returned, nor is
    /// one that arrives at the moment it departs.
    pub fn calculate(&self, from: NodeIndex, to: NodeIndex, departure: NaiveDateTime) -> PlanResult {
        if from == to {
            info!(node = %from, "Origin and destination are the same node");
            return PlanResult::empty();
        }

        let labels = scan(self.feed, from, self.config);
        let rounds_scanned = labels.last_round();

        let mut journeys = Vec::new();
        for round in 0..=rounds_scanned {
            let Some(legs) = trace_back(&labels, to, round) else {
                continue;
            };
            if legs.is_empty() {
                continue;
            }

            match Journey::new(journeys.len(), legs, departure) {
                Ok(journey) if journey.duration() <= Duration::zero() => {
                    debug!(round, "Discarding journey that takes no time");
                }
                Ok(journey) => journeys.push(journey),
                Err(e) => debug!(round, error = %e, "Discarding trace"),
            }
        }

        if journeys.is_empty() {
            info!(from = %from, to = %to, rounds_scanned, "No journeys found");
        } else {
            debug!(
                from = %from,
                to = %to,
                journeys = journeys.len(),
                rounds_scanned,
                "Search complete"
            );
        }

        PlanResult {
            journeys: rank_journeys(journeys),
            rounds_scanned,
        }
    }

    fn resolve(&self, id: &NodeId) -> Result<NodeIndex, PlanError> {
        self.feed
            .node_index(id.as_str())
            .ok_or_else(|| PlanError::UnknownNode(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedBuilder, NodeDef};

    #[test]
    fn plan_error_display() {
        let err = PlanError::UnknownNode(NodeId::new("xyz"));
        assert_eq!(err.to_string(), "unknown node 'xyz'");
    }

    #[test]
    fn request_builder() {
        let departure = chrono::NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let request = JourneyRequest::new("a", "b").departing_at(departure);

        assert_eq!(request.from, NodeId::new("a"));
        assert_eq!(request.to, NodeId::new("b"));
        assert_eq!(request.departure, Some(departure));
    }

    #[test]
    fn plan_rejects_unknown_nodes() {
        let feed = FeedBuilder::new()
            .node("a", NodeDef::named("Alpha"))
            .build()
            .unwrap();
        let config = PlannerConfig::default();
        let planner = Planner::new(&feed, &config);

        let err = planner.plan(&JourneyRequest::new("a", "zz")).unwrap_err();
        assert_eq!(err, PlanError::UnknownNode(NodeId::new("zz")));

        let err = planner.plan(&JourneyRequest::new("zz", "a")).unwrap_err();
        assert_eq!(err, PlanError::UnknownNode(NodeId::new("zz")));
    }

    #[test]
    fn plan_without_departure_uses_now() {
        let feed = FeedBuilder::new()
            .node("a", NodeDef::named("Alpha"))
            .node("b", NodeDef::named("Bravo"))
            .build()
            .unwrap();
        let config = PlannerConfig::default();
        let planner = Planner::new(&feed, &config);

        let result = planner.plan(&JourneyRequest::new("a", "b")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn empty_result() {
        let result = PlanResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.rounds_scanned, 0);
    }
}
