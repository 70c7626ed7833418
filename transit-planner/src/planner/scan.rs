//! Round-based RAPTOR scan.
//!
//! Round `k` finds the best arrival at every node using at most `k`
//! boardings. Each round runs three stages:
//!
//! 1. Collect the routes halting at nodes marked in the previous round,
//!    keeping the earliest marked boarding stop per route.
//! 2. Ride each collected route once, labelling every halting stop that
//!    beats the best time seen in any round.
//! 3. Relax transfers from the nodes marked in this round, following
//!    chains of transfers within the round.
//!
//! The scan stops when a round marks nothing or the round limit is hit.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, trace, warn};

use crate::domain::{Leg, NodeIndex, Route, RouteIndex, RouteSlice};
use crate::feed::Feed;

use super::config::PlannerConfig;
use super::label::{Label, LabelsByRound};
use super::trace::transfer_endpoints;

/// Search state for one scan from one origin.
struct Scan<'a> {
    feed: &'a Feed,
    config: &'a PlannerConfig,
    labels: LabelsByRound,
    /// Best time per node over all rounds, excluding initial transfers.
    best: HashMap<NodeIndex, Duration>,
}

/// Scan from `origin` and return the labels of every round.
pub fn scan(feed: &Feed, origin: NodeIndex, config: &PlannerConfig) -> LabelsByRound {
    let mut scan = Scan {
        feed,
        config,
        labels: LabelsByRound::new(),
        best: HashMap::new(),
    };

    let mut marked = scan.initialize(origin);
    let rounds = config.rounds();

    while !marked.is_empty() && scan.labels.last_round() < rounds {
        let round = scan.labels.push_round();

        let queue = scan.accumulate_routes(&marked);
        let mut improved = BTreeSet::new();
        for (&route_index, &boarding) in &queue {
            if let Some(route) = feed.route(route_index) {
                scan.traverse_route(route, boarding, round, &mut improved);
            }
        }
        let by_route = improved.len();
        scan.relax_transfers(round, &mut improved);

        trace!(
            round,
            routes = queue.len(),
            by_route,
            by_transfer = improved.len() - by_route,
            "Scanned round"
        );

        marked = improved;
    }

    if !marked.is_empty() {
        warn!(
            origin = %origin,
            rounds,
            marked = marked.len(),
            "Round limit reached with nodes still marked"
        );
    }

    debug!(
        origin = %origin,
        rounds = scan.labels.last_round(),
        labels = scan.labels.len(),
        "Scan complete"
    );

    scan.labels
}

impl Scan<'_> {
    /// Label the origin and the nodes one transfer away from it.
    ///
    /// Initial transfer labels don't enter the best times, so a route
    /// reaching the same node later still yields an alternative.
    fn initialize(&mut self, origin: NodeIndex) -> BTreeSet<NodeIndex> {
        self.labels.insert(0, origin, Label::seed());
        self.best.insert(origin, Duration::zero());

        let mut marked = BTreeSet::from([origin]);
        for transfer in self.feed.transfers_at(origin) {
            let Some(aligned) = transfer.align_to_node(origin) else {
                continue;
            };
            let target = aligned.arrival_node();
            if target == origin {
                continue;
            }

            let aligned = aligned.with_initial_time(Duration::zero());
            if self
                .labels
                .time(0, target)
                .is_some_and(|time| time <= aligned.cumulative_time())
            {
                continue;
            }

            self.labels
                .insert(0, target, Label::via(origin, Leg::Transfer(aligned)));
            marked.insert(target);
        }

        marked
    }

    /// Stage 1: the earliest marked boarding stop of every route.
    fn accumulate_routes(&self, marked: &BTreeSet<NodeIndex>) -> BTreeMap<RouteIndex, usize> {
        let mut queue: BTreeMap<RouteIndex, usize> = BTreeMap::new();
        for &node in marked {
            for (route_index, stop_index) in self.feed.routes_at_excluding_non_halts(node) {
                let is_final = self
                    .feed
                    .route(route_index)
                    .is_none_or(|route| stop_index + 1 >= route.len());
                if is_final {
                    continue;
                }

                queue
                    .entry(route_index)
                    .and_modify(|boarding| *boarding = (*boarding).min(stop_index))
                    .or_insert(stop_index);
            }
        }
        queue
    }

    /// Stage 2: ride `route` from `boarding`, labelling improved stops.
    fn traverse_route(
        &mut self,
        route: &Arc<Route>,
        boarding: usize,
        round: usize,
        improved: &mut BTreeSet<NodeIndex>,
    ) {
        let penalty = self.config.boarding_penalty(round);
        let Some(mut running) = RouteSlice::full(Arc::clone(route)).begin_at(boarding) else {
            return;
        };
        let Some(board_time) = self.labels.time(round - 1, running.departure_node()) else {
            return;
        };
        running = running.with_initial_time(board_time + penalty);

        let mut position = 1;
        while position < running.len() {
            let Some(stop) = running.stops().get(position) else {
                break;
            };
            if !stop.halts {
                position += 1;
                continue;
            }
            let node = stop.node;
            let Some(arrival) = running.cumulative_time_at(position) else {
                break;
            };

            // Catch up: board here instead if the previous round got here
            // earlier than this trip does and there is somewhere left to go.
            let halts_later = running
                .stops()
                .get(position + 1..)
                .is_some_and(|rest| rest.iter().any(|s| s.halts));
            if let Some(previous) = self.labels.time(round - 1, node).filter(|_| halts_later) {
                let reboard = previous + penalty;
                if reboard < arrival {
                    if let Some(rest) = running.begin_at(position) {
                        running = rest.with_initial_time(reboard);
                        position = 1;
                        continue;
                    }
                }
            }

            if self.improves(node, arrival) {
                if let Some(leg) = running.end_at(position) {
                    let predecessor = leg.departure_node();
                    self.labels
                        .insert(round, node, Label::via(predecessor, Leg::Route(leg)));
                    self.best.insert(node, arrival);
                    improved.insert(node);
                }
            }
            position += 1;
        }
    }

    /// Stage 3: follow transfers from every node improved this round.
    fn relax_transfers(&mut self, round: usize, improved: &mut BTreeSet<NodeIndex>) {
        let mut worklist: VecDeque<NodeIndex> = improved.iter().copied().collect();

        while let Some(node) = worklist.pop_front() {
            let Some(time) = self.labels.time(round, node) else {
                continue;
            };
            let on_trace = transfer_endpoints(&self.labels, node, round);

            for transfer in self.feed.transfers_at(node) {
                let Some(aligned) = transfer.align_to_node(node) else {
                    continue;
                };
                let target = aligned.arrival_node();
                if target == node || on_trace.contains(&target) {
                    continue;
                }

                let aligned = aligned.with_initial_time(time);
                let arrival = aligned.cumulative_time();
                if !self.improves(target, arrival) {
                    continue;
                }

                self.labels
                    .insert(round, target, Label::via(node, Leg::Transfer(aligned)));
                self.best.insert(target, arrival);
                improved.insert(target);
                worklist.push_back(target);
            }
        }
    }

    fn improves(&self, node: NodeIndex, time: Duration) -> bool {
        self.best.get(&node).is_none_or(|&best| time < best)
    }
}
