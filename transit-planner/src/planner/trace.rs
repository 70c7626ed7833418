//! Reconstructing legs from round-indexed labels.

use std::collections::BTreeSet;

use crate::domain::{Leg, NodeIndex};

use super::label::{LabelsByRound, Step};

/// The steps leading to a label, newest first.
struct Trace<'a> {
    steps: Vec<&'a Step>,
    /// Whether the walk ended at the origin's seed label.
    complete: bool,
}

/// Walk predecessors from `(round, node)` back towards the seed.
///
/// A route leg consumes a round; a transfer does not. The walk stops early
/// if a label is missing or the chain is longer than there are labels.
fn walk(labels: &LabelsByRound, node: NodeIndex, round: usize) -> Trace<'_> {
    let mut steps = Vec::new();
    let mut node = node;
    let mut round = round;
    let limit = labels.len();

    loop {
        let Some(label) = labels.get(round, node) else {
            return Trace {
                steps,
                complete: false,
            };
        };
        let Some(step) = &label.step else {
            return Trace {
                steps,
                complete: true,
            };
        };

        steps.push(step);
        if steps.len() > limit {
            return Trace {
                steps,
                complete: false,
            };
        }

        if step.leg.is_route() {
            let Some(previous) = round.checked_sub(1) else {
                return Trace {
                    steps,
                    complete: false,
                };
            };
            round = previous;
        }
        node = step.predecessor;
    }
}

/// Returns the legs from the origin to `node` as labelled in `round`.
///
/// Returns `None` if `node` has no label in that round or the chain of
/// predecessors doesn't reach the origin. The origin itself traces to an
/// empty list.
pub fn trace_back(labels: &LabelsByRound, node: NodeIndex, round: usize) -> Option<Vec<Leg>> {
    let trace = walk(labels, node, round);
    if !trace.complete {
        return None;
    }
    Some(trace.steps.into_iter().rev().map(|step| step.leg.clone()).collect())
}

/// Returns both endpoints of every transfer on the trace to `(round, node)`.
pub(crate) fn transfer_endpoints(
    labels: &LabelsByRound,
    node: NodeIndex,
    round: usize,
) -> BTreeSet<NodeIndex> {
    walk(labels, node, round)
        .steps
        .into_iter()
        .filter_map(|step| step.leg.as_transfer())
        .flat_map(|transfer| [transfer.between(), transfer.and()])
        .collect()
}
