//! Round-indexed arrival labels.

use std::collections::HashMap;

use chrono::Duration;

use crate::domain::{Leg, NodeIndex};

/// How a label's node was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Node the leg departs from.
    pub predecessor: NodeIndex,
    /// Route slice or transfer ending at the labelled node, timed from the
    /// journey's departure.
    pub leg: Leg,
}

/// Best known arrival at a node within one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub cumulative_time: Duration,
    /// `None` only for the origin's seed label.
    pub step: Option<Step>,
}

impl Label {
    /// The zero-cost label of the origin.
    pub fn seed() -> Self {
        Self {
            cumulative_time: Duration::zero(),
            step: None,
        }
    }

    /// A label reached over `leg` from `predecessor`.
    pub fn via(predecessor: NodeIndex, leg: Leg) -> Self {
        Self {
            cumulative_time: leg.cumulative_time(),
            step: Some(Step { predecessor, leg }),
        }
    }

    pub fn is_seed(&self) -> bool {
        self.step.is_none()
    }
}

/// Labels of every scanned round.
///
/// Round `k` holds the nodes whose best known time improved while
/// allowing `k` boardings. A node has at most one label per round.
#[derive(Debug, Clone, Default)]
pub struct LabelsByRound {
    rounds: Vec<HashMap<NodeIndex, Label>>,
}

impl LabelsByRound {
    /// Labels with an empty round 0.
    pub fn new() -> Self {
        Self {
            rounds: vec![HashMap::new()],
        }
    }

    /// Open the next round and return its number.
    pub fn push_round(&mut self) -> usize {
        self.rounds.push(HashMap::new());
        self.last_round()
    }

    /// Returns the number of the last opened round.
    pub fn last_round(&self) -> usize {
        self.rounds.len().saturating_sub(1)
    }

    pub fn get(&self, round: usize, node: NodeIndex) -> Option<&Label> {
        self.rounds.get(round)?.get(&node)
    }

    /// Returns the cumulative time of the label at `(round, node)`.
    pub fn time(&self, round: usize, node: NodeIndex) -> Option<Duration> {
        self.get(round, node).map(|label| label.cumulative_time)
    }

    /// Store a label, replacing any earlier one for the node in that round.
    ///
    /// Rounds that were never opened are ignored.
    pub fn insert(&mut self, round: usize, node: NodeIndex, label: Label) {
        if let Some(labels) = self.rounds.get_mut(round) {
            labels.insert(node, label);
        }
    }

    /// Returns the number of labels in a round.
    pub fn round_len(&self, round: usize) -> usize {
        self.rounds.get(round).map_or(0, HashMap::len)
    }

    /// Returns the number of labels across all rounds.
    pub fn len(&self) -> usize {
        self.rounds.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
