//! Transfers between nodes.

use chrono::Duration;

use super::{DomainError, NodeIndex, TransferId};

/// A symmetric connection between two nodes, usually a walk.
///
/// A transfer is stored once per pair. `between` and `and` carry no
/// direction of travel until [`align_to_node`](Self::align_to_node) is
/// used to orient the transfer for a journey leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub id: TransferId,
    between: NodeIndex,
    and: NodeIndex,
    time: Duration,
    initial_time: Duration,
    /// Connects two distinct stations rather than platforms of one.
    pub separate: bool,
}

impl Transfer {
    /// Construct a transfer with no time elapsed before it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `time` is negative.
    pub fn new(
        id: TransferId,
        between: NodeIndex,
        and: NodeIndex,
        time: Duration,
    ) -> Result<Self, DomainError> {
        if time < Duration::zero() {
            return Err(DomainError::NegativeTime("transfer"));
        }
        Ok(Self {
            id,
            between,
            and,
            time,
            initial_time: Duration::zero(),
            separate: false,
        })
    }

    pub fn between(&self) -> NodeIndex {
        self.between
    }

    pub fn and(&self) -> NodeIndex {
        self.and
    }

    /// Returns the traversal time.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Returns the time elapsed before the transfer is started.
    pub fn initial_time(&self) -> Duration {
        self.initial_time
    }

    /// Returns the time elapsed when the transfer is completed.
    pub fn cumulative_time(&self) -> Duration {
        self.initial_time + self.time
    }

    /// Returns true if `node` is one of the two ends.
    pub fn includes(&self, node: NodeIndex) -> bool {
        self.between == node || self.and == node
    }

    /// Returns the node on the other side of `node`.
    ///
    /// Returns `None` if `node` is not an end of this transfer.
    pub fn opposite_node(&self, node: NodeIndex) -> Option<NodeIndex> {
        if self.between == node {
            Some(self.and)
        } else if self.and == node {
            Some(self.between)
        } else {
            None
        }
    }

    /// Returns a copy oriented so that travel starts at `node`.
    ///
    /// Returns `None` if `node` is not an end of this transfer.
    pub fn align_to_node(&self, node: NodeIndex) -> Option<Self> {
        let other = self.opposite_node(node)?;
        Some(Self {
            between: node,
            and: other,
            ..self.clone()
        })
    }

    /// Returns a copy re-timed to start at `initial_time`.
    pub fn with_initial_time(&self, initial_time: Duration) -> Self {
        Self {
            initial_time,
            ..self.clone()
        }
    }

    /// Returns the starting node once aligned.
    pub fn departure_node(&self) -> NodeIndex {
        self.between
    }

    /// Returns the destination node once aligned.
    pub fn arrival_node(&self) -> NodeIndex {
        self.and
    }
}
