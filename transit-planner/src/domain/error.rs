//! Domain error types.
//!
//! These errors represent invariant violations when constructing feed and
//! journey values. They are distinct from feed loading errors.

use super::NodeIndex;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A route must serve at least one stop
    #[error("route must have at least one stop")]
    EmptyRoute,

    /// Travel times are offsets and cannot run backwards
    #[error("negative travel time: {0}")]
    NegativeTime(&'static str),

    /// Slice bounds don't fit the route
    #[error("invalid route slice {start}..={end} on a route of {len} stops")]
    InvalidSlice { start: usize, end: usize, len: usize },

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,

    /// Consecutive legs don't meet at the same node
    #[error("legs are not connected: {0} does not continue from {1}")]
    LegsNotConnected(NodeIndex, NodeIndex),

    /// An offset pushed a wall-clock time out of range
    #[error("time out of range")]
    TimeOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DomainError::EmptyRoute.to_string(),
            "route must have at least one stop"
        );

        let err = DomainError::NegativeTime("route stop");
        assert_eq!(err.to_string(), "negative travel time: route stop");

        let err = DomainError::InvalidSlice {
            start: 2,
            end: 1,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid route slice 2..=1 on a route of 3 stops"
        );

        assert_eq!(
            DomainError::EmptyJourney.to_string(),
            "journey must have at least one leg"
        );

        let err = DomainError::LegsNotConnected(NodeIndex(4), NodeIndex(2));
        assert_eq!(
            err.to_string(),
            "legs are not connected: #4 does not continue from #2"
        );

        assert_eq!(DomainError::TimeOutOfRange.to_string(), "time out of range");
    }
}
