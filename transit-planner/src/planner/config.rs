//! Search configuration for the journey planner.

use chrono::Duration;

/// Rounds scanned when nothing else is configured.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Upper bound on rounds regardless of configuration.
///
/// Each round allows one more boarding; a feed with transfer cycles would
/// otherwise keep marking nodes forever.
pub const HARD_ROUND_CAP: usize = 100;

/// Minimum time between alighting one route and boarding the next, in
/// seconds.
pub const MIN_TRANSFER_TIME_SECS: i64 = 60;

/// Configuration parameters for journey search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum number of rounds (boardings) to scan.
    /// Values above [`HARD_ROUND_CAP`] are clamped.
    pub max_rounds: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given round limit.
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    /// Returns the number of rounds the scan will run at most.
    pub fn rounds(&self) -> usize {
        self.max_rounds.min(HARD_ROUND_CAP)
    }

    /// Returns the minimum transfer time as a Duration.
    pub fn min_transfer_time(&self) -> Duration {
        Duration::seconds(MIN_TRANSFER_TIME_SECS)
    }

    /// Returns the buffer added before boarding in `round`.
    ///
    /// The first boarding from the origin needs no buffer; every later
    /// one follows an alighting.
    pub fn boarding_penalty(&self, round: usize) -> Duration {
        if round > 1 {
            self.min_transfer_time()
        } else {
            Duration::zero()
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.max_rounds, 10);
        assert_eq!(config.rounds(), 10);
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();

        assert_eq!(config.min_transfer_time(), Duration::seconds(60));
        assert_eq!(config.boarding_penalty(0), Duration::zero());
        assert_eq!(config.boarding_penalty(1), Duration::zero());
        assert_eq!(config.boarding_penalty(2), Duration::seconds(60));
        assert_eq!(config.boarding_penalty(9), Duration::seconds(60));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(3);
        assert_eq!(config.rounds(), 3);

        let config = PlannerConfig::new(0);
        assert_eq!(config.rounds(), 0);
    }

    #[test]
    fn rounds_clamped_to_cap() {
        let config = PlannerConfig::new(5000);

        assert_eq!(config.max_rounds, 5000);
        assert_eq!(config.rounds(), HARD_ROUND_CAP);
    }
}
