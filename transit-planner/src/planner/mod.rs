//! Journey planner using a round-based RAPTOR scan.
//!
//! This module answers "how do I get from node A to node B, leaving at
//! time T?" over a [`Feed`](crate::feed::Feed). A scan labels the best
//! arrival per node for every number of boardings; the destination's
//! labels are then traced back into one candidate journey per round and
//! ranked by duration.

mod config;
mod label;
mod rank;
mod scan;
mod search;
mod trace;


pub use config::{DEFAULT_MAX_ROUNDS, HARD_ROUND_CAP, MIN_TRANSFER_TIME_SECS, PlannerConfig};
pub use label::{Label, LabelsByRound, Step};
pub use rank::rank_journeys;
pub use scan::scan;
pub use search::{JourneyRequest, PlanError, PlanResult, Planner};
pub use trace::trace_back;
