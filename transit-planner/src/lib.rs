//! Transit journey planner.
//!
//! Loads a small static transit feed and answers: "how do I get from
//! this node to that one, leaving now?" using a round-based RAPTOR scan.

pub mod domain;
pub mod dto;
pub mod feed;
pub mod planner;
