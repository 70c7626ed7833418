//! Domain types for the transit journey planner.
//!
//! This module contains the value types of a transit feed (nodes, routes,
//! transfers, ...) and of planned journeys. All types enforce their
//! invariants at construction time, and all transformations return new
//! values, so a canonical route or transfer can be shared freely between
//! many labels and journeys.

mod agency;
mod error;
mod ids;
mod journey;
mod leg;
mod node;
mod notification;
mod route;
mod route_slice;
mod time;
mod transfer;

pub use agency::{Agency, Modality};
pub use error::DomainError;
pub use ids::{
    AgencyId, ModalityId, NodeId, NodeIndex, NotificationId, RouteId, RouteIndex, TransferId,
    TransferIndex,
};
pub use journey::{Journey, JourneyLeg, StopTime};
pub use leg::Leg;
pub use node::{DEFAULT_NODE_ICON, Node};
pub use notification::{Notification, NotificationKind};
pub use route::{DEFAULT_ROUTE_ICON, Route, RouteColor, RouteStop};
pub use route_slice::{RouteSlice, TimedStop};
pub use time::{TimeError, ceil_minutes, format_clock, format_duration, parse_departure, seconds};
pub use transfer::Transfer;
