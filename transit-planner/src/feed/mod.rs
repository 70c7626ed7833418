//! The transit feed graph.
//!
//! A [`Feed`] holds agencies, modalities, nodes, routes, transfers and
//! notifications, with per-node adjacency precomputed for the planner.
//! Feeds are assembled with [`FeedBuilder`] from string-keyed definitions,
//! usually read from a directory of TOML documents by [`Feed::load_dir`].

mod builder;
mod definition;
mod error;
mod graph;
mod loader;

pub use builder::FeedBuilder;
pub use definition::{
    AgencyDef, ModalityDef, NodeDef, NotificationDef, RouteColorDef, RouteDef, StopDef,
    TransferDef,
};
pub use error::FeedError;
pub use graph::Feed;
pub use loader::FeedDocuments;
