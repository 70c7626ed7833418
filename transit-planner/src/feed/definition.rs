//! Feed definitions as authored.
//!
//! These are the unresolved, string-keyed shapes of feed entities. They
//! deserialize straight from the feed's TOML documents and are what
//! [`FeedBuilder`](super::FeedBuilder) accepts. The id of each definition
//! is the key of its table, so it is not a field here.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgencyDef {
    pub name: String,
    pub abbr: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalityDef {
    pub name: String,
    pub node_name: Option<String>,
    pub abbr: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeDef {
    pub name: String,
    pub code: Option<String>,
    pub url: Option<String>,
    pub modality: Option<String>,
    pub modality_node_name: Option<String>,
    pub icon: Option<String>,
    pub location: Option<String>,
}

impl NodeDef {
    /// A node definition with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferDef {
    pub between: String,
    pub and: String,
    /// Traversal time in seconds.
    pub time: i64,
    pub separate: bool,
}

impl TransferDef {
    pub fn new(between: impl Into<String>, and: impl Into<String>, time: i64) -> Self {
        Self {
            between: between.into(),
            and: and.into(),
            time,
            separate: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteColorDef {
    pub background: String,
    pub text: String,
}

impl Default for RouteColorDef {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StopDef {
    pub node: String,
    /// Travel time in seconds from the previous stop.
    pub time: i64,
    pub halts: bool,
    pub cancelled: bool,
    pub platform: Option<String>,
}

impl Default for StopDef {
    fn default() -> Self {
        Self {
            node: String::new(),
            time: 0,
            halts: true,
            cancelled: false,
            platform: None,
        }
    }
}

impl StopDef {
    /// A halting stop at `node`, `time` seconds after the previous one.
    pub fn new(node: impl Into<String>, time: i64) -> Self {
        Self {
            node: node.into(),
            time,
            ..Self::default()
        }
    }

    /// Marks the stop as passed through without halting.
    pub fn passing(mut self) -> Self {
        self.halts = false;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteDef {
    pub name: String,
    pub abbr: Option<String>,
    pub url: Option<String>,
    pub agency: Option<String>,
    pub modality: Option<String>,
    pub modality_name: Option<String>,
    pub icon: Option<String>,
    pub headsign: Option<String>,
    pub color: RouteColorDef,
    /// Stops keyed by their sequence number.
    pub stops: BTreeMap<String, StopDef>,
}

impl RouteDef {
    /// A route definition with stops numbered 1, 2, 3, ... in order.
    pub fn with_stops(name: impl Into<String>, stops: impl IntoIterator<Item = StopDef>) -> Self {
        Self {
            name: name.into(),
            stops: stops
                .into_iter()
                .enumerate()
                .map(|(i, stop)| ((i + 1).to_string(), stop))
                .collect(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationDef {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub period: Option<String>,
    pub affected_nodes: Vec<String>,
    pub affected_routes: Vec<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}
