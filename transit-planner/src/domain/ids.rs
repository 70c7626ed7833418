//! Identifier types for feed entities.
//!
//! Two kinds of identifiers live here. String identifiers (`NodeId`,
//! `RouteId`, ...) are the stable keys authored in the feed documents.
//! Arena indices (`NodeIndex`, `RouteIndex`, `TransferIndex`) are positions
//! inside a loaded [`Feed`](crate::feed::Feed) and are what the planner
//! passes around.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of an agency (operator) in the feed.
    AgencyId
);
string_id!(
    /// Identifier of a modality (rail, tram, ferry, ...).
    ModalityId
);
string_id!(
    /// Identifier of a node (station, stop or hub).
    NodeId
);
string_id!(
    /// Identifier of a route (one trip pattern).
    RouteId
);
string_id!(
    /// Identifier of a transfer between two nodes.
    TransferId
);
string_id!(
    /// Identifier of a service notification.
    NotificationId
);

/// Position of a node inside a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub usize);

/// Position of a route inside a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteIndex(pub usize);

/// Position of a transfer inside a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransferIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for RouteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn display_and_debug() {
        let id = NodeId::new("asd");
        assert_eq!(id.to_string(), "asd");
        assert_eq!(format!("{:?}", id), "NodeId(asd)");
        assert_eq!(format!("{:?}", RouteId::from("ic1")), "RouteId(ic1)");
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(NodeId::new("asd"), NodeIndex(3));

        assert_eq!(map.get("asd"), Some(&NodeIndex(3)));
        assert_eq!(map.get("ut"), None);
    }

    #[test]
    fn serde_is_transparent() {
        let id: NodeId = serde_json::from_str("\"rtd\"").unwrap();
        assert_eq!(id.as_str(), "rtd");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rtd\"");
    }

    #[test]
    fn index_display() {
        assert_eq!(NodeIndex(7).to_string(), "#7");
        assert_eq!(RouteIndex(0).to_string(), "#0");
    }
}
