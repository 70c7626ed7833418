//! Nodes: the places a network connects.

use super::{Modality, ModalityId, NodeId};

/// Icon used for a node when neither the node nor its modality sets one.
pub const DEFAULT_NODE_ICON: &str = "location-dot";

/// A station, stop or hub.
///
/// Nodes are immutable once a feed is built. Their transfers and the routes
/// serving them are held by the [`Feed`](crate::feed::Feed), which owns the
/// adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub code: Option<String>,
    pub url: Option<String>,
    pub modality: Option<ModalityId>,
    /// Overrides the modality's node name in descriptions.
    pub modality_node_name: Option<String>,
    /// Overrides the modality's icon.
    pub icon: Option<String>,
    pub location: Option<String>,
}

impl Node {
    /// Create a node with only an id and a name.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
            url: None,
            modality: None,
            modality_node_name: None,
            icon: None,
            location: None,
        }
    }

    /// Returns the icon for this node, falling back to the modality's icon.
    pub fn icon<'a>(&'a self, modality: Option<&'a Modality>) -> &'a str {
        self.icon
            .as_deref()
            .or_else(|| modality.and_then(|m| m.icon.as_deref()))
            .unwrap_or(DEFAULT_NODE_ICON)
    }

    /// Returns a one-line description: kind of node, location and id.
    ///
    /// Absent parts are skipped, so a bare node describes itself by id.
    pub fn description(&self, modality: Option<&Modality>) -> String {
        let node_name = self
            .modality_node_name
            .as_deref()
            .or_else(|| modality.and_then(|m| m.node_name.as_deref()));

        node_name
            .into_iter()
            .chain(self.location.as_deref())
            .chain(std::iter::once(self.id.as_str()))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tram() -> Modality {
        Modality {
            id: ModalityId::new("tram"),
            name: "Tram".into(),
            node_name: Some("Tramhalte".into()),
            abbr: None,
            description: None,
            url: None,
            icon: Some("train-tram".into()),
        }
    }

    #[test]
    fn icon_fallbacks() {
        let mut node = Node::new(NodeId::new("cs"), "Centraal");
        assert_eq!(node.icon(None), DEFAULT_NODE_ICON);

        let modality = tram();
        assert_eq!(node.icon(Some(&modality)), "train-tram");

        node.icon = Some("star".into());
        assert_eq!(node.icon(Some(&modality)), "star");
    }

    #[test]
    fn description_parts() {
        let mut node = Node::new(NodeId::new("cs"), "Centraal");
        assert_eq!(node.description(None), "cs");

        node.location = Some("Amsterdam".into());
        let modality = tram();
        assert_eq!(node.description(Some(&modality)), "Tramhalte · Amsterdam · cs");

        node.modality_node_name = Some("Halte".into());
        assert_eq!(node.description(Some(&modality)), "Halte · Amsterdam · cs");
    }
}
