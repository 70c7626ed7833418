//! Service notifications: disruptions and planned works.

use super::{NodeIndex, NotificationId, RouteIndex};

/// The kind of a notification, which decides its default presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Disruption,
    Construction,
    /// A kind the feed names but this crate has no defaults for.
    Other,
}

impl NotificationKind {
    /// Parse a kind as written in a feed. Unknown kinds map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "disruption" => Self::Disruption,
            "construction" => Self::Construction,
            _ => Self::Other,
        }
    }

    /// Default display name, if the kind has one.
    pub fn default_name(&self) -> Option<&'static str> {
        match self {
            Self::Disruption => Some("Storing"),
            Self::Construction => Some("Werkzaamheden"),
            Self::Other => None,
        }
    }

    pub fn default_icon(&self) -> &'static str {
        match self {
            Self::Disruption => "triangle-exclamation",
            Self::Construction => "road-barrier",
            Self::Other => "circle-info",
        }
    }

    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Disruption => "danger",
            Self::Construction => "warning",
            Self::Other => "info",
        }
    }
}

/// A notice about nodes or routes, such as a disruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Free-form period, e.g. "1 t/m 4 juni".
    pub period: Option<String>,
    pub affected_nodes: Vec<NodeIndex>,
    pub affected_routes: Vec<RouteIndex>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl Notification {
    /// Create a notification with no affected nodes or routes.
    pub fn new(id: NotificationId, kind: NotificationKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            description: None,
            period: None,
            affected_nodes: Vec::new(),
            affected_routes: Vec::new(),
            icon: None,
            color: None,
        }
    }

    /// Returns the name, falling back to the kind's default.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().or(self.kind.default_name())
    }

    pub fn icon(&self) -> &str {
        self.icon.as_deref().unwrap_or(self.kind.default_icon())
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(self.kind.default_color())
    }

    pub fn has_affected_nodes(&self) -> bool {
        !self.affected_nodes.is_empty()
    }

    pub fn affects_node(&self, node: NodeIndex) -> bool {
        self.affected_nodes.contains(&node)
    }

    pub fn has_affected_routes(&self) -> bool {
        !self.affected_routes.is_empty()
    }

    pub fn affects_route(&self, route: RouteIndex) -> bool {
        self.affected_routes.contains(&route)
    }
}
