//! Programmatic feed construction.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{
    Agency, AgencyId, Modality, ModalityId, Node, NodeId, NodeIndex, Notification,
    NotificationId, NotificationKind, Route, RouteColor, RouteId, RouteIndex, RouteStop,
    Transfer, TransferId, seconds,
};

use super::definition::{
    AgencyDef, ModalityDef, NodeDef, NotificationDef, RouteDef, TransferDef,
};
use super::error::FeedError;
use super::graph::{Feed, FeedParts};

/// Builder for a [`Feed`].
///
/// Definitions reference each other by string id. Nothing is resolved
/// until [`build`](Self::build), so definitions can be added in any order.
/// Arena indices follow insertion order.
///
/// # Example
///
/// ```
/// use transit_planner::feed::{FeedBuilder, NodeDef, RouteDef, StopDef};
///
/// let feed = FeedBuilder::new()
///     .node("a", NodeDef::named("Alpha"))
///     .node("b", NodeDef::named("Bravo"))
///     .route("r1", RouteDef::with_stops("Sprinter", [
///         StopDef::new("a", 0),
///         StopDef::new("b", 300),
///     ]))
///     .build()
///     .unwrap();
///
/// let a = feed.node_index("a").unwrap();
/// assert_eq!(feed.routes_at(a).count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeedBuilder {
    agencies: Vec<(String, AgencyDef)>,
    modalities: Vec<(String, ModalityDef)>,
    nodes: Vec<(String, NodeDef)>,
    transfers: Vec<(String, TransferDef)>,
    routes: Vec<(String, RouteDef)>,
    notifications: Vec<(String, NotificationDef)>,
}

impl FeedBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agency(mut self, id: impl Into<String>, def: AgencyDef) -> Self {
        self.agencies.push((id.into(), def));
        self
    }

    pub fn modality(mut self, id: impl Into<String>, def: ModalityDef) -> Self {
        self.modalities.push((id.into(), def));
        self
    }

    pub fn node(mut self, id: impl Into<String>, def: NodeDef) -> Self {
        self.nodes.push((id.into(), def));
        self
    }

    pub fn transfer(mut self, id: impl Into<String>, def: TransferDef) -> Self {
        self.transfers.push((id.into(), def));
        self
    }

    pub fn route(mut self, id: impl Into<String>, def: RouteDef) -> Self {
        self.routes.push((id.into(), def));
        self
    }

    pub fn notification(mut self, id: impl Into<String>, def: NotificationDef) -> Self {
        self.notifications.push((id.into(), def));
        self
    }

    /// Resolve all references and index the feed.
    ///
    /// # Errors
    ///
    /// Returns `Err` on duplicate ids, references to ids that were never
    /// defined, non-numeric stop sequences, and definitions that violate
    /// a domain invariant (a route without stops, a negative time).
    pub fn build(self) -> Result<Feed, FeedError> {
        let agency_ids = index_ids("agency", &self.agencies)?;
        let modality_ids = index_ids("modality", &self.modalities)?;
        let node_ids = index_ids("node", &self.nodes)?;
        index_ids("transfer", &self.transfers)?;
        let route_ids = index_ids("route", &self.routes)?;
        index_ids("notification", &self.notifications)?;

        let agencies = self
            .agencies
            .into_iter()
            .map(|(id, def)| Agency {
                id: AgencyId::new(id),
                name: def.name,
                abbr: def.abbr,
                description: def.description,
                url: def.url,
            })
            .collect();

        let modalities = self
            .modalities
            .into_iter()
            .map(|(id, def)| Modality {
                id: ModalityId::new(id),
                name: def.name,
                node_name: def.node_name,
                abbr: def.abbr,
                description: def.description,
                url: def.url,
                icon: def.icon,
            })
            .collect();

        let nodes = self
            .nodes
            .into_iter()
            .map(|(id, def)| {
                let modality = def
                    .modality
                    .map(|m| {
                        resolve(&modality_ids, "modality", &m, || format!("node '{id}'"))?;
                        Ok::<_, FeedError>(ModalityId::new(m))
                    })
                    .transpose()?;
                Ok(Node {
                    modality,
                    name: def.name,
                    code: def.code,
                    url: def.url,
                    modality_node_name: def.modality_node_name,
                    icon: def.icon,
                    location: def.location,
                    id: NodeId::new(id),
                })
            })
            .collect::<Result<Vec<_>, FeedError>>()?;

        let transfers = self
            .transfers
            .into_iter()
            .map(|(id, def)| {
                let referenced_by = || format!("transfer '{id}'");
                let between = resolve(&node_ids, "node", &def.between, referenced_by)?;
                let and = resolve(&node_ids, "node", &def.and, referenced_by)?;
                let mut transfer = Transfer::new(
                    TransferId::new(id.clone()),
                    NodeIndex(between),
                    NodeIndex(and),
                    seconds(def.time),
                )
                .map_err(|source| FeedError::Invalid {
                    kind: "transfer",
                    id,
                    source,
                })?;
                transfer.separate = def.separate;
                Ok(transfer)
            })
            .collect::<Result<Vec<_>, FeedError>>()?;

        let routes = self
            .routes
            .into_iter()
            .map(|(id, def)| build_route(id, def, &node_ids, &agency_ids, &modality_ids))
            .collect::<Result<Vec<_>, FeedError>>()?;

        let notifications = self
            .notifications
            .into_iter()
            .map(|(id, def)| {
                let referenced_by = || format!("notification '{id}'");
                let affected_nodes = def
                    .affected_nodes
                    .iter()
                    .map(|n| resolve(&node_ids, "node", n, referenced_by).map(NodeIndex))
                    .collect::<Result<Vec<_>, _>>()?;
                let affected_routes = def
                    .affected_routes
                    .iter()
                    .map(|r| resolve(&route_ids, "route", r, referenced_by).map(RouteIndex))
                    .collect::<Result<Vec<_>, _>>()?;

                let kind = def
                    .kind
                    .as_deref()
                    .map_or(NotificationKind::Other, NotificationKind::parse);
                let mut notification = Notification::new(NotificationId::new(id), kind);
                notification.name = def.name;
                notification.description = def.description;
                notification.period = def.period;
                notification.affected_nodes = affected_nodes;
                notification.affected_routes = affected_routes;
                notification.icon = def.icon;
                notification.color = def.color;
                Ok(notification)
            })
            .collect::<Result<Vec<_>, FeedError>>()?;

        let feed = Feed::from_parts(FeedParts {
            agencies,
            modalities,
            nodes,
            routes,
            transfers,
            notifications,
        });

        debug!(
            nodes = feed.nodes().len(),
            routes = feed.routes().len(),
            transfers = feed.transfers().len(),
            notifications = feed.notifications().len(),
            "Feed built"
        );

        Ok(feed)
    }
}

fn build_route(
    id: String,
    def: RouteDef,
    node_ids: &HashMap<String, usize>,
    agency_ids: &HashMap<String, usize>,
    modality_ids: &HashMap<String, usize>,
) -> Result<Route, FeedError> {
    let referenced_by = || format!("route '{id}'");

    let mut sequenced = def
        .stops
        .into_iter()
        .map(|(key, stop)| {
            key.trim()
                .parse::<u32>()
                .map(|sequence| (sequence, stop))
                .map_err(|_| FeedError::InvalidSequence {
                    route: id.clone(),
                    sequence: key,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    sequenced.sort_by_key(|(sequence, _)| *sequence);

    let stops = sequenced
        .into_iter()
        .map(|(sequence, stop)| {
            let node = resolve(node_ids, "node", &stop.node, referenced_by)?;
            let mut route_stop = RouteStop::new(sequence, NodeIndex(node), seconds(stop.time));
            route_stop.halts = stop.halts;
            route_stop.cancelled = stop.cancelled;
            route_stop.platform = stop.platform;
            Ok(route_stop)
        })
        .collect::<Result<Vec<_>, FeedError>>()?;

    if let Some(agency) = &def.agency {
        resolve(agency_ids, "agency", agency, referenced_by)?;
    }
    if let Some(modality) = &def.modality {
        resolve(modality_ids, "modality", modality, referenced_by)?;
    }

    let mut route = Route::new(RouteId::new(id.clone()), def.name, stops).map_err(|source| {
        FeedError::Invalid {
            kind: "route",
            id,
            source,
        }
    })?;
    route.abbr = def.abbr;
    route.url = def.url;
    route.agency = def.agency.map(AgencyId::new);
    route.modality = def.modality.map(ModalityId::new);
    route.modality_name = def.modality_name;
    route.icon = def.icon;
    route.headsign = def.headsign;
    route.color = RouteColor {
        background: def.color.background,
        text: def.color.text,
    };
    Ok(route)
}

/// Map each id to its position, rejecting duplicates.
fn index_ids<T>(
    kind: &'static str,
    defs: &[(String, T)],
) -> Result<HashMap<String, usize>, FeedError> {
    let mut ids = HashMap::with_capacity(defs.len());
    for (i, (id, _)) in defs.iter().enumerate() {
        if ids.insert(id.clone(), i).is_some() {
            return Err(FeedError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(ids)
}

fn resolve(
    ids: &HashMap<String, usize>,
    kind: &'static str,
    id: &str,
    referenced_by: impl FnOnce() -> String,
) -> Result<usize, FeedError> {
    ids.get(id)
        .copied()
        .ok_or_else(|| FeedError::UnknownReference {
            kind,
            id: id.to_string(),
            referenced_by: referenced_by(),
        })
}
