//! The in-memory feed graph.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    Agency, AgencyId, DEFAULT_ROUTE_ICON, Modality, ModalityId, Node, NodeId, NodeIndex,
    Notification, NotificationId, Route, RouteId, RouteIndex, Transfer, TransferId,
    TransferIndex,
};

/// A loaded transit feed.
///
/// Nodes, routes and transfers live in arenas and are referred to by
/// [`NodeIndex`], [`RouteIndex`] and [`TransferIndex`]. The feed is
/// read-only once built; planners borrow it and keep their search state
/// elsewhere, so one feed can serve any number of queries.
///
/// Construct one with [`FeedBuilder`](super::FeedBuilder) or load a
/// directory of TOML documents with [`Feed::load_dir`].
#[derive(Debug, Default)]
pub struct Feed {
    agencies: Vec<Agency>,
    modalities: Vec<Modality>,
    nodes: Vec<Node>,
    routes: Vec<Arc<Route>>,
    transfers: Vec<Transfer>,
    notifications: Vec<Notification>,

    agency_lookup: HashMap<AgencyId, usize>,
    modality_lookup: HashMap<ModalityId, usize>,
    node_lookup: HashMap<NodeId, NodeIndex>,
    route_lookup: HashMap<RouteId, RouteIndex>,
    transfer_lookup: HashMap<TransferId, TransferIndex>,
    notification_lookup: HashMap<NotificationId, usize>,

    /// Transfers incident to each node.
    node_transfers: Vec<Vec<TransferIndex>>,
    /// Every (route, stop index) pair serving each node, grouped by route
    /// in stop order.
    node_routes: Vec<Vec<(RouteIndex, usize)>>,
}

/// The resolved contents of a feed, ready to be indexed.
#[derive(Debug, Default)]
pub(crate) struct FeedParts {
    pub agencies: Vec<Agency>,
    pub modalities: Vec<Modality>,
    pub nodes: Vec<Node>,
    pub routes: Vec<Route>,
    pub transfers: Vec<Transfer>,
    pub notifications: Vec<Notification>,
}

impl Feed {
    /// Index resolved feed contents.
    ///
    /// Every `NodeIndex` inside `parts` must point into `parts.nodes`.
    pub(crate) fn from_parts(parts: FeedParts) -> Self {
        let FeedParts {
            agencies,
            modalities,
            nodes,
            routes,
            transfers,
            notifications,
        } = parts;

        let mut node_transfers = vec![Vec::new(); nodes.len()];
        for (i, transfer) in transfers.iter().enumerate() {
            let index = TransferIndex(i);
            if let Some(list) = node_transfers.get_mut(transfer.between().0) {
                list.push(index);
            }
            if transfer.and() != transfer.between() {
                if let Some(list) = node_transfers.get_mut(transfer.and().0) {
                    list.push(index);
                }
            }
        }

        let mut node_routes = vec![Vec::new(); nodes.len()];
        for (i, route) in routes.iter().enumerate() {
            for (stop_index, stop) in route.stops().iter().enumerate() {
                if let Some(list) = node_routes.get_mut(stop.node.0) {
                    list.push((RouteIndex(i), stop_index));
                }
            }
        }

        Self {
            agency_lookup: agencies
                .iter()
                .enumerate()
                .map(|(i, a)| (a.id.clone(), i))
                .collect(),
            modality_lookup: modalities
                .iter()
                .enumerate()
                .map(|(i, m)| (m.id.clone(), i))
                .collect(),
            node_lookup: nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (n.id.clone(), NodeIndex(i)))
                .collect(),
            route_lookup: routes
                .iter()
                .enumerate()
                .map(|(i, r)| (r.id.clone(), RouteIndex(i)))
                .collect(),
            transfer_lookup: transfers
                .iter()
                .enumerate()
                .map(|(i, t)| (t.id.clone(), TransferIndex(i)))
                .collect(),
            notification_lookup: notifications
                .iter()
                .enumerate()
                .map(|(i, n)| (n.id.clone(), i))
                .collect(),
            agencies,
            modalities,
            nodes,
            routes: routes.into_iter().map(Arc::new).collect(),
            transfers,
            notifications,
            node_transfers,
            node_routes,
        }
    }

    // Agencies and modalities

    pub fn agencies(&self) -> &[Agency] {
        &self.agencies
    }

    pub fn agency(&self, id: &str) -> Option<&Agency> {
        self.agency_lookup.get(id).and_then(|&i| self.agencies.get(i))
    }

    pub fn modalities(&self) -> &[Modality] {
        &self.modalities
    }

    pub fn modality(&self, id: &str) -> Option<&Modality> {
        self.modality_lookup.get(id).and_then(|&i| self.modalities.get(i))
    }

    // Nodes

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate nodes together with their arena index.
    pub fn indexed_nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0)
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_lookup.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.node_index(id).and_then(|index| self.node(index))
    }

    pub fn node_modality(&self, index: NodeIndex) -> Option<&Modality> {
        let node = self.node(index)?;
        self.modality(node.modality.as_ref()?.as_str())
    }

    /// Returns the node's icon, falling back to its modality's icon.
    pub fn node_icon(&self, index: NodeIndex) -> Option<&str> {
        let node = self.node(index)?;
        Some(node.icon(self.node_modality(index)))
    }

    pub fn node_description(&self, index: NodeIndex) -> Option<String> {
        let node = self.node(index)?;
        Some(node.description(self.node_modality(index)))
    }

    // Routes

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn route(&self, index: RouteIndex) -> Option<&Arc<Route>> {
        self.routes.get(index.0)
    }

    pub fn route_index(&self, id: &str) -> Option<RouteIndex> {
        self.route_lookup.get(id).copied()
    }

    pub fn route_by_id(&self, id: &str) -> Option<&Arc<Route>> {
        self.route_index(id).and_then(|index| self.route(index))
    }

    pub fn route_agency(&self, index: RouteIndex) -> Option<&Agency> {
        let route = self.route(index)?;
        self.agency(route.agency.as_ref()?.as_str())
    }

    pub fn route_modality(&self, index: RouteIndex) -> Option<&Modality> {
        let route = self.route(index)?;
        self.modality(route.modality.as_ref()?.as_str())
    }

    /// Returns the route's icon, falling back to its modality's icon.
    pub fn route_icon(&self, index: RouteIndex) -> Option<&str> {
        let route = self.route(index)?;
        let icon = route
            .icon
            .as_deref()
            .or_else(|| self.route_modality(index).and_then(|m| m.icon.as_deref()))
            .unwrap_or(DEFAULT_ROUTE_ICON);
        Some(icon)
    }

    /// Routes with a stop at `node`, paired with the index of that stop.
    ///
    /// A route that visits the node more than once is listed once, at its
    /// first visit.
    pub fn routes_at(&self, node: NodeIndex) -> impl Iterator<Item = (RouteIndex, usize)> + '_ {
        self.route_stops_at(node, false)
    }

    /// Routes that halt at `node`, paired with the index of the first
    /// halting stop there.
    pub fn routes_at_excluding_non_halts(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (RouteIndex, usize)> + '_ {
        self.route_stops_at(node, true)
    }

    fn route_stops_at(
        &self,
        node: NodeIndex,
        exclude_non_halts: bool,
    ) -> impl Iterator<Item = (RouteIndex, usize)> + '_ {
        let mut last = None;
        self.node_routes
            .get(node.0)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&(route, stop_index)| {
                !exclude_non_halts
                    || self
                        .route(route)
                        .and_then(|r| r.stop(stop_index))
                        .is_some_and(|stop| stop.halts)
            })
            .filter(move |&(route, _)| {
                let first = last != Some(route);
                last = Some(route);
                first
            })
    }

    // Transfers

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn transfer(&self, index: TransferIndex) -> Option<&Transfer> {
        self.transfers.get(index.0)
    }

    pub fn transfer_by_id(&self, id: &str) -> Option<&Transfer> {
        self.transfer_lookup
            .get(id)
            .and_then(|&index| self.transfer(index))
    }

    /// Transfers incident to `node`, in either orientation.
    pub fn transfers_at(&self, node: NodeIndex) -> impl Iterator<Item = &Transfer> + '_ {
        self.node_transfers
            .get(node.0)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.transfer(index))
    }

    /// Transfers incident to `node` that stay within one station.
    pub fn transfers_at_excluding_separate(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = &Transfer> + '_ {
        self.transfers_at(node).filter(|t| !t.separate)
    }

    /// The transfer connecting `a` and `b`, in either orientation.
    pub fn transfer_between(&self, a: NodeIndex, b: NodeIndex) -> Option<&Transfer> {
        self.transfers_at(a)
            .find(|t| t.opposite_node(a) == Some(b))
    }

    // Notifications

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notification_lookup
            .get(id)
            .and_then(|&i| self.notifications.get(i))
    }

    pub fn notifications_for_node(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = &Notification> + '_ {
        self.notifications
            .iter()
            .filter(move |n| n.affects_node(node))
    }

    pub fn notifications_for_route(
        &self,
        route: RouteIndex,
    ) -> impl Iterator<Item = &Notification> + '_ {
        self.notifications
            .iter()
            .filter(move |n| n.affects_route(route))
    }
}
