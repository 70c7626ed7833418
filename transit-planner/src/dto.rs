//! Serializable views of planned journeys.
//!
//! Domain journeys refer to nodes and routes by arena index. These types
//! resolve them against the feed so a presentation layer gets names,
//! icons and clock times without access to the feed itself.

use serde::Serialize;

use crate::domain::{
    DEFAULT_NODE_ICON, DEFAULT_ROUTE_ICON, Journey, JourneyLeg, Leg, NodeIndex, Notification,
    RouteSlice, StopTime, Transfer, ceil_minutes, format_clock,
};
use crate::feed::Feed;
use crate::planner::PlanResult;

/// A node for display.
#[derive(Debug, Serialize)]
pub struct NodeInfo {
    /// Node id
    pub id: String,

    /// Display name
    pub name: String,

    /// Icon name, with the modality's as fallback
    pub icon: String,

    /// Kind of node, location and id
    pub description: String,
}

/// A notification attached to a route leg.
#[derive(Debug, Serialize)]
pub struct NotificationResult {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
}

/// A stop of a route leg.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub node: NodeInfo,

    /// Clock time at this stop (`H:mm`)
    pub time: String,

    pub platform: Option<String>,

    /// Whether the route halts here
    pub halts: bool,

    pub cancelled: bool,
}

/// A ride on a route.
#[derive(Debug, Serialize)]
pub struct RouteLegResult {
    pub route_id: String,

    /// Abbreviation or name
    pub name: String,

    pub headsign: Option<String>,

    pub icon: String,

    /// Background colour
    pub color: String,

    /// Text colour
    pub text_color: String,

    /// Agency display name
    pub agency: Option<String>,

    /// Boarding stop
    pub departure: StopResult,

    /// Alighting stop
    pub arrival: StopResult,

    /// Stops between boarding and alighting
    pub intermediate_stops: Vec<StopResult>,

    /// Time on board in minutes
    pub duration_mins: i64,

    pub notifications: Vec<NotificationResult>,
}

/// A walk between two nodes.
#[derive(Debug, Serialize)]
pub struct TransferLegResult {
    pub from: NodeInfo,
    pub to: NodeInfo,

    /// Clock time the walk starts
    pub departure_time: String,

    /// Clock time the walk ends
    pub arrival_time: String,

    /// Walking time in started minutes
    pub duration_mins: i64,
}

/// A leg of a journey.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LegResult {
    Route(RouteLegResult),
    Transfer(TransferLegResult),
}

/// A journey option.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    /// Order in which the planner found this journey
    pub index: usize,

    pub departure_node: NodeInfo,
    pub arrival_node: NodeInfo,

    /// Departure time from origin (`H:mm`)
    pub departure_time: String,

    /// Arrival time at destination (`H:mm`)
    pub arrival_time: String,

    /// Total duration in seconds
    pub duration_secs: i64,

    /// Total duration as `H:MM`
    pub duration: String,

    /// Number of changes between routes
    pub transfers: usize,

    pub legs: Vec<LegResult>,
}

/// Response for journey planning.
#[derive(Debug, Serialize)]
pub struct PlanJourneyResponse {
    /// Found journey options, shortest first
    pub journeys: Vec<JourneyResult>,

    /// Number of rounds the scan ran
    pub rounds_scanned: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl NodeInfo {
    /// Resolve a node of `feed`.
    ///
    /// An index the feed doesn't know is shown by its number.
    pub fn from_node(feed: &Feed, index: NodeIndex) -> Self {
        match feed.node(index) {
            Some(node) => Self {
                id: node.id.to_string(),
                name: node.name.clone(),
                icon: feed
                    .node_icon(index)
                    .unwrap_or(DEFAULT_NODE_ICON)
                    .to_string(),
                description: feed.node_description(index).unwrap_or_default(),
            },
            None => Self {
                id: index.to_string(),
                name: index.to_string(),
                icon: DEFAULT_NODE_ICON.to_string(),
                description: String::new(),
            },
        }
    }
}

impl NotificationResult {
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            name: notification.name().map(str::to_string),
            description: notification.description.clone(),
            icon: notification.icon().to_string(),
            color: notification.color().to_string(),
        }
    }
}

impl StopResult {
    pub fn from_stop_time(feed: &Feed, stop_time: &StopTime) -> Self {
        Self {
            node: NodeInfo::from_node(feed, stop_time.stop.node),
            time: stop_time.formatted_time(),
            platform: stop_time.stop.platform.clone(),
            halts: stop_time.stop.halts,
            cancelled: stop_time.stop.cancelled,
        }
    }
}

impl RouteLegResult {
    /// Create from a route leg and its stop times.
    ///
    /// Returns `None` if the leg has no stop times.
    pub fn from_leg(feed: &Feed, slice: &RouteSlice, leg: &JourneyLeg) -> Option<Self> {
        let departure = StopResult::from_stop_time(feed, leg.first_stop()?);
        let arrival = StopResult::from_stop_time(feed, leg.last_stop()?);
        let intermediate_stops = leg
            .intermediate_stops()
            .iter()
            .map(|s| StopResult::from_stop_time(feed, s))
            .collect();

        let route = slice.route();
        let route_index = feed.route_index(route.id.as_str());
        let icon = route_index
            .and_then(|index| feed.route_icon(index))
            .or(route.icon.as_deref())
            .unwrap_or(DEFAULT_ROUTE_ICON)
            .to_string();
        let agency = route_index
            .and_then(|index| feed.route_agency(index))
            .map(|a| a.display_name().to_string());
        let notifications = route_index
            .map(|index| {
                feed.notifications_for_route(index)
                    .map(NotificationResult::from_notification)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            route_id: route.id.to_string(),
            name: route.display_name().to_string(),
            headsign: route.headsign.clone(),
            icon,
            color: route.color.background.clone(),
            text_color: route.color.text.clone(),
            agency,
            departure,
            arrival,
            intermediate_stops,
            duration_mins: ceil_minutes(slice.travel_time()),
            notifications,
        })
    }
}

impl TransferLegResult {
    pub fn from_leg(feed: &Feed, transfer: &Transfer, leg: &JourneyLeg) -> Self {
        Self {
            from: NodeInfo::from_node(feed, transfer.departure_node()),
            to: NodeInfo::from_node(feed, transfer.arrival_node()),
            departure_time: format_clock(leg.departure_time()),
            arrival_time: format_clock(leg.arrival_time()),
            duration_mins: ceil_minutes(transfer.time()),
        }
    }
}

impl LegResult {
    /// Create from a journey leg.
    ///
    /// Returns `None` for a route leg without stops.
    pub fn from_leg(feed: &Feed, leg: &JourneyLeg) -> Option<Self> {
        match leg.leg() {
            Leg::Route(slice) => RouteLegResult::from_leg(feed, slice, leg).map(Self::Route),
            Leg::Transfer(transfer) => Some(Self::Transfer(TransferLegResult::from_leg(
                feed, transfer, leg,
            ))),
        }
    }
}

impl JourneyResult {
    /// Create from a domain Journey.
    pub fn from_journey(feed: &Feed, journey: &Journey) -> Self {
        Self {
            index: journey.index(),
            departure_node: NodeInfo::from_node(feed, journey.departure_node()),
            arrival_node: NodeInfo::from_node(feed, journey.arrival_node()),
            departure_time: journey.formatted_departure_time(),
            arrival_time: journey.formatted_arrival_time(),
            duration_secs: journey.duration().num_seconds(),
            duration: journey.formatted_duration(),
            transfers: journey.transfers(),
            legs: journey
                .legs()
                .iter()
                .filter_map(|leg| LegResult::from_leg(feed, leg))
                .collect(),
        }
    }
}

impl PlanJourneyResponse {
    pub fn from_result(feed: &Feed, result: &PlanResult) -> Self {
        Self {
            journeys: result
                .journeys
                .iter()
                .map(|j| JourneyResult::from_journey(feed, j))
                .collect(),
            rounds_scanned: result.rounds_scanned,
        }
    }
}
