//! Journey types.
//!
//! A `Journey` is one candidate answer to a planning query: an ordered
//! sequence of legs pinned to a wall-clock departure time. The planner
//! produces legs whose times are offsets from departure; this module turns
//! them into absolute times for display.

use chrono::{Duration, NaiveDateTime};

use super::{DomainError, Leg, NodeIndex, RouteStop, format_clock, format_duration};

/// A stop of a route leg with its absolute time.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTime {
    pub stop: RouteStop,
    /// Offset from the journey's departure.
    pub cumulative_time: Duration,
    pub time: NaiveDateTime,
}

impl StopTime {
    /// Returns the time formatted as `H:mm`.
    pub fn formatted_time(&self) -> String {
        format_clock(self.time)
    }
}

/// A leg of a journey with absolute times attached.
///
/// Owns its own copy of the leg, so attaching times never touches the
/// feed's canonical routes and transfers.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyLeg {
    leg: Leg,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
    stop_times: Vec<StopTime>,
}

impl JourneyLeg {
    fn new(leg: Leg, journey_departure: NaiveDateTime) -> Result<Self, DomainError> {
        let departure_time = add_offset(journey_departure, leg.initial_time())?;
        let arrival_time = add_offset(journey_departure, leg.cumulative_time())?;

        let stop_times = match &leg {
            Leg::Route(slice) => slice
                .timed_stops()
                .map(|timed| {
                    Ok(StopTime {
                        stop: timed.stop.clone(),
                        cumulative_time: timed.cumulative_time,
                        time: add_offset(journey_departure, timed.cumulative_time)?,
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?,
            Leg::Transfer(_) => Vec::new(),
        };

        Ok(Self {
            leg,
            departure_time,
            arrival_time,
            stop_times,
        })
    }

    /// Returns the underlying leg.
    pub fn leg(&self) -> &Leg {
        &self.leg
    }

    pub fn departure_node(&self) -> NodeIndex {
        self.leg.departure_node()
    }

    pub fn arrival_node(&self) -> NodeIndex {
        self.leg.arrival_node()
    }

    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    /// Returns the time spent on this leg.
    pub fn duration(&self) -> Duration {
        self.leg.duration()
    }

    /// Returns all stops with times (empty for transfer legs).
    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }

    /// Returns the boarding stop of a route leg.
    pub fn first_stop(&self) -> Option<&StopTime> {
        self.stop_times.first()
    }

    /// Returns the stops between boarding and alighting of a route leg.
    pub fn intermediate_stops(&self) -> &[StopTime] {
        if self.stop_times.len() < 3 {
            return &[];
        }
        &self.stop_times[1..self.stop_times.len() - 1]
    }

    /// Returns the alighting stop of a route leg.
    pub fn last_stop(&self) -> Option<&StopTime> {
        self.stop_times.last()
    }

    /// Returns the walking time in started minutes, for transfer legs.
    pub fn transfer_minutes(&self) -> Option<i64> {
        self.leg
            .as_transfer()
            .map(|t| super::ceil_minutes(t.time()))
    }
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (arrival node of one = departure node of next)
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    index: usize,
    legs: Vec<JourneyLeg>,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
}

impl Journey {
    /// Assemble a journey from legs timed relative to `departure_time`.
    ///
    /// The arrival time is the departure time plus the last leg's
    /// cumulative time. Every stop of every route leg gets its absolute
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The legs list is empty
    /// - Legs don't connect
    /// - A time falls outside the representable range
    pub fn new(
        index: usize,
        legs: Vec<Leg>,
        departure_time: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        let last = legs.last().ok_or(DomainError::EmptyJourney)?;
        let arrival_time = add_offset(departure_time, last.cumulative_time())?;

        for window in legs.windows(2) {
            let prev_arrival = window[0].arrival_node();
            let next_departure = window[1].departure_node();
            if prev_arrival != next_departure {
                return Err(DomainError::LegsNotConnected(next_departure, prev_arrival));
            }
        }

        let legs = legs
            .into_iter()
            .map(|leg| JourneyLeg::new(leg, departure_time))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            index,
            legs,
            departure_time,
            arrival_time,
        })
    }

    /// Returns the position at which the planner produced this journey.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[JourneyLeg] {
        &self.legs
    }

    /// Returns the origin node.
    pub fn departure_node(&self) -> NodeIndex {
        // Safe: validated non-empty at construction
        self.legs[0].departure_node()
    }

    /// Returns the destination node.
    pub fn arrival_node(&self) -> NodeIndex {
        self.legs[self.legs.len() - 1].arrival_node()
    }

    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    pub fn formatted_departure_time(&self) -> String {
        format_clock(self.departure_time)
    }

    pub fn formatted_arrival_time(&self) -> String {
        format_clock(self.arrival_time)
    }

    /// Returns the total journey duration.
    pub fn duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }

    /// Returns the duration formatted as `H:MM`.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration())
    }

    /// Returns the number of route legs (boarded trips).
    pub fn route_leg_count(&self) -> usize {
        self.legs.iter().filter(|l| l.leg().is_route()).count()
    }

    /// Returns the number of transfers: route legs minus one.
    ///
    /// A journey without route legs (a single walk) has no transfers.
    pub fn transfers(&self) -> usize {
        self.route_leg_count().saturating_sub(1)
    }

    pub fn first_leg_is_transfer(&self) -> bool {
        self.legs[0].leg().is_transfer()
    }

    pub fn last_leg_is_transfer(&self) -> bool {
        self.legs[self.legs.len() - 1].leg().is_transfer()
    }
}

fn add_offset(base: NaiveDateTime, offset: Duration) -> Result<NaiveDateTime, DomainError> {
    base.checked_add_signed(offset)
        .ok_or(DomainError::TimeOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Route, RouteId, RouteSlice, Transfer, TransferId};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn departure() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    /// Route over nodes `from..from+n`, 5 minutes between stops.
    fn slice(from: usize, n: usize, initial: i64) -> RouteSlice {
        let stops = (0..n)
            .map(|i| RouteStop::new(i as u32 + 1, NodeIndex(from + i), Duration::seconds(300)))
            .collect();
        let route = Route::new(RouteId::new(format!("r{from}")), "R", stops).unwrap();
        RouteSlice::full(Arc::new(route)).with_initial_time(Duration::seconds(initial))
    }

    fn walk(from: usize, to: usize, secs: i64, initial: i64) -> Transfer {
        Transfer::new(
            TransferId::new("t"),
            NodeIndex(to),
            NodeIndex(from),
            Duration::seconds(secs),
        )
        .unwrap()
        .align_to_node(NodeIndex(from))
        .unwrap()
        .with_initial_time(Duration::seconds(initial))
    }

    #[test]
    fn single_route_leg() {
        let journey = Journey::new(0, vec![Leg::Route(slice(0, 3, 0))], departure()).unwrap();

        assert_eq!(journey.departure_node(), NodeIndex(0));
        assert_eq!(journey.arrival_node(), NodeIndex(2));
        assert_eq!(journey.duration(), Duration::seconds(600));
        assert_eq!(journey.formatted_departure_time(), "10:00");
        assert_eq!(journey.formatted_arrival_time(), "10:10");
        assert_eq!(journey.formatted_duration(), "0:10");
        assert_eq!(journey.transfers(), 0);
        assert!(!journey.first_leg_is_transfer());

        let leg = &journey.legs()[0];
        let times: Vec<_> = leg.stop_times().iter().map(|s| s.formatted_time()).collect();
        assert_eq!(times, vec!["10:00", "10:05", "10:10"]);
        assert_eq!(leg.intermediate_stops().len(), 1);
        assert_eq!(leg.first_stop().unwrap().stop.node, NodeIndex(0));
        assert_eq!(leg.last_stop().unwrap().stop.node, NodeIndex(2));
    }

    #[test]
    fn route_walk_route() {
        // 0 -> 1 by route, walk 1 -> 5, 5 -> 6 by route after the minimum transfer
        let legs = vec![
            Leg::Route(slice(0, 2, 0)),
            Leg::Transfer(walk(1, 5, 90, 300)),
            Leg::Route(slice(5, 2, 450)),
        ];
        let journey = Journey::new(3, legs, departure()).unwrap();

        assert_eq!(journey.index(), 3);
        assert_eq!(journey.route_leg_count(), 2);
        assert_eq!(journey.transfers(), 1);
        assert_eq!(journey.duration(), Duration::seconds(750));
        assert_eq!(journey.formatted_duration(), "0:13");

        let walk_leg = &journey.legs()[1];
        assert_eq!(walk_leg.transfer_minutes(), Some(2));
        assert!(walk_leg.stop_times().is_empty());
        assert_eq!(walk_leg.departure_time().format("%H:%M:%S").to_string(), "10:05:00");
        assert_eq!(walk_leg.arrival_time().format("%H:%M:%S").to_string(), "10:06:30");

        let second = &journey.legs()[2];
        assert_eq!(second.departure_time().format("%H:%M:%S").to_string(), "10:07:30");
    }

    #[test]
    fn transfer_only_journey() {
        let journey = Journey::new(0, vec![Leg::Transfer(walk(0, 2, 120, 0))], departure()).unwrap();

        assert_eq!(journey.route_leg_count(), 0);
        assert_eq!(journey.transfers(), 0);
        assert!(journey.first_leg_is_transfer());
        assert!(journey.last_leg_is_transfer());
        assert_eq!(journey.duration(), Duration::seconds(120));
    }

    #[test]
    fn empty_journey() {
        let result = Journey::new(0, vec![], departure());
        assert!(matches!(result, Err(DomainError::EmptyJourney)));
    }

    #[test]
    fn disconnected_legs() {
        let legs = vec![Leg::Route(slice(0, 2, 0)), Leg::Route(slice(7, 2, 360))];
        let result = Journey::new(0, legs, departure());
        assert_eq!(
            result,
            Err(DomainError::LegsNotConnected(NodeIndex(7), NodeIndex(1)))
        );
    }

    #[test]
    fn time_overflow() {
        let legs = vec![Leg::Route(slice(0, 2, 0))];
        let result = Journey::new(0, legs, NaiveDateTime::MAX);
        assert_eq!(result, Err(DomainError::TimeOutOfRange));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Route, RouteId, RouteSlice};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::sync::Arc;

    proptest! {
        /// Arrival = departure + last leg's cumulative time, for any chain of rides
        #[test]
        fn arrival_matches_cumulative_time(
            times in prop::collection::vec(1i64..1800, 2..8),
            initial in 0i64..3600,
        ) {
            let stops = times
                .iter()
                .enumerate()
                .map(|(i, t)| RouteStop::new(i as u32, NodeIndex(i), Duration::seconds(*t)))
                .collect();
            let route = Arc::new(Route::new(RouteId::new("r"), "R", stops).unwrap());
            let slice = RouteSlice::full(route).with_initial_time(Duration::seconds(initial));
            let expected = slice.cumulative_time();

            let departure = NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap();
            let journey = Journey::new(0, vec![Leg::Route(slice)], departure).unwrap();

            prop_assert_eq!(journey.duration(), expected);
            prop_assert!(journey.arrival_time() > journey.departure_time());
            prop_assert_eq!(journey.transfers(), 0);

            let stop_times = journey.legs()[0].stop_times();
            for pair in stop_times.windows(2) {
                prop_assert!(pair[0].time <= pair[1].time);
            }
        }
    }
}
