//! Ordered visiting sequences produced by optimizers.
//!
//! A [`Route`] pairs each stop with the time at which it is serviced, so the
//! total elapsed time is the service time of the final stop.

use std::time::Duration;

use geo::Coord;

use crate::{TravelCost, VisitNode};

/// An ordered sequence of stops with their service times.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::{Route, VisitNode};
///
/// let pickup = VisitNode::pickup("O1", "R1", Coord { x: 0.0, y: 0.0 }, Duration::from_secs(60));
/// let dropoff = VisitNode::dropoff("O1", "C1", Coord { x: 0.0, y: 0.0 });
/// let route = Route::from_parts(
///     vec![pickup, dropoff],
///     vec![Duration::from_secs(60), Duration::from_secs(60)],
/// );
///
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_duration(), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    visits: Vec<VisitNode>,
    service_times: Vec<Duration>,
}

impl Route {
    /// Construct a route from stops and matching service times.
    ///
    /// Extra entries in the longer of the two vectors are dropped.
    #[must_use]
    pub fn from_parts(mut visits: Vec<VisitNode>, mut service_times: Vec<Duration>) -> Self {
        debug_assert_eq!(visits.len(), service_times.len());
        let len = visits.len().min(service_times.len());
        visits.truncate(len);
        service_times.truncate(len);
        Self {
            visits,
            service_times,
        }
    }

    /// Replay `visits` from `start`, deriving each service time from `cost`.
    ///
    /// Pickups are serviced no earlier than their ready time.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use geo::Coord;
    /// use courier_core::{Route, TravelCost, VisitNode};
    ///
    /// struct MinutePerDegree;
    ///
    /// impl TravelCost for MinutePerDegree {
    ///     fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
    ///         Duration::from_secs_f64((from.x - to.x).abs() * 60.0)
    ///     }
    /// }
    ///
    /// let pickup = VisitNode::pickup("O1", "R1", Coord { x: 5.0, y: 0.0 }, Duration::from_secs(600));
    /// let dropoff = VisitNode::dropoff("O1", "C1", Coord { x: 13.0, y: 0.0 });
    /// let route = Route::from_sequence(
    ///     Coord { x: 0.0, y: 0.0 },
    ///     vec![pickup, dropoff],
    ///     &MinutePerDegree,
    /// );
    ///
    /// assert_eq!(route.service_times(), &[Duration::from_secs(600), Duration::from_secs(1_080)]);
    /// ```
    #[must_use]
    pub fn from_sequence<C>(start: Coord<f64>, visits: Vec<VisitNode>, cost: &C) -> Self
    where
        C: TravelCost + ?Sized,
    {
        let service_times = service_times(start, &visits, cost);
        Self {
            visits,
            service_times,
        }
    }

    /// A route visiting nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stops in visiting order.
    #[must_use]
    pub fn visits(&self) -> &[VisitNode] {
        &self.visits
    }

    /// Service time of each stop, measured from the start of the route.
    #[must_use]
    pub fn service_times(&self) -> &[Duration] {
        &self.service_times
    }

    /// Iterate over stops together with their service times.
    pub fn iter(&self) -> impl Iterator<Item = (&VisitNode, Duration)> + '_ {
        self.visits.iter().zip(self.service_times.iter().copied())
    }

    /// Visit identifiers in visiting order.
    pub fn visit_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.visits.iter().map(|visit| visit.visit_id.as_str())
    }

    /// Time at which the final stop is serviced.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.service_times.last().copied().unwrap_or(Duration::ZERO)
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Return `true` when the route visits nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Consume the route, returning the stops in visiting order.
    #[must_use]
    pub fn into_visits(self) -> Vec<VisitNode> {
        self.visits
    }
}

/// Service time of each stop in `visits` when travelling from `start`.
pub fn service_times<C>(start: Coord<f64>, visits: &[VisitNode], cost: &C) -> Vec<Duration>
where
    C: TravelCost + ?Sized,
{
    let mut location = start;
    let mut clock = Duration::ZERO;
    visits
        .iter()
        .map(|visit| {
            let arrival = clock.saturating_add(cost.estimate(location, visit.location));
            clock = visit.service_time(arrival);
            location = visit.location;
            clock
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::{LineTravelCost, dropoff, minutes, pickup};

    #[rstest]
    fn empty_route_has_zero_duration() {
        let route = Route::empty();
        assert!(route.is_empty());
        assert_eq!(route.total_duration(), Duration::ZERO);
    }

    #[rstest]
    fn replay_applies_ready_time_clamp() {
        let visits = vec![pickup("O1", "R1", 5.0, 0.0, 10), dropoff("O1", "C1", 13.0, 0.0)];
        let route = Route::from_sequence(
            Coord { x: 0.0, y: 0.0 },
            visits,
            &LineTravelCost::default(),
        );
        assert_eq!(route.service_times(), &[minutes(10), minutes(18)]);
        assert_eq!(route.total_duration(), minutes(18));
        assert_eq!(route.visit_ids().collect::<Vec<_>>(), vec!["R1", "C1"]);
    }

    #[rstest]
    fn coincident_locations_cost_only_the_wait() {
        let visits = vec![pickup("O1", "R1", 0.0, 0.0, 7), dropoff("O1", "C1", 0.0, 0.0)];
        let route = Route::from_sequence(
            Coord { x: 0.0, y: 0.0 },
            visits,
            &LineTravelCost::default(),
        );
        assert_eq!(route.total_duration(), minutes(7));
    }

    #[rstest]
    fn iter_pairs_visits_with_times() {
        let visits = vec![dropoff("O1", "C1", 0.0, 0.0)];
        let route = Route::from_parts(visits, vec![minutes(1)]);
        let pairs: Vec<_> = route.iter().map(|(visit, time)| (visit.visit_id.clone(), time)).collect();
        assert_eq!(pairs, vec![("C1".to_owned(), minutes(1))]);
    }
}
