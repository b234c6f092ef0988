//! Test-only travel costs, stop builders and route checks shared by unit,
//! behaviour and property tests across the workspace.

use std::collections::HashSet;
use std::time::Duration;

use geo::Coord;

use crate::{Route, TravelCost, VisitKind, VisitNode, route::service_times};

/// Whole minutes as a [`Duration`].
#[must_use]
pub const fn minutes(count: u64) -> Duration {
    Duration::from_secs(count * 60)
}

/// Construct a pickup at `(x, y)` ready after `ready_minutes`.
#[must_use]
pub fn pickup(group: &str, visit: &str, x: f64, y: f64, ready_minutes: u64) -> VisitNode {
    VisitNode::pickup(group, visit, Coord { x, y }, minutes(ready_minutes))
}

/// Construct a drop-off at `(x, y)`.
#[must_use]
pub fn dropoff(group: &str, visit: &str, x: f64, y: f64) -> VisitNode {
    VisitNode::dropoff(group, visit, Coord { x, y })
}

/// Straight-line travel cost over raw coordinate units.
///
/// Each unit of Euclidean distance costs a fixed duration, one minute by
/// default, which keeps hand-computed scenarios exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTravelCost {
    per_unit: Duration,
}

impl LineTravelCost {
    /// Charge `per_unit` for every unit of distance.
    #[must_use]
    pub const fn new(per_unit: Duration) -> Self {
        Self { per_unit }
    }
}

impl Default for LineTravelCost {
    fn default() -> Self {
        Self::new(minutes(1))
    }
}

impl TravelCost for LineTravelCost {
    #[expect(
        clippy::float_arithmetic,
        reason = "test cost scales Euclidean distance"
    )]
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
        let units = (from.x - to.x).hypot(from.y - to.y);
        Duration::try_from_secs_f64(self.per_unit.as_secs_f64() * units).unwrap_or(Duration::MAX)
    }
}

/// Travel cost answering from a fixed table of directed legs.
///
/// Identical locations cost nothing; legs missing from the table cost the
/// fallback duration.
#[derive(Debug, Clone, Default)]
pub struct FixedTravelCost {
    legs: Vec<(Coord<f64>, Coord<f64>, Duration)>,
    fallback: Duration,
}

impl FixedTravelCost {
    /// An empty table charging `fallback` for every leg.
    #[must_use]
    pub const fn new(fallback: Duration) -> Self {
        Self {
            legs: Vec::new(),
            fallback,
        }
    }

    /// Add a directed leg.
    #[must_use]
    pub fn with_leg(mut self, from: Coord<f64>, to: Coord<f64>, cost: Duration) -> Self {
        self.legs.push((from, to, cost));
        self
    }
}

impl TravelCost for FixedTravelCost {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
        if from == to {
            return Duration::ZERO;
        }
        self.legs
            .iter()
            .find(|(leg_from, leg_to, _)| *leg_from == from && *leg_to == to)
            .map_or(self.fallback, |(_, _, cost)| *cost)
    }
}

/// Check that `route` is a feasible ordering of `nodes` starting at `start`.
///
/// Verifies that the route is a permutation of the input, that every
/// drop-off follows its pickup, that no pickup is serviced before its ready
/// time and that the reported service times match a replay under `cost`.
///
/// # Errors
///
/// Returns a description of the first violated property.
pub fn assert_feasible_route<C>(
    start: Coord<f64>,
    nodes: &[VisitNode],
    route: &Route,
    cost: &C,
) -> Result<(), String>
where
    C: TravelCost + ?Sized,
{
    if route.len() != nodes.len() {
        return Err(format!(
            "route has {} stops but {} were supplied",
            route.len(),
            nodes.len()
        ));
    }

    let mut remaining: Vec<&VisitNode> = nodes.iter().collect();
    for visit in route.visits() {
        let Some(position) = remaining.iter().position(|node| *node == visit) else {
            return Err(format!(
                "stop {} of group {} is duplicated or unknown",
                visit.visit_id, visit.group_id
            ));
        };
        remaining.swap_remove(position);
    }

    let mut picked_up: HashSet<&str> = HashSet::new();
    for visit in route.visits() {
        match visit.kind {
            VisitKind::Pickup => {
                picked_up.insert(visit.group_id.as_str());
            }
            VisitKind::Dropoff if !picked_up.contains(visit.group_id.as_str()) => {
                return Err(format!(
                    "drop-off {} precedes the pickup of group {}",
                    visit.visit_id, visit.group_id
                ));
            }
            VisitKind::Dropoff => {}
        }
    }

    let replayed = service_times(start, route.visits(), cost);
    if replayed.as_slice() != route.service_times() {
        return Err(format!(
            "service times {:?} differ from replay {replayed:?}",
            route.service_times()
        ));
    }
    for (visit, time) in route.iter() {
        if time < visit.ready_time {
            return Err(format!(
                "pickup {} serviced at {time:?} before ready time {:?}",
                visit.visit_id, visit.ready_time
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fixed_cost_prefers_table_entries() {
        let a = Coord { x: 0.0, y: 0.0 };
        let b = Coord { x: 1.0, y: 1.0 };
        let cost = FixedTravelCost::new(minutes(99)).with_leg(a, b, minutes(5));
        assert_eq!(cost.estimate(a, b), minutes(5));
        assert_eq!(cost.estimate(b, a), minutes(99));
        assert_eq!(cost.estimate(a, a), Duration::ZERO);
    }

    #[rstest]
    fn detects_precedence_violation() {
        let start = Coord { x: 0.0, y: 0.0 };
        let nodes = vec![pickup("O1", "R1", 1.0, 0.0, 0), dropoff("O1", "C1", 2.0, 0.0)];
        let reversed = vec![nodes[1].clone(), nodes[0].clone()];
        let cost = LineTravelCost::default();
        let route = Route::from_sequence(start, reversed, &cost);
        let err = assert_feasible_route(start, &nodes, &route, &cost).expect_err("violation");
        assert!(err.contains("precedes"), "{err}");
    }

    #[rstest]
    fn detects_missing_stop() {
        let start = Coord { x: 0.0, y: 0.0 };
        let nodes = vec![pickup("O1", "R1", 1.0, 0.0, 0), dropoff("O1", "C1", 2.0, 0.0)];
        let cost = LineTravelCost::default();
        let route = Route::from_sequence(start, vec![nodes[0].clone()], &cost);
        assert!(assert_feasible_route(start, &nodes, &route, &cost).is_err());
    }
}
