//! `GreedyOptimizer` implementation.

use std::time::Duration;

use courier_core::{
    InfeasibleRouteError, PairIndex, Route, RouteOptimizer, TravelCost, VisitNode,
};
use geo::Coord;

/// Build routes by always servicing the soonest-reachable feasible stop.
///
/// Candidates are compared by service time, i.e. arrival clamped to the
/// pickup's ready time. Ties go to the stop supplied first, so identical
/// input always yields an identical route.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::{AverageSpeedEstimator, RouteOptimizer, TravelTimeEstimator, VisitNode};
/// use courier_solver_greedy::GreedyOptimizer;
///
/// let cost = TravelTimeEstimator::haversine(AverageSpeedEstimator::default());
/// let optimizer = GreedyOptimizer::new(cost);
/// let nodes = vec![
///     VisitNode::dropoff("O1", "C1", Coord { x: 0.0, y: 0.02 }),
///     VisitNode::pickup("O1", "R1", Coord { x: 0.0, y: 0.01 }, Duration::from_secs(300)),
/// ];
///
/// let route = optimizer.compute_route(Coord { x: 0.0, y: 0.0 }, &nodes)?;
/// assert_eq!(route.visit_ids().collect::<Vec<_>>(), vec!["R1", "C1"]);
/// # Ok::<(), courier_core::InfeasibleRouteError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyOptimizer<C> {
    cost: C,
}

impl<C: TravelCost> GreedyOptimizer<C> {
    /// Construct an optimizer using `cost` for travel times.
    pub const fn new(cost: C) -> Self {
        Self { cost }
    }

    /// The travel cost in use.
    pub const fn cost(&self) -> &C {
        &self.cost
    }

    /// Position and service time of the feasible stop serviced soonest.
    fn next_stop(
        &self,
        nodes: &[VisitNode],
        index: &PairIndex,
        visited: &[bool],
        location: Coord<f64>,
        clock: Duration,
    ) -> Option<(usize, Duration)> {
        let mut best: Option<(usize, Duration)> = None;
        for (position, node) in nodes.iter().enumerate() {
            if !index.is_feasible(position, visited) {
                continue;
            }
            let arrival = clock.saturating_add(self.cost.estimate(location, node.location));
            let service = node.service_time(arrival);
            if best.is_none_or(|(_, best_service)| service < best_service) {
                best = Some((position, service));
            }
        }
        best
    }
}

impl<C: TravelCost> RouteOptimizer for GreedyOptimizer<C> {
    fn compute_route(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
    ) -> Result<Route, InfeasibleRouteError> {
        let index = PairIndex::build(nodes)?;
        let total = nodes.len();
        log::debug!("greedy optimizer routing {total} stops");

        let mut visited = vec![false; total];
        let mut visits = Vec::with_capacity(total);
        let mut service_times = Vec::with_capacity(total);
        let mut location = start;
        let mut clock = Duration::ZERO;

        while visits.len() < total {
            let Some((position, service)) =
                self.next_stop(nodes, &index, &visited, location, clock)
            else {
                return Err(InfeasibleRouteError::Stalled {
                    placed: visits.len(),
                    total,
                });
            };
            let (Some(node), Some(flag)) = (nodes.get(position), visited.get_mut(position)) else {
                return Err(InfeasibleRouteError::Stalled {
                    placed: visits.len(),
                    total,
                });
            };
            log::trace!("greedy step: {} at {service:?}", node.visit_id);
            *flag = true;
            location = node.location;
            clock = service;
            visits.push(node.clone());
            service_times.push(service);
        }

        log::debug!("greedy optimizer finished after {clock:?}");
        Ok(Route::from_parts(visits, service_times))
    }
}
