//! Partial routes explored by the beam search.

use std::time::Duration;

use courier_core::{Route, VisitNode};
use geo::Coord;

/// A partial route: the stops visited so far and where the courier stands.
///
/// Stops are addressed by their position in the optimizer's input slice. A
/// state is terminal once every stop has been visited.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
    location: Coord<f64>,
    time: Duration,
    visited: Vec<bool>,
    path: Vec<usize>,
    service_times: Vec<Duration>,
    priority: Duration,
}

impl RouteState {
    /// The empty route at `start` over `stop_count` stops.
    #[must_use]
    pub fn initial(start: Coord<f64>, stop_count: usize) -> Self {
        Self {
            location: start,
            time: Duration::ZERO,
            visited: vec![false; stop_count],
            path: Vec::with_capacity(stop_count),
            service_times: Vec::with_capacity(stop_count),
            priority: Duration::ZERO,
        }
    }

    /// Current position of the courier.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Time elapsed since the start of the route.
    #[must_use]
    pub const fn time(&self) -> Duration {
        self.time
    }

    /// Ranking key: elapsed time plus the optimistic cost to continue.
    #[must_use]
    pub const fn priority(&self) -> Duration {
        self.priority
    }

    /// Visited flag per input position.
    #[must_use]
    pub fn visited(&self) -> &[bool] {
        &self.visited
    }

    /// Input positions in visiting order.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Return `true` once every stop has been visited.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.path.len() == self.visited.len()
    }

    /// A child state that services the stop at `position`.
    ///
    /// `service` is the time the stop is serviced and `heuristic` the
    /// optimistic cost of continuing from its location.
    #[must_use]
    pub fn advance(
        &self,
        position: usize,
        location: Coord<f64>,
        service: Duration,
        heuristic: Duration,
    ) -> Self {
        let mut visited = self.visited.clone();
        if let Some(flag) = visited.get_mut(position) {
            *flag = true;
        }
        let mut path = self.path.clone();
        path.push(position);
        let mut service_times = self.service_times.clone();
        service_times.push(service);
        Self {
            location,
            time: service,
            visited,
            path,
            service_times,
            priority: service.saturating_add(heuristic),
        }
    }

    /// Resolve the path against the stops it was built from.
    #[must_use]
    pub fn into_route(self, nodes: &[VisitNode]) -> Route {
        let visits = self
            .path
            .iter()
            .filter_map(|&position| nodes.get(position).cloned())
            .collect();
        Route::from_parts(visits, self.service_times)
    }
}
