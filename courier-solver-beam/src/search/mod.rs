//! `BeamSearchOptimizer` implementation.

use std::time::Duration;

use courier_core::{
    InfeasibleRouteError, PairIndex, Route, RouteOptimizer, TravelCost, VisitNode,
};
use geo::Coord;

use crate::{BeamSearchConfig, RouteState};

/// Outcome of one beam pass at a fixed width.
struct Pass {
    best: Option<RouteState>,
    deepest: usize,
}

/// Bounded best-first search over partial routes.
///
/// Every step expands each frontier state into all feasible one-stop
/// extensions, ranks the children by elapsed time plus the cost of reaching
/// the nearest unvisited stop, and keeps the best
/// [`beam_width`](BeamSearchConfig::beam_width) of them. Ties keep the order
/// in which children were generated, so results are deterministic. The
/// ranking ignores pairing and readiness, so it is a cheap guide rather than
/// a lower bound, and the search may discard the optimal route.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::{AverageSpeedEstimator, RouteOptimizer, TravelTimeEstimator, VisitNode};
/// use courier_solver_beam::BeamSearchOptimizer;
///
/// let cost = TravelTimeEstimator::haversine(AverageSpeedEstimator::default());
/// let optimizer = BeamSearchOptimizer::new(cost);
/// let nodes = vec![
///     VisitNode::pickup("O1", "R1", Coord { x: 0.0, y: 0.01 }, Duration::from_secs(300)),
///     VisitNode::dropoff("O1", "C1", Coord { x: 0.0, y: 0.02 }),
/// ];
///
/// let route = optimizer.compute_route(Coord { x: 0.0, y: 0.0 }, &nodes)?;
/// assert_eq!(route.visit_ids().collect::<Vec<_>>(), vec!["R1", "C1"]);
/// # Ok::<(), courier_core::InfeasibleRouteError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BeamSearchOptimizer<C> {
    cost: C,
    config: BeamSearchConfig,
}

impl<C: TravelCost> BeamSearchOptimizer<C> {
    /// Construct an optimizer using default configuration.
    pub fn new(cost: C) -> Self {
        Self::with_config(cost, BeamSearchConfig::default())
    }

    /// Construct an optimizer with explicit configuration.
    pub const fn with_config(cost: C, config: BeamSearchConfig) -> Self {
        Self { cost, config }
    }

    /// The travel cost in use.
    pub const fn cost(&self) -> &C {
        &self.cost
    }

    /// The configuration in use.
    pub const fn config(&self) -> &BeamSearchConfig {
        &self.config
    }

    /// Cheapest travel from the stop at `arrived` to any stop still unvisited.
    fn heuristic(&self, arrived: usize, nodes: &[VisitNode], visited: &[bool]) -> Duration {
        let Some(from) = nodes.get(arrived).map(|node| node.location) else {
            return Duration::ZERO;
        };
        nodes
            .iter()
            .zip(visited)
            .enumerate()
            .filter(|(position, (_, seen))| !**seen && *position != arrived)
            .map(|(_, (node, _))| self.cost.estimate(from, node.location))
            .min()
            .unwrap_or(Duration::ZERO)
    }

    /// All feasible one-stop extensions of `state`, in input order.
    fn expand(&self, state: &RouteState, nodes: &[VisitNode], index: &PairIndex) -> Vec<RouteState> {
        nodes
            .iter()
            .enumerate()
            .filter(|(position, _)| index.is_feasible(*position, state.visited()))
            .map(|(position, node)| {
                let travel = self.cost.estimate(state.location(), node.location);
                let service = node.service_time(state.time().saturating_add(travel));
                let heuristic = self.heuristic(position, nodes, state.visited());
                state.advance(position, node.location, service, heuristic)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn expand_all(
        &self,
        open: &[RouteState],
        nodes: &[VisitNode],
        index: &PairIndex,
    ) -> Vec<RouteState> {
        open.iter()
            .flat_map(|state| self.expand(state, nodes, index))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn expand_all(
        &self,
        open: &[RouteState],
        nodes: &[VisitNode],
        index: &PairIndex,
    ) -> Vec<RouteState> {
        use rayon::prelude::*;

        // Collecting preserves frontier order, keeping pruning deterministic.
        open.par_iter()
            .flat_map_iter(|state| self.expand(state, nodes, index))
            .collect()
    }

    /// Run one beam pass keeping at most `width` states per step.
    fn search(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
        index: &PairIndex,
        width: usize,
    ) -> Pass {
        let mut frontier = vec![RouteState::initial(start, nodes.len())];
        let mut best: Option<RouteState> = None;
        let mut deepest = 0;

        while !frontier.is_empty() {
            let (terminal, open): (Vec<_>, Vec<_>) =
                frontier.into_iter().partition(RouteState::is_terminal);
            for state in terminal {
                deepest = deepest.max(state.path().len());
                if best
                    .as_ref()
                    .is_none_or(|current| state.time() < current.time())
                {
                    best = Some(state);
                }
            }
            deepest = open
                .iter()
                .map(|state| state.path().len())
                .fold(deepest, usize::max);

            let mut children = self.expand_all(&open, nodes, index);
            let generated = children.len();
            children.sort_by_key(RouteState::priority);
            children.truncate(width);
            log::trace!(
                "beam width {width}: expanded {} states into {generated}, kept {}",
                open.len(),
                children.len()
            );
            frontier = children;
        }

        Pass { best, deepest }
    }
}

impl<C: TravelCost> RouteOptimizer for BeamSearchOptimizer<C> {
    fn compute_route(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
    ) -> Result<Route, InfeasibleRouteError> {
        let index = PairIndex::build(nodes)?;
        let total = nodes.len();
        log::debug!(
            "beam search routing {total} stops (width {}, widening {})",
            self.config.beam_width,
            self.config.widening
        );

        let mut best: Option<RouteState> = None;
        let mut deepest = 0;
        for width in self.config.widths() {
            let pass = self.search(start, nodes, &index, width);
            deepest = deepest.max(pass.deepest);
            if let Some(candidate) = pass.best
                && best
                    .as_ref()
                    .is_none_or(|current| candidate.time() < current.time())
            {
                log::trace!("beam width {width} completed after {:?}", candidate.time());
                best = Some(candidate);
            }
        }

        let Some(state) = best else {
            return Err(InfeasibleRouteError::Stalled {
                placed: deepest,
                total,
            });
        };
        log::debug!("beam search finished after {:?}", state.time());
        Ok(state.into_route(nodes))
    }
}

#[cfg(test)]
mod tests;
