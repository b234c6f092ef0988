//! The contract shared by every route construction strategy.

use std::sync::Arc;

use geo::Coord;
use thiserror::Error;

use crate::{Route, VisitKind, VisitNode};

/// Errors returned by [`RouteOptimizer::compute_route`].
///
/// Every variant means the strategy could not produce a complete, feasible
/// visiting order. A failure is specific to the strategy that raised it;
/// callers may retry with another strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfeasibleRouteError {
    /// A drop-off was supplied without the pickup of its group.
    #[error("group {group_id} has a drop-off but no pickup")]
    MissingPickup {
        /// Group whose pickup is absent.
        group_id: String,
    },
    /// A pickup was supplied without the drop-off of its group.
    #[error("group {group_id} has a pickup but no drop-off")]
    MissingDropoff {
        /// Group whose drop-off is absent.
        group_id: String,
    },
    /// A group contains more than one stop of the same kind.
    #[error("group {group_id} has more than one {kind}")]
    DuplicateVisit {
        /// Group containing the duplicate.
        group_id: String,
        /// Kind of the duplicated stop.
        kind: VisitKind,
    },
    /// The strategy ran out of feasible extensions before visiting every stop.
    #[error("no feasible route found: placed {placed} of {total} stops")]
    Stalled {
        /// Length of the longest partial route reached.
        placed: usize,
        /// Number of stops supplied.
        total: usize,
    },
}

/// Compute a visiting order for paired pickup and drop-off stops.
///
/// Implementations must return a permutation of `nodes` in which every
/// drop-off follows the pickup of its group and every pickup is serviced no
/// earlier than its ready time. Empty input yields an empty route. Partial
/// routes are never returned; a strategy that cannot complete a route reports
/// an [`InfeasibleRouteError`].
///
/// Optimizers must be `Send + Sync` so callers can share them across threads.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use courier_core::{InfeasibleRouteError, Route, RouteOptimizer, VisitNode};
///
/// struct InputOrder;
///
/// impl RouteOptimizer for InputOrder {
///     fn compute_route(
///         &self,
///         _start: Coord<f64>,
///         nodes: &[VisitNode],
///     ) -> Result<Route, InfeasibleRouteError> {
///         Ok(Route::from_parts(nodes.to_vec(), vec![Default::default(); nodes.len()]))
///     }
/// }
///
/// let route = InputOrder.compute_route(Coord { x: 0.0, y: 0.0 }, &[])?;
/// assert!(route.is_empty());
/// # Ok::<(), InfeasibleRouteError>(())
/// ```
pub trait RouteOptimizer: Send + Sync {
    /// Order `nodes` into a feasible route starting at `start`.
    fn compute_route(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
    ) -> Result<Route, InfeasibleRouteError>;
}

impl<T: RouteOptimizer + ?Sized> RouteOptimizer for &T {
    fn compute_route(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
    ) -> Result<Route, InfeasibleRouteError> {
        (**self).compute_route(start, nodes)
    }
}

impl<T: RouteOptimizer + ?Sized> RouteOptimizer for Box<T> {
    fn compute_route(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
    ) -> Result<Route, InfeasibleRouteError> {
        (**self).compute_route(start, nodes)
    }
}

impl<T: RouteOptimizer + ?Sized> RouteOptimizer for Arc<T> {
    fn compute_route(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
    ) -> Result<Route, InfeasibleRouteError> {
        (**self).compute_route(start, nodes)
    }
}
