//! Plan deliveries by running an optimizer over a batch of orders.
//!
//! [`DeliveryPlanner`] translates orders into visit nodes, asks its
//! [`RouteOptimizer`] for a route and resolves each stop back to the
//! restaurant or customer it represents.

use std::collections::HashMap;
use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{
    Customer, InfeasibleRouteError, Order, Restaurant, RouteOptimizer, VisitKind,
    visits_for_orders,
};

/// Errors returned by [`DeliveryPlanner::plan_route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The optimizer could not build a feasible route.
    #[error(transparent)]
    Infeasible(#[from] InfeasibleRouteError),
    /// The optimizer returned a stop that none of the orders produced.
    #[error("route contains unknown {kind} {visit_id} for order {order_id}")]
    UnknownVisit {
        /// Group identifier reported by the optimizer.
        order_id: String,
        /// Visit identifier reported by the optimizer.
        visit_id: String,
        /// Kind of the unexpected stop.
        kind: VisitKind,
    },
}

/// A batch of orders to deliver from a starting location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Where the courier starts, `x = longitude` and `y = latitude`.
    pub start: Coord<f64>,
    /// Orders to deliver.
    pub orders: Vec<Order>,
}

/// The place visited at a planned stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Stop {
    /// Collect an order.
    Restaurant(Restaurant),
    /// Deliver an order.
    Customer(Customer),
}

impl Stop {
    /// Identifier of the restaurant or customer.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Restaurant(restaurant) => &restaurant.id,
            Self::Customer(customer) => &customer.id,
        }
    }

    /// Position of the stop.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        match self {
            Self::Restaurant(restaurant) => restaurant.location,
            Self::Customer(customer) => customer.location,
        }
    }
}

/// One stop of a [`DeliveryPlan`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedStop {
    /// Order served by the stop.
    pub order_id: String,
    /// Restaurant or customer visited.
    pub stop: Stop,
    /// Time the stop is serviced, measured from the start of the route.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "arrival_minutes", with = "crate::minutes")
    )]
    pub arrival: Duration,
}

/// An ordered delivery plan.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPlan {
    /// Stops in visiting order.
    pub stops: Vec<PlannedStop>,
    /// Time at which the final stop is serviced.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "total_minutes", with = "crate::minutes")
    )]
    pub total_duration: Duration,
}

impl DeliveryPlan {
    /// Identifiers of the visited restaurants and customers in order.
    pub fn stop_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.stops.iter().map(|planned| planned.stop.id())
    }
}

/// Plans delivery routes with a chosen [`RouteOptimizer`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::{
///     Customer, DeliveryPlanner, InfeasibleRouteError, Order, Restaurant, Route,
///     RouteOptimizer, VisitNode,
/// };
///
/// struct InputOrder;
///
/// impl RouteOptimizer for InputOrder {
///     fn compute_route(
///         &self,
///         _start: Coord<f64>,
///         nodes: &[VisitNode],
///     ) -> Result<Route, InfeasibleRouteError> {
///         let times = nodes.iter().map(|node| node.ready_time).collect();
///         Ok(Route::from_parts(nodes.to_vec(), times))
///     }
/// }
///
/// let restaurant = Restaurant::new("R1", "Dosa Corner", Coord { x: 0.0, y: 5.0 }, 1.0)?;
/// let customer = Customer::new("C1", "Asha", Coord { x: 0.0, y: 3.0 });
/// let planner = DeliveryPlanner::new(InputOrder);
/// let plan = planner.plan_route(Coord { x: 0.0, y: 0.0 }, &[Order::new("O1", restaurant, customer)])?;
///
/// assert_eq!(plan.stop_ids().collect::<Vec<_>>(), vec!["R1", "C1"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeliveryPlanner<O> {
    optimizer: O,
}

impl<O: RouteOptimizer> DeliveryPlanner<O> {
    /// Plan with `optimizer`.
    pub const fn new(optimizer: O) -> Self {
        Self { optimizer }
    }

    /// The optimizer in use.
    pub const fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Plan a route serving every order, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Infeasible`] when the optimizer fails, for
    /// example because two orders share an id, and
    /// [`PlanError::UnknownVisit`] when it returns a stop that was not
    /// requested.
    pub fn plan_route(&self, start: Coord<f64>, orders: &[Order]) -> Result<DeliveryPlan, PlanError> {
        let nodes = visits_for_orders(orders);
        log::debug!("planning {} orders ({} stops)", orders.len(), nodes.len());
        let route = self.optimizer.compute_route(start, &nodes)?;

        let by_group: HashMap<&str, &Order> = orders
            .iter()
            .map(|order| (order.order_id.as_str(), order))
            .collect();
        let stops = route
            .iter()
            .map(|(visit, arrival)| {
                let stop = by_group
                    .get(visit.group_id.as_str())
                    .and_then(|order| match visit.kind {
                        VisitKind::Pickup if order.restaurant.id == visit.visit_id => {
                            Some(Stop::Restaurant(order.restaurant.clone()))
                        }
                        VisitKind::Dropoff if order.customer.id == visit.visit_id => {
                            Some(Stop::Customer(order.customer.clone()))
                        }
                        VisitKind::Pickup | VisitKind::Dropoff => None,
                    })
                    .ok_or_else(|| PlanError::UnknownVisit {
                        order_id: visit.group_id.clone(),
                        visit_id: visit.visit_id.clone(),
                        kind: visit.kind,
                    })?;
                Ok(PlannedStop {
                    order_id: visit.group_id.clone(),
                    stop,
                    arrival,
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        let plan = DeliveryPlan {
            stops,
            total_duration: route.total_duration(),
        };
        log::debug!(
            "planned {} stops finishing after {:?}",
            plan.stops.len(),
            plan.total_duration
        );
        Ok(plan)
    }
}
