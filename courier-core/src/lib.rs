//! Core domain types for the courier routing engine.
//!
//! A courier starts at a location and must collect every order from its
//! restaurant and hand it to its customer. Orders are translated into paired
//! [`VisitNode`]s, and a [`RouteOptimizer`] chooses a visiting order in which
//! every drop-off follows its pickup and no pickup happens before the food is
//! ready. Travel times come from a pluggable [`TravelCost`].
//!
//! Concrete optimizers live in sibling crates; this crate provides the
//! contract, the error taxonomy, the travel-cost composition and the
//! order-planning layer that ties them together.

#![forbid(unsafe_code)]

#[cfg(feature = "serde")]
mod minutes;
pub mod optimizer;
pub mod order;
pub mod pairing;
pub mod plan;
pub mod route;
pub mod travel_time;
pub mod visit;

pub use optimizer::{InfeasibleRouteError, RouteOptimizer};
pub use order::{Customer, Order, OrderError, Restaurant, visits_for_orders};
pub use pairing::PairIndex;
pub use plan::{DeliveryPlan, DeliveryPlanner, PlanError, PlanRequest, PlannedStop, Stop};
pub use route::{Route, service_times};
pub use travel_time::{
    AverageSpeedEstimator, DistanceMetric, HaversineDistance, TimeEstimator, TravelCost,
    TravelCostError, TravelTimeEstimator,
};
pub use visit::{VisitKind, VisitNode, duration_as_minutes, duration_from_minutes};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
