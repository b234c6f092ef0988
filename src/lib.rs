//! Facade crate for the courier routing engine.
//!
//! This crate re-exports the core domain types and exposes the route
//! optimizers behind feature flags.

#![forbid(unsafe_code)]

pub use courier_core::{
    AverageSpeedEstimator, Customer, DeliveryPlan, DeliveryPlanner, DistanceMetric,
    HaversineDistance, InfeasibleRouteError, Order, OrderError, PairIndex, PlanError,
    PlanRequest, PlannedStop, Restaurant, Route, RouteOptimizer, Stop, TimeEstimator, TravelCost,
    TravelCostError, TravelTimeEstimator, VisitKind, VisitNode, visits_for_orders,
};

#[cfg(feature = "test-support")]
pub use courier_core::test_support;

#[cfg(feature = "solver-greedy")]
pub use courier_solver_greedy::GreedyOptimizer;

#[cfg(feature = "solver-beam")]
pub use courier_solver_beam::{BeamSearchConfig, BeamSearchOptimizer};
