//! Estimate the time needed to travel between two locations.
//!
//! Optimizers consume a single capability, [`TravelCost`], mapping an ordered
//! pair of coordinates to a non-negative [`Duration`](std::time::Duration).
//! The default implementation, [`TravelTimeEstimator`], composes a pluggable
//! [`DistanceMetric`] with a pluggable [`TimeEstimator`]; great-circle distance
//! at a constant average speed is provided out of the box.
//!
//! Configuration errors, such as a non-positive speed, are reported when the
//! estimator is constructed rather than during a search.

mod cost;
mod distance;
mod error;
mod estimator;

pub use cost::TravelCost;
pub use distance::{DistanceMetric, HaversineDistance};
pub use error::TravelCostError;
pub use estimator::{AverageSpeedEstimator, TimeEstimator, TravelTimeEstimator};
