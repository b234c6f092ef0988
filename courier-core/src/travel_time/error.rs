use thiserror::Error;

/// Errors raised while configuring a [`TravelCost`](super::TravelCost).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TravelCostError {
    /// The average speed was zero, negative or not finite.
    ///
    /// Travel time is derived by dividing distance by speed, so the speed must
    /// be strictly positive.
    #[error("average speed must be positive and finite, got {speed_kmh} km/h")]
    NonPositiveSpeed {
        /// The rejected speed in kilometres per hour.
        speed_kmh: f64,
    },
}
