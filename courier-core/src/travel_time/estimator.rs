//! Convert distances into travel times.

use std::time::Duration;

use geo::Coord;

use super::{DistanceMetric, HaversineDistance, TravelCost, TravelCostError};

/// Convert a distance into the time needed to cover it.
pub trait TimeEstimator: Send + Sync {
    /// Time needed to travel `distance_km` kilometres.
    fn estimate(&self, distance_km: f64) -> Duration;
}

/// Travel at a constant average speed.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use courier_core::{AverageSpeedEstimator, TimeEstimator};
///
/// let estimator = AverageSpeedEstimator::new(60.0)?;
/// assert_eq!(estimator.estimate(90.0), Duration::from_secs(90 * 60));
/// assert!(AverageSpeedEstimator::new(0.0).is_err());
/// # Ok::<(), courier_core::TravelCostError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageSpeedEstimator {
    speed_kmh: f64,
}

impl AverageSpeedEstimator {
    /// Speed assumed when none is configured, in kilometres per hour.
    pub const DEFAULT_SPEED_KMH: f64 = 20.0;

    /// Validate `speed_kmh` and construct the estimator.
    pub fn new(speed_kmh: f64) -> Result<Self, TravelCostError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(TravelCostError::NonPositiveSpeed { speed_kmh });
        }
        Ok(Self { speed_kmh })
    }

    /// The configured speed in kilometres per hour.
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

impl Default for AverageSpeedEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: Self::DEFAULT_SPEED_KMH,
        }
    }
}

impl TimeEstimator for AverageSpeedEstimator {
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time is distance divided by speed"
    )]
    fn estimate(&self, distance_km: f64) -> Duration {
        let hours = distance_km / self.speed_kmh;
        Duration::try_from_secs_f64(hours * 3_600.0).unwrap_or_else(|_| {
            log::warn!(
                "travel time for {distance_km} km at {} km/h is not representable; clamping",
                self.speed_kmh
            );
            if hours.is_sign_negative() {
                Duration::ZERO
            } else {
                Duration::MAX
            }
        })
    }
}

/// [`TravelCost`] built from a distance metric and a time estimator.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::{AverageSpeedEstimator, TravelCost, TravelTimeEstimator};
///
/// let cost = TravelTimeEstimator::haversine(AverageSpeedEstimator::new(30.0)?);
/// let here = Coord { x: -0.1278, y: 51.5074 };
/// assert_eq!(cost.estimate(here, here), Duration::ZERO);
/// # Ok::<(), courier_core::TravelCostError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TravelTimeEstimator<D, T> {
    metric: D,
    estimator: T,
}

impl<D, T> TravelTimeEstimator<D, T>
where
    D: DistanceMetric,
    T: TimeEstimator,
{
    /// Compose `metric` and `estimator`.
    pub const fn new(metric: D, estimator: T) -> Self {
        Self { metric, estimator }
    }

    /// The distance metric in use.
    pub const fn metric(&self) -> &D {
        &self.metric
    }

    /// The time estimator in use.
    pub const fn estimator(&self) -> &T {
        &self.estimator
    }

    /// Distance from `from` to `to` in kilometres.
    pub fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64 {
        self.metric.distance_km(from, to)
    }
}

impl<T: TimeEstimator> TravelTimeEstimator<HaversineDistance, T> {
    /// Great-circle distance converted by `estimator`.
    pub const fn haversine(estimator: T) -> Self {
        Self::new(HaversineDistance, estimator)
    }
}

impl TravelTimeEstimator<HaversineDistance, AverageSpeedEstimator> {
    /// Great-circle distance travelled at `speed_kmh`.
    pub fn at_average_speed(speed_kmh: f64) -> Result<Self, TravelCostError> {
        AverageSpeedEstimator::new(speed_kmh).map(Self::haversine)
    }
}

impl<D, T> TravelCost for TravelTimeEstimator<D, T>
where
    D: DistanceMetric,
    T: TimeEstimator,
{
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
        let distance_km = self.metric.distance_km(from, to);
        if distance_km.is_nan() {
            log::warn!("distance between {from:?} and {to:?} is undefined; treating as unreachable");
            return Duration::MAX;
        }
        self.estimator.estimate(distance_km)
    }
}
