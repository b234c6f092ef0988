//! Travel-cost trait consumed by route optimizers.

use std::sync::Arc;
use std::time::Duration;

use geo::Coord;

/// Estimate the travel time from one location to another.
///
/// Implementations must return a non-negative duration and treat identical
/// locations as zero (within floating-point tolerance). Optimizers may call
/// [`estimate`](Self::estimate) many times for the same pair within one
/// search, so implementations should be cheap or memoise internally.
///
/// Implementations must be `Send + Sync` so searches can fan out across
/// threads.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::TravelCost;
///
/// struct Manhattan;
///
/// impl TravelCost for Manhattan {
///     fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
///         let blocks = (from.x - to.x).abs() + (from.y - to.y).abs();
///         Duration::from_secs_f64(blocks * 60.0)
///     }
/// }
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// assert_eq!(Manhattan.estimate(origin, origin), Duration::ZERO);
/// assert_eq!(Manhattan.estimate(origin, Coord { x: 1.0, y: 2.0 }), Duration::from_secs(180));
/// ```
pub trait TravelCost: Send + Sync {
    /// Travel time from `from` to `to`.
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration;
}

impl<T: TravelCost + ?Sized> TravelCost for &T {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
        (**self).estimate(from, to)
    }
}

impl<T: TravelCost + ?Sized> TravelCost for Box<T> {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
        (**self).estimate(from, to)
    }
}

impl<T: TravelCost + ?Sized> TravelCost for Arc<T> {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
        (**self).estimate(from, to)
    }
}
