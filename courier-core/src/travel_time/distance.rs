//! Distance metrics between geographic coordinates.

use geo::{Distance, Haversine, Point};

/// Map two coordinates to a non-negative distance in kilometres.
///
/// Metrics must be symmetric and return zero for identical coordinates.
pub trait DistanceMetric: Send + Sync {
    /// Distance from `from` to `to` in kilometres.
    fn distance_km(&self, from: geo::Coord<f64>, to: geo::Coord<f64>) -> f64;
}

/// Great-circle distance on a spherical Earth.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{DistanceMetric, HaversineDistance};
///
/// let equator = Coord { x: 0.0, y: 0.0 };
/// let pole = Coord { x: 0.0, y: 90.0 };
/// let km = HaversineDistance.distance_km(equator, pole);
/// assert!((km - 10_007.5).abs() < 5.0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HaversineDistance;

impl DistanceMetric for HaversineDistance {
    #[expect(
        clippy::float_arithmetic,
        reason = "geo reports metres; callers expect kilometres"
    )]
    fn distance_km(&self, from: geo::Coord<f64>, to: geo::Coord<f64>) -> f64 {
        Haversine.distance(Point::from(from), Point::from(to)) / 1_000.0
    }
}
