//! Pickup and drop-off stops handed to route optimizers.

use std::fmt;
use std::time::Duration;

use geo::Coord;

/// The role a stop plays within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum VisitKind {
    /// Collection at the origin, e.g. a restaurant.
    Pickup,
    /// Hand-off at the destination, e.g. a customer.
    Dropoff,
}

impl fmt::Display for VisitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pickup => f.write_str("pickup"),
            Self::Dropoff => f.write_str("drop-off"),
        }
    }
}

/// A single stop on a delivery route.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Every
/// `group_id` pairs exactly one [`VisitKind::Pickup`] with one
/// [`VisitKind::Dropoff`]; the drop-off refers to its pickup through that
/// shared key rather than holding a reference to it.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::{VisitKind, VisitNode};
///
/// let pickup = VisitNode::pickup("O1", "R1", Coord { x: 0.0, y: 0.0 }, Duration::from_secs(600));
/// let dropoff = VisitNode::dropoff("O1", "C1", Coord { x: 1.0, y: 0.0 });
///
/// assert_eq!(pickup.kind, VisitKind::Pickup);
/// assert_eq!(dropoff.ready_time, Duration::ZERO);
/// assert!(pickup.pairs_with(&dropoff));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VisitNode {
    /// Where the stop takes place.
    pub location: Coord<f64>,
    /// Whether the stop collects or delivers.
    pub kind: VisitKind,
    /// Identity of the place being visited, e.g. a restaurant or customer id.
    pub visit_id: String,
    /// Identity of the pickup/drop-off pair, one per order.
    pub group_id: String,
    /// Earliest service time measured from the start of the route.
    ///
    /// Always zero for drop-offs.
    pub ready_time: Duration,
}

impl VisitNode {
    /// Construct a pickup stop that cannot be serviced before `ready_time`.
    pub fn pickup(
        group_id: impl Into<String>,
        visit_id: impl Into<String>,
        location: Coord<f64>,
        ready_time: Duration,
    ) -> Self {
        Self {
            location,
            kind: VisitKind::Pickup,
            visit_id: visit_id.into(),
            group_id: group_id.into(),
            ready_time,
        }
    }

    /// Construct a drop-off stop.
    pub fn dropoff(
        group_id: impl Into<String>,
        visit_id: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            location,
            kind: VisitKind::Dropoff,
            visit_id: visit_id.into(),
            group_id: group_id.into(),
            ready_time: Duration::ZERO,
        }
    }

    /// Return `true` for pickup stops.
    #[must_use]
    pub const fn is_pickup(&self) -> bool {
        matches!(self.kind, VisitKind::Pickup)
    }

    /// Return `true` when `other` is the opposite half of this stop's group.
    #[must_use]
    pub fn pairs_with(&self, other: &Self) -> bool {
        self.group_id == other.group_id && self.kind != other.kind
    }

    /// Time at which the stop is serviced when the agent arrives at `arrival`.
    ///
    /// Pickups wait until [`ready_time`](Self::ready_time); drop-offs are
    /// serviced on arrival.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use geo::Coord;
    /// use courier_core::VisitNode;
    ///
    /// let pickup = VisitNode::pickup("O1", "R1", Coord { x: 0.0, y: 0.0 }, Duration::from_secs(600));
    /// assert_eq!(pickup.service_time(Duration::from_secs(300)), Duration::from_secs(600));
    /// assert_eq!(pickup.service_time(Duration::from_secs(900)), Duration::from_secs(900));
    /// ```
    #[must_use]
    pub fn service_time(&self, arrival: Duration) -> Duration {
        match self.kind {
            VisitKind::Pickup => arrival.max(self.ready_time),
            VisitKind::Dropoff => arrival,
        }
    }
}

/// Convert fractional minutes into a [`Duration`].
///
/// Returns `None` for negative, non-finite or overflowing values.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use courier_core::duration_from_minutes;
///
/// assert_eq!(duration_from_minutes(1.5), Some(Duration::from_secs(90)));
/// assert_eq!(duration_from_minutes(-1.0), None);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "minutes are supplied as fractional values by callers"
)]
pub fn duration_from_minutes(minutes: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(minutes * 60.0).ok()
}

/// Express a [`Duration`] as fractional minutes.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "reporting uses fractional minutes"
)]
pub fn duration_as_minutes(duration: Duration) -> f64 {
    duration.as_secs_f64() / 60.0
}
