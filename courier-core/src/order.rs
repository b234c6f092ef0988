//! Delivery orders and their translation into visit nodes.
//!
//! Each [`Order`] collects food from a [`Restaurant`] and hands it to a
//! [`Customer`]. Translation yields one pickup and one drop-off per order,
//! paired by the order id.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{VisitNode, duration_from_minutes};

/// Errors raised while building orders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    /// The preparation time was negative, non-finite or too large.
    #[error("restaurant {restaurant_id} has invalid preparation time {minutes} minutes")]
    InvalidPreparationTime {
        /// Restaurant whose preparation time was rejected.
        restaurant_id: String,
        /// The rejected value.
        minutes: f64,
    },
}

/// A restaurant where orders are collected.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::Restaurant;
///
/// let restaurant = Restaurant::new("R1", "Dosa Corner", Coord { x: 77.59, y: 12.97 }, 12.5)?;
/// assert_eq!(restaurant.preparation_time, Duration::from_secs(750));
/// assert!(Restaurant::new("R2", "Late Kitchen", Coord { x: 0.0, y: 0.0 }, -1.0).is_err());
/// # Ok::<(), courier_core::OrderError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restaurant {
    /// Unique restaurant identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Position with `x = longitude` and `y = latitude`.
    pub location: Coord<f64>,
    /// Average time needed to prepare an order.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "average_preparation_minutes", with = "crate::minutes")
    )]
    pub preparation_time: Duration,
}

impl Restaurant {
    /// Construct a restaurant, validating the preparation time in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidPreparationTime`] when
    /// `average_preparation_minutes` is negative or not finite.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coord<f64>,
        average_preparation_minutes: f64,
    ) -> Result<Self, OrderError> {
        let id = id.into();
        let Some(preparation_time) = duration_from_minutes(average_preparation_minutes) else {
            return Err(OrderError::InvalidPreparationTime {
                restaurant_id: id,
                minutes: average_preparation_minutes,
            });
        };
        Ok(Self {
            id,
            name: name.into(),
            location,
            preparation_time,
        })
    }
}

/// A customer receiving an order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    /// Unique customer identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Position with `x = longitude` and `y = latitude`.
    pub location: Coord<f64>,
}

impl Customer {
    /// Construct a customer.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

/// A single delivery from a restaurant to a customer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Unique order identifier, used to pair pickup and drop-off.
    pub order_id: String,
    /// Where the order is collected.
    pub restaurant: Restaurant,
    /// Who receives the order.
    pub customer: Customer,
}

impl Order {
    /// Construct an order.
    pub fn new(order_id: impl Into<String>, restaurant: Restaurant, customer: Customer) -> Self {
        Self {
            order_id: order_id.into(),
            restaurant,
            customer,
        }
    }

    /// The pickup stop for this order, ready once the food is prepared.
    #[must_use]
    pub fn pickup(&self) -> VisitNode {
        VisitNode::pickup(
            self.order_id.as_str(),
            self.restaurant.id.as_str(),
            self.restaurant.location,
            self.restaurant.preparation_time,
        )
    }

    /// The drop-off stop for this order.
    #[must_use]
    pub fn dropoff(&self) -> VisitNode {
        VisitNode::dropoff(
            self.order_id.as_str(),
            self.customer.id.as_str(),
            self.customer.location,
        )
    }
}

/// Translate orders into pickup and drop-off stops.
///
/// Each order contributes its pickup followed by its drop-off, in input order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{Customer, Order, Restaurant, VisitKind, visits_for_orders};
///
/// let restaurant = Restaurant::new("R1", "Dosa Corner", Coord { x: 0.0, y: 5.0 }, 1.0)?;
/// let customer = Customer::new("C1", "Asha", Coord { x: 0.0, y: 3.0 });
/// let visits = visits_for_orders(&[Order::new("O1", restaurant, customer)]);
///
/// assert_eq!(visits.len(), 2);
/// assert_eq!(visits[0].kind, VisitKind::Pickup);
/// assert_eq!(visits[1].group_id, "O1");
/// # Ok::<(), courier_core::OrderError>(())
/// ```
#[must_use]
pub fn visits_for_orders(orders: &[Order]) -> Vec<VisitNode> {
    orders
        .iter()
        .flat_map(|order| [order.pickup(), order.dropoff()])
        .collect()
}
