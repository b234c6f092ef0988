//! Test helpers for writing plan requests to disk.

use camino::Utf8Path;
use courier_core::{Customer, Order, PlanRequest, Restaurant};
use geo::Coord;

/// Longitude of the street every test order sits on.
const STREET_X: f64 = 77.5946;
/// Latitude of the courier's starting point.
const STREET_Y: f64 = 12.9716;
/// Roughly one kilometre of latitude.
const BLOCK: f64 = 0.009;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn write_request(path: &Utf8Path, request: &PlanRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

fn street_point(blocks: f64) -> Coord<f64> {
    Coord {
        x: STREET_X,
        y: STREET_Y + blocks * BLOCK,
    }
}

fn street_order(id: &str, restaurant: (&str, f64), customer: (&str, f64)) -> Order {
    Order::new(
        id,
        Restaurant::new(restaurant.0, restaurant.0, street_point(restaurant.1), 1.0)
            .expect("valid restaurant"),
        Customer::new(customer.0, customer.0, street_point(customer.1)),
    )
}

/// Two orders along one street where collecting both meals first pays off.
pub(super) fn street_request() -> PlanRequest {
    PlanRequest {
        start: street_point(0.0),
        orders: vec![
            street_order("O1", ("R1", 5.0), ("C1", 3.0)),
            street_order("O2", ("R2", 9.0), ("C2", 0.0)),
        ],
    }
}
