//! Tests for the `BeamSearchOptimizer`.

use std::num::NonZeroUsize;

use super::*;
use courier_core::VisitKind;
use courier_core::test_support::{
    FixedTravelCost, LineTravelCost, assert_feasible_route, dropoff, minutes, pickup,
};
use rstest::{fixture, rstest};

const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

fn width(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).expect("non-zero width")
}

fn optimizer_with(beam_width: usize, widening: bool) -> BeamSearchOptimizer<LineTravelCost> {
    BeamSearchOptimizer::with_config(
        LineTravelCost::default(),
        BeamSearchConfig::with_beam_width(width(beam_width)).with_widening(widening),
    )
}

#[fixture]
fn optimizer() -> BeamSearchOptimizer<LineTravelCost> {
    BeamSearchOptimizer::new(LineTravelCost::default())
}

/// Two orders on a north-south street where visiting both restaurants first
/// beats delivering the first order straight away.
#[fixture]
fn street() -> Vec<VisitNode> {
    vec![
        pickup("O1", "R1", 0.0, 5.0, 1),
        dropoff("O1", "C1", 0.0, 3.0),
        pickup("O2", "R2", 0.0, 9.0, 1),
        dropoff("O2", "C2", 0.0, 0.0),
    ]
}

fn ids(route: &Route) -> Vec<&str> {
    route.visit_ids().collect()
}

#[rstest]
fn readiness_dominates_single_order() {
    let restaurant = Coord { x: 5.0, y: 0.0 };
    let customer = Coord { x: 13.0, y: 0.0 };
    let cost = FixedTravelCost::new(minutes(60))
        .with_leg(ORIGIN, restaurant, minutes(5))
        .with_leg(restaurant, customer, minutes(8))
        .with_leg(ORIGIN, customer, minutes(13));
    let nodes = vec![
        VisitNode::pickup("O1", "R1", restaurant, minutes(10)),
        VisitNode::dropoff("O1", "C1", customer),
    ];

    let route = BeamSearchOptimizer::new(cost)
        .compute_route(ORIGIN, &nodes)
        .expect("route");

    assert_eq!(ids(&route), vec!["R1", "C1"]);
    assert_eq!(route.service_times(), &[minutes(10), minutes(18)]);
}

#[rstest]
fn beam_finds_shorter_route_than_greedy_on_street(
    optimizer: BeamSearchOptimizer<LineTravelCost>,
    street: Vec<VisitNode>,
) {
    let route = optimizer.compute_route(ORIGIN, &street).expect("route");

    assert_eq!(ids(&route), vec!["R1", "R2", "C1", "C2"]);
    assert_eq!(
        route.service_times(),
        &[minutes(5), minutes(9), minutes(15), minutes(18)]
    );
    assert_feasible_route(ORIGIN, &street, &route, optimizer.cost()).expect("feasible");
}

#[rstest]
fn single_state_beam_behaves_greedily(street: Vec<VisitNode>) {
    let route = optimizer_with(1, false)
        .compute_route(ORIGIN, &street)
        .expect("route");
    assert_eq!(ids(&route), vec!["R1", "C1", "R2", "C2"]);
    assert_eq!(route.total_duration(), minutes(22));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(8)]
fn widening_never_worsens_with_width(street: Vec<VisitNode>, #[case] beam_width: usize) {
    let narrower = optimizer_with(beam_width, true)
        .compute_route(ORIGIN, &street)
        .expect("route");
    let wider = optimizer_with(beam_width + 1, true)
        .compute_route(ORIGIN, &street)
        .expect("route");
    assert!(wider.total_duration() <= narrower.total_duration());
}

#[rstest]
fn two_orders_finish_at_the_farthest_customer(optimizer: BeamSearchOptimizer<LineTravelCost>) {
    let nodes = vec![
        pickup("O2", "R2", 4.0, 0.0, 0),
        dropoff("O2", "C2", 5.0, 0.0),
        pickup("O1", "R1", 2.0, 0.0, 0),
        dropoff("O1", "C1", 6.0, 0.0),
    ];

    let route = optimizer.compute_route(ORIGIN, &nodes).expect("route");

    assert_eq!(route.total_duration(), minutes(6));
    assert_feasible_route(ORIGIN, &nodes, &route, optimizer.cost()).expect("feasible");
}

#[rstest]
fn empty_input_yields_empty_route(optimizer: BeamSearchOptimizer<LineTravelCost>) {
    let route = optimizer.compute_route(ORIGIN, &[]).expect("route");
    assert!(route.is_empty());
    assert_eq!(route.total_duration(), Duration::ZERO);
}

#[rstest]
fn coincident_stops_cost_only_the_wait(optimizer: BeamSearchOptimizer<LineTravelCost>) {
    let nodes = vec![pickup("O1", "R1", 0.0, 0.0, 4), dropoff("O1", "C1", 0.0, 0.0)];
    let route = optimizer.compute_route(ORIGIN, &nodes).expect("route");
    assert_eq!(route.total_duration(), minutes(4));
}

#[rstest]
#[case::missing_pickup(
    vec![dropoff("O1", "C1", 1.0, 0.0)],
    InfeasibleRouteError::MissingPickup { group_id: "O1".to_owned() }
)]
#[case::missing_dropoff(
    vec![pickup("O1", "R1", 1.0, 0.0, 0)],
    InfeasibleRouteError::MissingDropoff { group_id: "O1".to_owned() }
)]
#[case::duplicate_pickup(
    vec![
        pickup("O1", "R1", 1.0, 0.0, 0),
        pickup("O1", "R2", 2.0, 0.0, 0),
        dropoff("O1", "C1", 3.0, 0.0),
    ],
    InfeasibleRouteError::DuplicateVisit { group_id: "O1".to_owned(), kind: VisitKind::Pickup }
)]
fn malformed_input_fails_fast(
    optimizer: BeamSearchOptimizer<LineTravelCost>,
    #[case] nodes: Vec<VisitNode>,
    #[case] expected: InfeasibleRouteError,
) {
    let err = optimizer
        .compute_route(ORIGIN, &nodes)
        .expect_err("malformed input");
    assert_eq!(err, expected);
}

#[rstest]
fn repeated_calls_are_identical(optimizer: BeamSearchOptimizer<LineTravelCost>) {
    let nodes = vec![
        pickup("O1", "R1", 3.0, 1.0, 2),
        dropoff("O1", "C1", -2.0, 4.0),
        pickup("O2", "R2", -1.0, -1.0, 0),
        dropoff("O2", "C2", 5.0, 5.0),
        pickup("O3", "R3", 2.0, -3.0, 7),
        dropoff("O3", "C3", 0.5, 0.5),
    ];
    let first = optimizer.compute_route(ORIGIN, &nodes).expect("route");
    let second = optimizer.compute_route(ORIGIN, &nodes).expect("route");
    assert_eq!(first, second);
    assert_feasible_route(ORIGIN, &nodes, &first, optimizer.cost()).expect("feasible");
}

#[rstest]
fn heuristic_is_zero_once_everything_is_visited(optimizer: BeamSearchOptimizer<LineTravelCost>) {
    let nodes = vec![pickup("O1", "R1", 3.0, 4.0, 0), dropoff("O1", "C1", 0.0, 0.0)];
    assert_eq!(optimizer.heuristic(1, &nodes, &[true, false]), Duration::ZERO);
    assert_eq!(optimizer.heuristic(0, &nodes, &[false, false]), minutes(5));
}
