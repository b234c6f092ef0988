#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for `GreedyOptimizer`.

use courier_core::test_support::{FixedTravelCost, minutes};
use courier_core::{InfeasibleRouteError, Route, RouteOptimizer, VisitNode};
use courier_solver_greedy::GreedyOptimizer;
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

const START: Coord<f64> = Coord { x: 0.0, y: 0.0 };
const RESTAURANT: Coord<f64> = Coord { x: 5.0, y: 0.0 };
const CUSTOMER: Coord<f64> = Coord { x: 13.0, y: 0.0 };

type Outcome = RefCell<Option<Result<Route, InfeasibleRouteError>>>;

#[fixture]
fn nodes() -> RefCell<Vec<VisitNode>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn outcome() -> Outcome {
    RefCell::new(None)
}

#[given("a restaurant five minutes away whose food is ready after ten minutes")]
fn given_restaurant(#[from(nodes)] nodes: &RefCell<Vec<VisitNode>>) {
    nodes
        .borrow_mut()
        .push(VisitNode::pickup("O1", "R1", RESTAURANT, minutes(10)));
}

#[given("a customer eight minutes beyond the restaurant")]
fn given_customer(#[from(nodes)] nodes: &RefCell<Vec<VisitNode>>) {
    nodes
        .borrow_mut()
        .push(VisitNode::dropoff("O1", "C1", CUSTOMER));
}

#[given("no stops")]
fn given_nothing(#[from(nodes)] nodes: &RefCell<Vec<VisitNode>>) {
    nodes.borrow_mut().clear();
}

#[given("a customer whose restaurant is missing")]
fn given_orphan(#[from(nodes)] nodes: &RefCell<Vec<VisitNode>>) {
    *nodes.borrow_mut() = vec![VisitNode::dropoff("O9", "C9", CUSTOMER)];
}

#[when("I compute a greedy route")]
fn compute(#[from(nodes)] nodes: &RefCell<Vec<VisitNode>>, #[from(outcome)] outcome: &Outcome) {
    let cost = FixedTravelCost::new(minutes(60))
        .with_leg(START, RESTAURANT, minutes(5))
        .with_leg(RESTAURANT, CUSTOMER, minutes(8));
    let optimizer = GreedyOptimizer::new(cost);
    *outcome.borrow_mut() = Some(optimizer.compute_route(START, &nodes.borrow()));
}

fn with_route(outcome: &Outcome, check: impl FnOnce(&Route)) {
    let borrow = outcome.borrow();
    let route = borrow
        .as_ref()
        .and_then(|result| result.as_ref().ok())
        .expect("expected a route");
    check(route);
}

#[then("the route visits the restaurant and then the customer")]
fn then_order(#[from(outcome)] outcome: &Outcome) {
    with_route(outcome, |route| {
        assert_eq!(route.visit_ids().collect::<Vec<_>>(), vec!["R1", "C1"]);
    });
}

#[then("the customer is reached after 18 minutes")]
fn then_total(#[from(outcome)] outcome: &Outcome) {
    with_route(outcome, |route| {
        assert_eq!(route.service_times(), &[minutes(10), minutes(18)]);
    });
}

#[then("the route is empty")]
fn then_empty(#[from(outcome)] outcome: &Outcome) {
    with_route(outcome, |route| assert!(route.is_empty()));
}

#[then("the route is infeasible because a pickup is missing")]
fn then_missing_pickup(#[from(outcome)] outcome: &Outcome) {
    let borrow = outcome.borrow();
    assert!(matches!(
        borrow.as_ref(),
        Some(Err(InfeasibleRouteError::MissingPickup { group_id })) if group_id == "O9"
    ));
}

#[scenario(path = "tests/features/greedy_routing.feature", index = 0)]
fn single_order_waits_for_food(nodes: RefCell<Vec<VisitNode>>, outcome: Outcome) {
    let _ = (nodes, outcome);
}

#[scenario(path = "tests/features/greedy_routing.feature", index = 1)]
fn empty_input_is_empty_route(nodes: RefCell<Vec<VisitNode>>, outcome: Outcome) {
    let _ = (nodes, outcome);
}

#[scenario(path = "tests/features/greedy_routing.feature", index = 2)]
fn orphan_customer_is_rejected(nodes: RefCell<Vec<VisitNode>>, outcome: Outcome) {
    let _ = (nodes, outcome);
}
