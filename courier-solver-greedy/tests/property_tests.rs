#![expect(
    clippy::expect_used,
    reason = "property tests use expect for readable failures"
)]

//! Property-based tests for the greedy optimizer.
//!
//! # Invariants tested
//!
//! - **Permutation:** every supplied stop appears exactly once.
//! - **Precedence:** each drop-off follows the pickup of its order.
//! - **Readiness:** no pickup is serviced before its ready time.
//! - **Determinism:** identical input yields an identical route.


use courier_core::RouteOptimizer;
use courier_core::test_support::{LineTravelCost, assert_feasible_route};
use courier_solver_greedy::GreedyOptimizer;
use geo::Coord;
use proptest::prelude::*;

use proptest_support::stops_strategy;

const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: greedy routes are feasible orderings of the input.
    #[test]
    fn greedy_routes_are_feasible(nodes in stops_strategy(6)) {
        let optimizer = GreedyOptimizer::new(LineTravelCost::default());
        let route = optimizer.compute_route(ORIGIN, &nodes).expect("well-formed input");
        let checked = assert_feasible_route(ORIGIN, &nodes, &route, optimizer.cost());
        prop_assert!(checked.is_ok(), "{:?}", checked);
    }

    /// Property: repeated calls return the same route.
    #[test]
    fn greedy_is_deterministic(nodes in stops_strategy(6)) {
        let optimizer = GreedyOptimizer::new(LineTravelCost::default());
        let first = optimizer.compute_route(ORIGIN, &nodes).expect("well-formed input");
        let second = optimizer.compute_route(ORIGIN, &nodes).expect("well-formed input");
        prop_assert_eq!(first, second);
    }
}
