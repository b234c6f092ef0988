//! Greedy route construction for the courier engine.
//!
//! This crate provides [`GreedyOptimizer`], a single-pass implementation of
//! [`RouteOptimizer`](courier_core::RouteOptimizer). At every step it visits
//! the feasible stop that can be serviced soonest, so it never backtracks and
//! runs in time quadratic in the number of stops. It is fast and
//! deterministic but offers no optimality guarantee; the beam-search crate
//! usually finds shorter routes.

#![forbid(unsafe_code)]

mod greedy;

pub use greedy::GreedyOptimizer;
