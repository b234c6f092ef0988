//! Beam-search route construction for the courier engine.
//!
//! This crate provides [`BeamSearchOptimizer`], an implementation of
//! [`RouteOptimizer`](courier_core::RouteOptimizer) that grows several
//! partial routes ([`RouteState`]s) side by side and keeps only the most
//! promising ones after every step. It usually finds shorter routes than the
//! greedy construction while keeping the work bounded by the beam width.
//!
//! Enable the `parallel` feature to expand frontier states across a rayon
//! thread pool. Pruning still happens in one deterministic pass, so results
//! are identical with and without the feature.

#![forbid(unsafe_code)]

mod config;
mod search;
mod state;

pub use config::BeamSearchConfig;
pub use search::BeamSearchOptimizer;
pub use state::RouteState;
