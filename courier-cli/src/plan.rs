//! Plan command implementation for the courier CLI.

use std::io::{BufReader, Write};
use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use courier_core::{
    AverageSpeedEstimator, DeliveryPlan, DeliveryPlanner, HaversineDistance, InfeasibleRouteError,
    PlanRequest, Route, RouteOptimizer, TravelTimeEstimator, VisitNode,
};
use courier_solver_beam::{BeamSearchConfig, BeamSearchOptimizer};
use courier_solver_greedy::GreedyOptimizer;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_AVERAGE_SPEED, ARG_PLAN_BEAM_WIDTH, ARG_PLAN_FALLBACK_GREEDY, ARG_PLAN_REQUEST,
    ARG_PLAN_STRATEGY, CliError, ENV_PLAN_REQUEST,
};

/// Travel cost shared by every strategy the CLI builds.
pub(crate) type HaversineCost = TravelTimeEstimator<HaversineDistance, AverageSpeedEstimator>;

/// Routing strategy selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Strategy {
    /// Always visit the stop that can be serviced soonest.
    Greedy,
    /// Keep several partial routes and extend the most promising.
    #[default]
    Beam,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan a pickup and drop-off route for a batch of orders. The \
                 request is a JSON-encoded PlanRequest holding the courier's \
                 start position and the orders; the resulting DeliveryPlan is \
                 printed as JSON.",
    about = "Plan a delivery route"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Routing strategy (defaults to beam).
    #[arg(long = ARG_PLAN_STRATEGY, value_enum, value_name = "strategy")]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Partial routes kept per beam search step (defaults to 3).
    #[arg(long = ARG_PLAN_BEAM_WIDTH, value_name = "n")]
    #[serde(default)]
    pub(crate) beam_width: Option<usize>,
    /// Average courier speed in kilometres per hour (defaults to 20).
    #[arg(long = ARG_PLAN_AVERAGE_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) average_speed_kmh: Option<f64>,
    /// Retry with the greedy strategy when beam search cannot finish a route.
    #[arg(
        long = ARG_PLAN_FALLBACK_GREEDY,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) fallback_greedy: Option<bool>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Strategy used to order the stops.
    pub(crate) strategy: Strategy,
    /// Beam search tuning, ignored by the greedy strategy.
    pub(crate) beam: BeamSearchConfig,
    /// Speed used to convert distances into travel times.
    pub(crate) speed: AverageSpeedEstimator,
    /// Whether a stalled beam search is retried greedily.
    pub(crate) fallback_greedy: bool,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Travel cost derived from the configured speed.
    pub(crate) const fn travel_cost(&self) -> HaversineCost {
        TravelTimeEstimator::haversine(self.speed)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let beam_width = match args.beam_width {
            Some(width) => {
                NonZeroUsize::new(width).ok_or(CliError::InvalidBeamWidth { width })?
            }
            None => BeamSearchConfig::DEFAULT_BEAM_WIDTH,
        };
        let speed = match args.average_speed_kmh {
            Some(speed_kmh) => AverageSpeedEstimator::new(speed_kmh)?,
            None => AverageSpeedEstimator::default(),
        };

        Ok(Self {
            request_path,
            strategy: args.strategy.unwrap_or_default(),
            beam: BeamSearchConfig::with_beam_width(beam_width),
            speed,
            fallback_greedy: args.fallback_greedy.unwrap_or(false),
        })
    }
}

/// Runs `primary` and retries with `fallback` when it stalls.
///
/// Malformed input is reported straight away since every strategy rejects it
/// in the same way.
pub(crate) struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    pub(crate) const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: RouteOptimizer, F: RouteOptimizer> RouteOptimizer for WithFallback<P, F> {
    fn compute_route(
        &self,
        start: Coord<f64>,
        nodes: &[VisitNode],
    ) -> Result<Route, InfeasibleRouteError> {
        match self.primary.compute_route(start, nodes) {
            Err(err @ InfeasibleRouteError::Stalled { .. }) => {
                log::warn!("{err}; retrying with the greedy strategy");
                self.fallback.compute_route(start, nodes)
            }
            outcome => outcome,
        }
    }
}

/// Builds an optimizer for the current plan invocation.
pub(super) trait PlanOptimizerBuilder {
    fn build(&self, config: &PlanConfig) -> Box<dyn RouteOptimizer>;
}

pub(super) struct DefaultPlanOptimizerBuilder;

impl PlanOptimizerBuilder for DefaultPlanOptimizerBuilder {
    fn build(&self, config: &PlanConfig) -> Box<dyn RouteOptimizer> {
        let cost = config.travel_cost();
        match config.strategy {
            Strategy::Greedy => Box::new(GreedyOptimizer::new(cost)),
            Strategy::Beam if config.fallback_greedy => Box::new(WithFallback::new(
                BeamSearchOptimizer::with_config(cost, config.beam),
                GreedyOptimizer::new(cost),
            )),
            Strategy::Beam => Box::new(BeamSearchOptimizer::with_config(cost, config.beam)),
        }
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanOptimizerBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanOptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = execute_plan(args, builder)?;
    write_plan(writer, &plan)
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn PlanOptimizerBuilder,
) -> Result<DeliveryPlan, CliError> {
    let config = resolve_plan_config(args)?;
    let request = load_plan_request(&config.request_path)?;
    log::debug!(
        "planning {} orders with the {:?} strategy",
        request.orders.len(),
        config.strategy
    );
    let planner = DeliveryPlanner::new(builder.build(&config));
    planner
        .plan_route(request.start, &request.orders)
        .map_err(|source| CliError::Plan {
            path: config.request_path.clone(),
            source,
        })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan(writer: &mut dyn Write, plan: &DeliveryPlan) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plan).map_err(CliError::SerializePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
