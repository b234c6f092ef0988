//! Command-line interface for planning courier deliveries.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_STRATEGY: &str = "strategy";
const ARG_PLAN_BEAM_WIDTH: &str = "beam-width";
const ARG_PLAN_AVERAGE_SPEED: &str = "average-speed-kmh";
const ARG_PLAN_FALLBACK_GREEDY: &str = "fallback-greedy";
const ENV_PLAN_REQUEST: &str = "COURIER_CMDS_PLAN_REQUEST_PATH";

/// Run the courier CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Plan pickup and drop-off routes for a single courier",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a route serving every order in a JSON request.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
