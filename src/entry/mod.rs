mod plan;

use clap::Parser;

use crate::args::SweepArgs;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Parses the command line, installs logging and runs the chosen command.
///
/// # Errors
///
/// Returns any configuration, environment, store, remote or client error
/// raised while running the command.
pub fn run() -> AppResult<()> {
    let args = SweepArgs::parse();

    crate::logger::init_logging(args.verbose);

    let plan = build_plan(args)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(execute_plan(plan))
}
