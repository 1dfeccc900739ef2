use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::parsers::parse_bool_env;
use super::types::OutputFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Resumable fio benchmark sweeps against a remote RDMA server."
)]
pub struct SweepArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (overridden by SWEEPBENCH_LOG or RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one benchmark series, skipping points already in the result file
    Run(RunArgs),
    /// Print the points collected in a result file
    Show(ShowArgs),
    /// List the known sweep modes
    Modes,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Runner config (TOML or JSON); defaults to ./sweepbench.toml or ./sweepbench.json
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Series description (JSON)
    #[arg(long, short = 's')]
    pub series: PathBuf,

    /// Result file, created on first use and resumed afterwards
    #[arg(long, short = 'r')]
    pub result: PathBuf,

    /// Override the config's short_runtime flag
    #[arg(long = "short-runtime", env = "SWEEPBENCH_SHORT_RUNTIME", value_parser = parse_bool_env)]
    pub short_runtime: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Result file to read
    #[arg(long, short = 'r')]
    pub result: PathBuf,

    /// Mode the file was collected with; selects the axis to order by
    #[arg(long, short = 'm')]
    pub mode: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
