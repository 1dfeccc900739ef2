use std::path::PathBuf;

use tracing::info;

use crate::args::{Command, OutputFormat, RunArgs, ShowArgs, SweepArgs};
use crate::config::{BenchmarkDescription, RunnerConfig, load_config, load_series};
use crate::error::{AppError, AppResult, ValidationError};
use crate::remote::{ProcessLocalRunner, SshExecutor};
use crate::report::{render_modes, render_points};
use crate::sweep::{Axis, ModeCatalog, ResultStore, SweepOrchestrator};

pub(super) enum RunPlan {
    Sweep {
        config: RunnerConfig,
        series: BenchmarkDescription,
        result: PathBuf,
    },
    Show {
        result: PathBuf,
        axis: Axis,
        format: OutputFormat,
    },
    Modes,
}

/// Loads every file a command needs before any runtime work starts.
pub(super) fn build_plan(args: SweepArgs) -> AppResult<RunPlan> {
    match args.command {
        Command::Run(run) => build_sweep_plan(run),
        Command::Show(show) => build_show_plan(show),
        Command::Modes => Ok(RunPlan::Modes),
    }
}

fn build_sweep_plan(run: RunArgs) -> AppResult<RunPlan> {
    let mut config = load_config(run.config.as_deref())?;
    if let Some(short_runtime) = run.short_runtime {
        config.short_runtime = short_runtime;
    }
    let series = load_series(&run.series)?;
    Ok(RunPlan::Sweep {
        config,
        series,
        result: run.result,
    })
}

fn build_show_plan(show: ShowArgs) -> AppResult<RunPlan> {
    let entry = ModeCatalog::entry(&show.mode).ok_or_else(|| {
        AppError::validation(ValidationError::UnknownShowMode {
            value: show.mode.clone(),
        })
    })?;
    Ok(RunPlan::Show {
        result: show.result,
        axis: entry.axis,
        format: show.format,
    })
}

pub(super) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Sweep {
            config,
            series,
            result,
        } => {
            let remote = SshExecutor::from_config(&config);
            let mut orchestrator =
                SweepOrchestrator::new(&config, &series, &result, remote, ProcessLocalRunner)
                    .await?;
            let report = orchestrator.run().await?;
            info!(
                measured = report.measured,
                skipped = report.skipped,
                "Series {} complete",
                series.mode
            );
            Ok(())
        }
        RunPlan::Show {
            result,
            axis,
            format,
        } => {
            let store = ResultStore::load(&result)?;
            let sorted = store.sorted_by(axis);
            print!("{}", render_points(&sorted, axis, format)?);
            Ok(())
        }
        RunPlan::Modes => {
            print!("{}", render_modes());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn show_plan_resolves_axis_from_mode() -> Result<(), String> {
        let args = SweepArgs::try_parse_from([
            "sweepbench",
            "show",
            "--result",
            "out.json",
            "--mode",
            "bw-dp-exp",
        ])
        .map_err(|err| err.to_string())?;
        match build_plan(args).map_err(|err| err.to_string())? {
            RunPlan::Show { axis: Axis::IoDepth, .. } => Ok(()),
            RunPlan::Show { axis, .. } => Err(format!("Unexpected axis: {}", axis)),
            RunPlan::Sweep { .. } | RunPlan::Modes => Err("Expected a show plan".to_owned()),
        }
    }

    #[test]
    fn show_plan_rejects_unknown_mode() -> Result<(), String> {
        let args = SweepArgs::try_parse_from([
            "sweepbench",
            "show",
            "--result",
            "out.json",
            "--mode",
            "nope",
        ])
        .map_err(|err| err.to_string())?;
        match build_plan(args) {
            Err(AppError::Validation(ValidationError::UnknownShowMode { value })) if value == "nope" => {
                Ok(())
            }
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(_) => Err("Expected an unknown mode error".to_owned()),
        }
    }

    #[test]
    fn sweep_plan_applies_short_runtime_override() -> Result<(), String> {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let config_path = dir.path().join("runner.toml");
        let series_path = dir.path().join("series.json");
        std::fs::write(
            &config_path,
            "server_ip = \"10.0.0.2\"\nremote_job_mem_path = \"malloc\"\ncores_per_socket = 4\nshort_runtime = true\n",
        )
        .map_err(|err| format!("write failed: {}", err))?;
        std::fs::write(
            &series_path,
            r#"{"rw": "randread", "filetype": "malloc", "tool_mode": "apm", "mode": "lat"}"#,
        )
        .map_err(|err| format!("write failed: {}", err))?;

        let config_arg = config_path.to_string_lossy().into_owned();
        let series_arg = series_path.to_string_lossy().into_owned();
        let args = SweepArgs::try_parse_from([
            "sweepbench",
            "run",
            "--config",
            config_arg.as_str(),
            "--series",
            series_arg.as_str(),
            "--result",
            "out.json",
            "--short-runtime",
            "false",
        ])
        .map_err(|err| err.to_string())?;
        match build_plan(args).map_err(|err| err.to_string())? {
            RunPlan::Sweep { config, series, .. } => {
                if config.short_runtime || series.mode != "lat" || series.tool != "fio" {
                    return Err(format!("Unexpected plan: {:?} {:?}", config, series));
                }
                Ok(())
            }
            RunPlan::Show { .. } | RunPlan::Modes => Err("Expected a sweep plan".to_owned()),
        }
    }
}
