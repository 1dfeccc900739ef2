use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{BenchmarkDescription, RunnerConfig};

use super::server::{flag, tool_path};
use super::template::Settings;

/// Ramp and run durations handed to the client, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationProfile {
    pub ramp: u64,
    pub run: u64,
}

impl DurationProfile {
    /// Quick iterations while developing a setup.
    pub const SHORT: Self = Self { ramp: 0, run: 10 };
    /// Production measurement.
    pub const FULL: Self = Self { ramp: 15, run: 60 };

    #[must_use]
    pub const fn select(short_runtime: bool) -> Self {
        if short_runtime { Self::SHORT } else { Self::FULL }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCommand {
    pub argv: Vec<String>,
    pub env: BTreeMap<String, String>,
}

/// Path of the local client tool named by the series.
#[must_use]
pub fn client_tool(config: &RunnerConfig, series: &BenchmarkDescription) -> String {
    tool_path(&config.fio_path, &series.tool)
}

#[must_use]
pub fn client_command(
    config: &RunnerConfig,
    series: &BenchmarkDescription,
    settings: &Settings,
    profile: DurationProfile,
) -> ClientCommand {
    let job_file = Path::new(&config.job_dir).join(format!("librpma_{}-client.fio", series.tool_mode));
    let argv = vec![
        client_tool(config, series),
        job_file.to_string_lossy().into_owned(),
        "--output-format=json+".to_owned(),
    ];

    let mut env = BTreeMap::new();
    env.insert("serverip".to_owned(), config.server_ip.clone());
    env.insert("numjobs".to_owned(), settings.threads.to_string());
    env.insert("iodepth".to_owned(), settings.iodepth.to_string());
    env.insert("blocksize".to_owned(), settings.bs.to_string());
    env.insert("sync".to_owned(), flag(settings.sync).to_owned());
    env.insert("readwrite".to_owned(), series.rw.clone());
    env.insert("ramp_time".to_owned(), profile.ramp.to_string());
    env.insert("runtime".to_owned(), profile.run.to_string());
    env.insert("TRACER".to_owned(), config.client_tracer());

    ClientCommand { argv, env }
}
