use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{BenchmarkDescription, RunnerConfig};

use super::medium::Medium;
use super::template::Settings;

/// Everything needed to stage and start the remote server for one point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub argv: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub local_job: PathBuf,
    pub remote_job: String,
}

pub(crate) fn tool_path(dir: &str, tool: &str) -> String {
    if dir.is_empty() {
        return tool.to_owned();
    }
    Path::new(dir).join(tool).to_string_lossy().into_owned()
}

pub(crate) const fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn remote_job_path(config: &RunnerConfig, tool_mode: &str) -> String {
    match config.remote_job_path.as_deref() {
        Some(path) if !path.is_empty() => path.to_owned(),
        Some(_) | None => format!("/dev/shm/librpma_{}-server.fio", tool_mode),
    }
}

#[must_use]
pub fn server_command(
    config: &RunnerConfig,
    series: &BenchmarkDescription,
    medium: &Medium,
    settings: &Settings,
) -> ServerCommand {
    let mut argv = vec![
        "numactl".to_owned(),
        "-N".to_owned(),
        config.remote_job_numa.to_string(),
        tool_path(&config.remote_fio_path, "fio"),
    ];

    let mut env = BTreeMap::new();
    env.insert("serverip".to_owned(), config.server_ip.clone());
    env.insert("numjobs".to_owned(), settings.threads.to_string());
    env.insert("iodepth".to_owned(), settings.iodepth.to_string());
    env.insert("direct_write_to_pmem".to_owned(), flag(false).to_owned());
    env.insert(
        "busy_wait_polling".to_owned(),
        flag(series.busy_wait_polling).to_owned(),
    );
    env.insert(
        "cores_per_socket".to_owned(),
        config.cores_per_socket.to_string(),
    );

    // With a CPU load the job file's load section has to run as well.
    match settings.cpuload {
        Some(load) => {
            env.insert("cpuload".to_owned(), load.to_string());
        }
        None => argv.push("--section=server".to_owned()),
    }

    argv.extend(medium.server_args());

    let local_job = Path::new(&config.job_dir).join(format!("librpma_{}-server.fio", series.tool_mode));
    let remote_job = remote_job_path(config, &series.tool_mode);
    argv.push(remote_job.clone());

    ServerCommand {
        argv,
        env,
        local_job,
        remote_job,
    }
}
