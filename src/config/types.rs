use serde::Deserialize;

const DEFAULT_JOB_DIR: &str = "./fio_jobs";
const DEFAULT_LOG_DIR: &str = "/tmp";
const DEFAULT_TOOL: &str = "fio";

/// Environment the sweep runs in: hosts, tool locations and machine facts.
///
/// Field aliases accept the upper-case key spellings of older config files.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    #[serde(alias = "SERVER_IP")]
    pub server_ip: String,
    #[serde(default, alias = "JOB_NUMA")]
    pub job_numa: u32,
    #[serde(default, alias = "REMOTE_JOB_NUMA")]
    pub remote_job_numa: u32,
    /// Directory holding the local tool; empty means "search PATH".
    #[serde(default, alias = "FIO_PATH")]
    pub fio_path: String,
    /// Directory holding the remote tool; empty means "search PATH".
    #[serde(default, alias = "REMOTE_FIO_PATH")]
    pub remote_fio_path: String,
    #[serde(default, alias = "REMOTE_JOB_PATH")]
    pub remote_job_path: Option<String>,
    #[serde(alias = "REMOTE_JOB_MEM_PATH")]
    pub remote_job_mem_path: String,
    #[serde(alias = "CORES_PER_SOCKET")]
    pub cores_per_socket: u64,
    #[serde(default, alias = "SHORT_RUNTIME")]
    pub short_runtime: bool,
    #[serde(default, alias = "TRACER")]
    pub tracer: Option<String>,
    #[serde(default = "default_job_dir")]
    pub job_dir: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteConfig {
    /// SSH destination; falls back to `server_ip`.
    pub host: Option<String>,
    pub user: Option<String>,
    pub port: Option<u16>,
    #[serde(default)]
    pub ssh_options: Vec<String>,
}

impl RunnerConfig {
    #[must_use]
    pub fn remote_host(&self) -> &str {
        self.remote.host.as_deref().unwrap_or(&self.server_ip)
    }

    /// Tracer prefix for the client, defaulting to a NUMA binding.
    #[must_use]
    pub fn client_tracer(&self) -> String {
        match self.tracer.as_deref() {
            Some(tracer) if !tracer.trim().is_empty() => tracer.to_owned(),
            Some(_) | None => format!("numactl -N {}", self.job_numa),
        }
    }
}

/// One benchmark series under test. Read-only for the lifetime of a sweep.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkDescription {
    pub rw: String,
    pub filetype: String,
    #[serde(default = "default_tool")]
    pub tool: String,
    pub tool_mode: String,
    pub mode: String,
    #[serde(default)]
    pub cpu_load_range: Option<String>,
    #[serde(default = "default_busy_wait_polling")]
    pub busy_wait_polling: bool,
}

fn default_job_dir() -> String {
    DEFAULT_JOB_DIR.to_owned()
}

fn default_log_dir() -> String {
    DEFAULT_LOG_DIR.to_owned()
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_owned()
}

const fn default_busy_wait_polling() -> bool {
    true
}
