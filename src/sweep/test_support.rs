use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{BenchmarkDescription, RemoteConfig, RunnerConfig};
use crate::error::AppResult;
use crate::remote::{LocalRunner, ProcessOutput, RemoteExecutor, RemoteProcess};

pub(crate) fn runner_config() -> RunnerConfig {
    RunnerConfig {
        server_ip: "192.168.1.2".to_owned(),
        job_numa: 0,
        remote_job_numa: 1,
        fio_path: "/usr/local/bin".to_owned(),
        remote_fio_path: "/opt/fio/bin".to_owned(),
        remote_job_path: None,
        remote_job_mem_path: "/dev/dax0.0".to_owned(),
        cores_per_socket: 8,
        short_runtime: true,
        tracer: None,
        job_dir: "./fio_jobs".to_owned(),
        log_dir: std::env::temp_dir().to_string_lossy().into_owned(),
        remote: RemoteConfig::default(),
    }
}

pub(crate) fn series(mode: &str, rw: &str, filetype: &str) -> BenchmarkDescription {
    BenchmarkDescription {
        rw: rw.to_owned(),
        filetype: filetype.to_owned(),
        tool: "fio".to_owned(),
        tool_mode: "apm".to_owned(),
        mode: mode.to_owned(),
        cpu_load_range: None,
        busy_wait_polling: true,
    }
}

/// Ordered record of every process-level call made by the fakes.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub(crate) fn push(&self, event: String) {
        if let Ok(mut events) = self.0.lock() {
            events.push(event);
        }
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.0.lock().map(|events| events.clone()).unwrap_or_default()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event.starts_with(prefix))
            .count()
    }
}

pub(crate) struct FakeRemote {
    pub(crate) log: CallLog,
    pub(crate) fio_present: bool,
    pub(crate) server_status: Option<i32>,
}

impl FakeRemote {
    pub(crate) fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fio_present: true,
            server_status: Some(0),
        }
    }
}

#[async_trait]
impl RemoteExecutor for FakeRemote {
    async fn run_sync(&self, argv: &[String]) -> AppResult<ProcessOutput> {
        self.log.push(format!("probe {}", argv.join(" ")));
        Ok(ProcessOutput {
            status: Some(if self.fio_present { 0 } else { 1 }),
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    async fn run_async(
        &self,
        argv: &[String],
        env: &BTreeMap<String, String>,
    ) -> AppResult<Box<dyn RemoteProcess>> {
        let cpuload = env.get("cpuload").map_or("-", String::as_str);
        self.log.push(format!(
            "server numjobs={} iodepth={} cpuload={} argc={}",
            env.get("numjobs").map_or("", String::as_str),
            env.get("iodepth").map_or("", String::as_str),
            cpuload,
            argv.len()
        ));
        Ok(Box::new(FakeServer {
            log: self.log.clone(),
            status: self.server_status,
        }))
    }

    async fn copy_to_remote(&self, local: &Path, remote: &str) -> AppResult<()> {
        self.log
            .push(format!("copy {} {}", local.display(), remote));
        Ok(())
    }
}

struct FakeServer {
    log: CallLog,
    status: Option<i32>,
}

#[async_trait]
impl RemoteProcess for FakeServer {
    async fn wait_with_output(self: Box<Self>) -> AppResult<ProcessOutput> {
        self.log.push("server-exit".to_owned());
        Ok(ProcessOutput {
            status: self.status,
            stdout: "server ready".to_owned(),
            stderr: String::new(),
        })
    }
}

pub(crate) struct FakeLocal {
    pub(crate) log: CallLog,
    pub(crate) tool_present: bool,
    /// Block size for which the client prints garbage instead of JSON.
    pub(crate) garbage_at_bs: Option<u64>,
}

impl FakeLocal {
    pub(crate) fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            tool_present: true,
            garbage_at_bs: None,
        }
    }
}

#[async_trait]
impl LocalRunner for FakeLocal {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        self.tool_present.then(|| PathBuf::from(program))
    }

    async fn run(
        &self,
        _argv: &[String],
        env: &BTreeMap<String, String>,
    ) -> AppResult<ProcessOutput> {
        let bs = env.get("blocksize").map_or("0", String::as_str);
        self.log.push(format!("client bs={}", bs));
        let stdout = if self.garbage_at_bs.map(|value| value.to_string()).as_deref() == Some(bs) {
            "fio: connection refused".to_owned()
        } else {
            fio_json(bs)
        };
        Ok(ProcessOutput {
            status: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}

/// Minimal fio JSON report with both directions; bandwidth echoes `bs`.
pub(crate) fn fio_json(bs: &str) -> String {
    let direction = format!(
        r#"{{"bw": {}, "iops": 100.0, "lat_ns": {{"min": 10, "max": 90, "mean": 42.0}}}}"#,
        bs
    );
    format!(
        r#"{{"jobs": [{{"read": {}, "write": {}}}]}}"#,
        direction, direction
    )
}
