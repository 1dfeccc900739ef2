//! Process execution seams: the remote host (over SSH) and the local host.
mod local;
mod lookup;
mod ssh;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::AppResult;

pub use local::ProcessLocalRunner;
pub use lookup::find_executable;
pub use ssh::{SshExecutor, shell_join};

/// Exit status and captured stdio of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }

    pub(crate) fn from_std(output: &std::process::Output) -> Self {
        Self {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// A process started on the remote host and not yet reaped.
#[async_trait]
pub trait RemoteProcess: Send {
    /// Blocks until the process exits and drains its stdout/stderr.
    async fn wait_with_output(self: Box<Self>) -> AppResult<ProcessOutput>;
}

#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Runs `argv` on the remote host to completion.
    async fn run_sync(&self, argv: &[String]) -> AppResult<ProcessOutput>;

    /// Starts `argv` with `env` on the remote host without waiting for it.
    async fn run_async(
        &self,
        argv: &[String],
        env: &BTreeMap<String, String>,
    ) -> AppResult<Box<dyn RemoteProcess>>;

    async fn copy_to_remote(&self, local: &Path, remote: &str) -> AppResult<()>;
}

#[async_trait]
pub trait LocalRunner: Send + Sync {
    /// Resolves `program` the way a shell would, or `None`.
    fn resolve(&self, program: &str) -> Option<PathBuf>;

    /// Runs `argv` with `env` added to the inherited environment.
    async fn run(&self, argv: &[String], env: &BTreeMap<String, String>)
    -> AppResult<ProcessOutput>;
}
