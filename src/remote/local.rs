use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AppError, AppResult, ClientError};

use super::{LocalRunner, ProcessOutput, find_executable};

/// Runs client processes on this host through `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLocalRunner;

#[async_trait]
impl LocalRunner for ProcessLocalRunner {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        find_executable(program)
    }

    async fn run(
        &self,
        argv: &[String],
        env: &BTreeMap<String, String>,
    ) -> AppResult<ProcessOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| AppError::client(ClientError::EmptyCommand))?;
        debug!(program = %program, args = ?args, "Running local command");
        let output = Command::new(program)
            .args(args)
            .envs(env)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|err| {
                AppError::client(ClientError::Spawn {
                    program: program.clone(),
                    source: err,
                })
            })?;
        Ok(ProcessOutput::from_std(&output))
    }
}
