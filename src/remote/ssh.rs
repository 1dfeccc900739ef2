use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::config::RunnerConfig;
use crate::error::{AppError, AppResult, RemoteError};

use super::{ProcessOutput, RemoteExecutor, RemoteProcess};

/// Executes commands on the server host with the system `ssh`/`scp` clients.
#[derive(Debug, Clone)]
pub struct SshExecutor {
    destination: String,
    port: Option<u16>,
    options: Vec<String>,
}

impl SshExecutor {
    #[must_use]
    pub fn from_config(config: &RunnerConfig) -> Self {
        let host = config.remote_host();
        let destination = match config.remote.user.as_deref() {
            Some(user) => format!("{}@{}", user, host),
            None => host.to_owned(),
        };
        Self {
            destination,
            port: config.remote.port,
            options: config.remote.ssh_options.clone(),
        }
    }

    fn ssh_command(&self, remote_command: &str) -> Command {
        let mut command = Command::new("ssh");
        if let Some(port) = self.port {
            command.arg("-p").arg(port.to_string());
        }
        command
            .args(&self.options)
            .arg(&self.destination)
            .arg(remote_command)
            .stdin(Stdio::null());
        command
    }
}

/// Joins `argv` into one shell command line with every word single-quoted.
#[must_use]
pub fn shell_join(argv: &[String]) -> String {
    argv.iter()
        .map(|word| shell_quote(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

fn remote_command_line(argv: &[String], env: &BTreeMap<String, String>) -> String {
    if env.is_empty() {
        return shell_join(argv);
    }
    let mut words = Vec::with_capacity(env.len().saturating_add(argv.len()).saturating_add(1));
    words.push("env".to_owned());
    words.extend(env.iter().map(|(key, value)| format!("{}={}", key, value)));
    words.extend(argv.iter().cloned());
    shell_join(&words)
}

#[async_trait]
impl RemoteExecutor for SshExecutor {
    async fn run_sync(&self, argv: &[String]) -> AppResult<ProcessOutput> {
        if argv.is_empty() {
            return Err(AppError::remote(RemoteError::EmptyCommand));
        }
        let line = shell_join(argv);
        debug!(destination = %self.destination, command = %line, "Running remote command");
        let output = self.ssh_command(&line).output().await.map_err(|err| {
            AppError::remote(RemoteError::Spawn {
                program: "ssh".to_owned(),
                source: err,
            })
        })?;
        Ok(ProcessOutput::from_std(&output))
    }

    async fn run_async(
        &self,
        argv: &[String],
        env: &BTreeMap<String, String>,
    ) -> AppResult<Box<dyn RemoteProcess>> {
        if argv.is_empty() {
            return Err(AppError::remote(RemoteError::EmptyCommand));
        }
        let line = remote_command_line(argv, env);
        debug!(destination = %self.destination, command = %line, "Starting remote command");
        let child = self
            .ssh_command(&line)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                AppError::remote(RemoteError::Spawn {
                    program: "ssh".to_owned(),
                    source: err,
                })
            })?;
        Ok(Box::new(SshProcess { child }))
    }

    async fn copy_to_remote(&self, local: &Path, remote: &str) -> AppResult<()> {
        let target = format!("{}:{}", self.destination, remote);
        let mut command = Command::new("scp");
        if let Some(port) = self.port {
            command.arg("-P").arg(port.to_string());
        }
        command
            .args(&self.options)
            .arg(local)
            .arg(&target)
            .stdin(Stdio::null());
        debug!(local = %local.display(), target = %target, "Copying file to remote");
        let output = command.output().await.map_err(|err| {
            AppError::remote(RemoteError::Spawn {
                program: "scp".to_owned(),
                source: err,
            })
        })?;
        if !output.status.success() {
            return Err(AppError::remote(RemoteError::Copy {
                local: local.display().to_string(),
                remote: remote.to_owned(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }));
        }
        Ok(())
    }
}

struct SshProcess {
    child: Child,
}

#[async_trait]
impl RemoteProcess for SshProcess {
    async fn wait_with_output(self: Box<Self>) -> AppResult<ProcessOutput> {
        let output = self
            .child
            .wait_with_output()
            .await
            .map_err(|err| AppError::remote(RemoteError::Wait { source: err }))?;
        Ok(ProcessOutput::from_std(&output))
    }
}
