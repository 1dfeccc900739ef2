use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::AppResult;
use crate::remote::ProcessOutput;

use super::template::Settings;

/// Per-sweep server and client log files, appended once per iteration.
#[derive(Debug, Clone)]
pub struct SweepLogs {
    server: PathBuf,
    client: PathBuf,
}

impl SweepLogs {
    /// Creates both files under `dir`, named by tool mode, mode and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or files cannot be created.
    pub async fn create(dir: &Path, tool_mode: &str, mode: &str) -> AppResult<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let stamp = chrono::Local::now().format("%Y-%m-%d-%H:%M:%S%.6f");
        let base = format!("fio-{}_{}-{}", tool_mode, mode, stamp);
        let logs = Self {
            server: dir.join(format!("{}-server.log", base)),
            client: dir.join(format!("{}-client.log", base)),
        };
        tokio::fs::File::create(&logs.server).await?;
        tokio::fs::File::create(&logs.client).await?;
        Ok(logs)
    }

    #[must_use]
    pub fn server_path(&self) -> &Path {
        &self.server
    }

    #[must_use]
    pub fn client_path(&self) -> &Path {
        &self.client
    }

    /// Records the server's exit status and captured stdio.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be written.
    pub async fn append_server(&self, settings: &Settings, output: &ProcessOutput) -> AppResult<()> {
        let entry = format!(
            "{}status: {}\nstdout:\n{}\nstderr:\n{}\n\n",
            header(settings),
            status_text(output.status),
            output.stdout.trim(),
            output.stderr.trim()
        );
        append(&self.server, &entry).await
    }

    /// Records the client's diagnostics; its stdout becomes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be written.
    pub async fn append_client(&self, settings: &Settings, output: &ProcessOutput) -> AppResult<()> {
        let entry = format!(
            "{}status: {}\nstderr:\n{}\n\n",
            header(settings),
            status_text(output.status),
            output.stderr.trim()
        );
        append(&self.client, &entry).await
    }
}

fn header(settings: &Settings) -> String {
    let cpuload = settings
        .cpuload
        .map_or_else(|| "-".to_owned(), |load| load.to_string());
    format!(
        "=== bs: {}, threads: {}, iodepth: {}, sync: {}, cpuload: {} ===\n",
        settings.bs, settings.threads, settings.iodepth, settings.sync, cpuload
    )
}

fn status_text(status: Option<i32>) -> String {
    status.map_or_else(|| "killed by signal".to_owned(), |code| code.to_string())
}

async fn append(path: &Path, entry: &str) -> AppResult<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await?;
    file.write_all(entry.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
