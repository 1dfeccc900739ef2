use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{BenchmarkDescription, RunnerConfig};
use crate::error::{AppError, AppResult, ClientError, EnvError};
use crate::remote::{LocalRunner, RemoteExecutor, RemoteProcess};

use super::catalog::{ModeCatalog, ResolveContext};
use super::client::{DurationProfile, client_command, client_tool};
use super::logs::SweepLogs;
use super::medium::Medium;
use super::metrics::{DirectionMetrics, ResultKey, parse_fio_output, result_keys};
use super::server::{server_command, tool_path};
use super::store::{MeasurementPoint, ResultStore};
use super::template::{ParameterTemplate, Settings};

/// Pause between starting the remote server and starting the client.
///
/// A fixed heuristic for the listener to come up, not a readiness handshake.
pub const SERVER_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Lifecycle of an orchestrator. Construction covers `Uninitialized` →
/// `Validated`; an instance only exists once validation passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    Validated,
    Sweeping,
    Done,
}

/// Outcome of one `run()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub measured: usize,
    pub skipped: usize,
}

/// Drives one benchmark series across its swept axis, one point at a time.
pub struct SweepOrchestrator<'cfg, TRemote, TLocal> {
    config: &'cfg RunnerConfig,
    series: &'cfg BenchmarkDescription,
    result_keys: Vec<ResultKey>,
    template: ParameterTemplate,
    medium: Medium,
    profile: DurationProfile,
    store: ResultStore,
    remote: TRemote,
    local: TLocal,
    state: SweepState,
}

impl<'cfg, TRemote, TLocal> SweepOrchestrator<'cfg, TRemote, TLocal>
where
    TRemote: RemoteExecutor,
    TLocal: LocalRunner,
{
    /// Resolves the series' template, loads the result file and checks that
    /// both ends can run the benchmark tool. No process is started before
    /// every check passed.
    ///
    /// # Errors
    ///
    /// Returns configuration errors (mode, CPU-load range, axis, rw token,
    /// filetype), a store error for a malformed result file, or an
    /// environment error when a tool cannot be found.
    pub async fn new(
        config: &'cfg RunnerConfig,
        series: &'cfg BenchmarkDescription,
        result_path: &Path,
        remote: TRemote,
        local: TLocal,
    ) -> AppResult<Self> {
        let result_keys = result_keys(&series.rw).map_err(AppError::config)?;
        let ctx = ResolveContext {
            cores_per_socket: config.cores_per_socket,
            cpu_load_range: series.cpu_load_range.as_deref(),
        };
        let template = ModeCatalog::resolve(&series.mode, &ctx).map_err(AppError::config)?;
        let store = ResultStore::load(result_path)?;
        let medium = Medium::resolve(&series.filetype, &config.remote_job_mem_path)
            .map_err(AppError::config)?;

        let orchestrator = Self {
            config,
            series,
            result_keys,
            template,
            medium,
            profile: DurationProfile::select(config.short_runtime),
            store,
            remote,
            local,
            state: SweepState::Validated,
        };
        orchestrator.check_tools().await?;
        Ok(orchestrator)
    }

    async fn check_tools(&self) -> AppResult<()> {
        let local_tool = client_tool(self.config, self.series);
        if self.local.resolve(&local_tool).is_none() {
            return Err(AppError::env(EnvError::LocalToolMissing { path: local_tool }));
        }

        let remote_tool = tool_path(&self.config.remote_fio_path, "fio");
        let probe = self
            .remote
            .run_sync(&["which".to_owned(), remote_tool.clone()])
            .await?;
        if !probe.success() {
            return Err(AppError::env(EnvError::RemoteToolMissing { path: remote_tool }));
        }
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> SweepState {
        self.state
    }

    #[must_use]
    pub const fn template(&self) -> &ParameterTemplate {
        &self.template
    }

    #[must_use]
    pub fn result_keys(&self) -> &[ResultKey] {
        &self.result_keys
    }

    #[must_use]
    pub const fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Measures every axis value not yet in the result store, in axis order.
    ///
    /// Each collected point is written through before the next one starts,
    /// so an interrupted run resumes at the first missing value.
    ///
    /// # Errors
    ///
    /// Returns the first remote, client, log or store error; points appended
    /// before it remain on disk.
    pub async fn run(&mut self) -> AppResult<SweepReport> {
        let axis = self.template.axis();
        info!(
            "Starting sweep: mode={} tool={} tool_mode={} rw={} filetype={} axis={} values={:?} results={}",
            self.series.mode,
            self.series.tool,
            self.series.tool_mode,
            self.series.rw,
            self.series.filetype,
            axis,
            self.template.values(),
            self.store.path().display()
        );
        let logs = SweepLogs::create(
            Path::new(&self.config.log_dir),
            &self.series.tool_mode,
            &self.series.mode,
        )
        .await?;
        debug!(
            server = %logs.server_path().display(),
            client = %logs.client_path().display(),
            "Sweep log files created"
        );

        self.state = SweepState::Sweeping;
        let mut report = SweepReport::default();
        for &value in self.template.values() {
            if self.store.is_done(axis, value) {
                debug!("{} = {} already collected, skipping", axis, value);
                report.skipped = report.skipped.saturating_add(1);
                continue;
            }
            let settings = self.template.settings_for(value);
            let point = self.measure(&settings, &logs).await?;
            self.store.append(axis, point)?;
            report.measured = report.measured.saturating_add(1);
        }
        self.state = SweepState::Done;

        info!(
            "Sweep finished: {} measured, {} skipped, {} points in {}",
            report.measured,
            report.skipped,
            self.store.len(),
            self.store.path().display()
        );
        Ok(report)
    }

    async fn measure(&self, settings: &Settings, logs: &SweepLogs) -> AppResult<MeasurementPoint> {
        let server = self.start_server(settings).await?;
        // On client failure the server is left to finish on its own.
        let results = self.run_client(settings, logs).await?;
        self.stop_server(server, settings, logs).await?;
        MeasurementPoint::new(settings, &results)
    }

    async fn start_server(&self, settings: &Settings) -> AppResult<Box<dyn RemoteProcess>> {
        info!(
            "[mode: {}, size: {}, threads: {}, tx_depth: {}, sync: {}]",
            self.series.tool_mode, settings.bs, settings.threads, settings.iodepth, settings.sync
        );
        let command = server_command(self.config, self.series, &self.medium, settings);
        self.remote
            .copy_to_remote(&command.local_job, &command.remote_job)
            .await?;
        debug!(env = ?command.env, "[server]$ {}", command.argv.join(" "));
        let server = self.remote.run_async(&command.argv, &command.env).await?;
        tokio::time::sleep(SERVER_SETTLE_DELAY).await;
        Ok(server)
    }

    async fn run_client(
        &self,
        settings: &Settings,
        logs: &SweepLogs,
    ) -> AppResult<BTreeMap<ResultKey, DirectionMetrics>> {
        let command = client_command(self.config, self.series, settings, self.profile);
        debug!(env = ?command.env, "[client]$ {}", command.argv.join(" "));
        let output = self.local.run(&command.argv, &command.env).await?;
        logs.append_client(settings, &output).await?;
        if !output.success() {
            return Err(AppError::client(ClientError::Failed {
                status: output.status,
                stderr: output.stderr.trim().to_owned(),
            }));
        }
        parse_fio_output(&output.stdout, &self.result_keys).map_err(AppError::client)
    }

    async fn stop_server(
        &self,
        server: Box<dyn RemoteProcess>,
        settings: &Settings,
        logs: &SweepLogs,
    ) -> AppResult<()> {
        let output = server.wait_with_output().await?;
        logs.append_server(settings, &output).await?;
        // Logged, never escalated.
        if !output.success() {
            warn!(
                "Remote server exited with status {:?}; see {}",
                output.status,
                logs.server_path().display()
            );
        }
        Ok(())
    }
}
