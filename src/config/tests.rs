use super::{load_config, load_config_file, load_series};
use crate::error::{AppError, ConfigError};
use tempfile::tempdir;

#[test]
fn parse_toml_config_with_remote_table() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("sweepbench.toml");
    let content = r#"
server_ip = "192.168.0.2"
job_numa = 0
remote_job_numa = 1
remote_job_mem_path = "/dev/dax0.0"
cores_per_socket = 24
short_runtime = true

[remote]
user = "bench"
port = 2222
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.server_ip != "192.168.0.2" {
        return Err(format!("Unexpected server_ip: {}", config.server_ip));
    }
    if config.remote_host() != "192.168.0.2" {
        return Err("Expected remote host to fall back to server_ip".to_owned());
    }
    if config.remote.user.as_deref() != Some("bench") || config.remote.port != Some(2222) {
        return Err("Unexpected remote table".to_owned());
    }
    if config.job_dir != "./fio_jobs" || config.log_dir != "/tmp" {
        return Err("Unexpected directory defaults".to_owned());
    }
    if !config.short_runtime || config.cores_per_socket != 24 {
        return Err("Unexpected scalar fields".to_owned());
    }
    if config.client_tracer() != "numactl -N 0" {
        return Err(format!("Unexpected tracer: {}", config.client_tracer()));
    }
    Ok(())
}

#[test]
fn parse_json_config_with_legacy_keys() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("config.json");
    let content = r#"{
  "server_ip": "10.0.0.1",
  "JOB_NUMA": 1,
  "REMOTE_FIO_PATH": "/opt/fio",
  "REMOTE_JOB_MEM_PATH": "/mnt/pmem/file",
  "CORES_PER_SOCKET": 16,
  "TRACER": "perf stat --"
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.job_numa != 1 || config.remote_fio_path != "/opt/fio" {
        return Err("Legacy keys were not honoured".to_owned());
    }
    if config.client_tracer() != "perf stat --" {
        return Err(format!("Unexpected tracer: {}", config.client_tracer()));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "server_ip: x").map_err(|err| format!("write failed: {}", err))?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected an error".to_owned()),
    }
}

#[test]
fn explicit_missing_config_reports_read_error() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("absent.toml");
    match load_config(Some(&path)) {
        Err(AppError::Config(ConfigError::ReadConfig { .. })) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected an error".to_owned()),
    }
}

#[test]
fn series_defaults_tool_and_polling() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("series.json");
    let content = r#"{"rw": "randread", "filetype": "malloc", "tool_mode": "apm", "mode": "bw-bs"}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let series = load_series(&path).map_err(|err| err.to_string())?;
    if series.tool != "fio" {
        return Err(format!("Unexpected tool: {}", series.tool));
    }
    if !series.busy_wait_polling || series.cpu_load_range.is_some() {
        return Err("Unexpected optional defaults".to_owned());
    }
    Ok(())
}
