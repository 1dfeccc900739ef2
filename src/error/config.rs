use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("No config file given and neither sweepbench.toml nor sweepbench.json exists.")]
    MissingConfig,
    #[error("Failed to read benchmark series '{path}': {source}")]
    ReadSeries {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse benchmark series '{path}': {source}")]
    ParseSeries {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("An unexpected mode: '{mode}'")]
    UnknownMode { mode: String },
    #[error("Wrong value of 'cpu_load_range': '{value}'. Use 00_99 or 75_99.")]
    UnknownCpuLoadRange { value: String },
    #[error("Mode '{mode}' resolves to no swept axis")]
    NoSweptAxis { mode: String },
    #[error("An unexpected 'rw' value: '{value}'")]
    UnknownReadWrite { value: String },
    #[error("An unexpected 'filetype' value: '{value}'. Use malloc or pmem.")]
    UnknownFiletype { value: String },
}
