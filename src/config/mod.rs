//! Runner configuration and benchmark series loading.
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use loader::{load_config, load_config_file, load_series};
pub use types::{BenchmarkDescription, RemoteConfig, RunnerConfig};
