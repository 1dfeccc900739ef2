//! Benchmark sweeps: mode registry, parameter templates, the resumable
//! result store and the orchestrator that ties them to the two hosts.
pub mod catalog;
pub mod client;
pub mod logs;
pub mod medium;
pub mod metrics;
pub mod orchestrator;
pub mod server;
pub mod store;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{ModeCatalog, ModeEntry, ResolveContext};
pub use metrics::{DirectionMetrics, ResultKey};
pub use orchestrator::{SweepOrchestrator, SweepReport, SweepState};
pub use store::{MeasurementPoint, ResultStore};
pub use template::{Axis, ParameterTemplate, Settings};
