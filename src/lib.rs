//! Core library for the `sweepbench` CLI.
//!
//! Runs fio benchmark series against a remote server: a registry of sweep
//! modes, a resumable JSON result store, SSH and local process plumbing, and
//! the orchestrator that drives one measurement point at a time. The binary
//! is a thin wrapper over [`run`].
pub mod args;
pub mod config;
mod entry;
pub mod error;
pub mod logger;
pub mod remote;
pub mod report;
pub mod sweep;

pub use entry::run;
