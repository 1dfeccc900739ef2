//! Registry of benchmark modes and the rules that finish their templates.
use crate::error::ConfigError;

use super::template::{Axis, ParameterTemplate, Settings};

pub const BS_VALUES: [u64; 9] = [256, 1024, 4096, 8192, 16384, 32768, 65536, 131072, 262144];
const BW_DP_EXP_DEPTHS: [u64; 8] = [1, 2, 4, 8, 16, 32, 64, 128];
const BW_DP_LIN_DEPTHS: [u64; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
const THREADS_VALUES: [u64; 8] = [1, 2, 4, 8, 12, 16, 32, 64];

pub const DEFAULT_CPU_LOAD_RANGE: &str = "00_99";
const CPU_LOAD_RANGES: [(&str, &[u64]); 2] = [
    ("00_99", &[0, 25, 50, 75, 99]),
    ("75_99", &[75, 80, 85, 90, 95, 99]),
];

/// Declarative template of one mode. Derived axes start out empty.
#[derive(Debug, Clone, Copy)]
pub struct ModeEntry {
    pub name: &'static str,
    pub fixed: Settings,
    pub axis: Axis,
    pub values: &'static [u64],
}

const fn settings(threads: u64, bs: u64, iodepth: u64, sync: bool) -> Settings {
    Settings {
        threads,
        bs,
        iodepth,
        sync,
        cpuload: None,
    }
}

// Axis fields hold a placeholder; the per-iteration overlay replaces them.
const MODES: [ModeEntry; 8] = [
    ModeEntry {
        name: "bw-bs",
        fixed: settings(1, 0, 2, false),
        axis: Axis::BlockSize,
        values: &BS_VALUES,
    },
    ModeEntry {
        name: "bw-dp-exp",
        fixed: settings(1, 4096, 0, false),
        axis: Axis::IoDepth,
        values: &BW_DP_EXP_DEPTHS,
    },
    ModeEntry {
        name: "bw-dp-lin",
        fixed: settings(1, 4096, 0, false),
        axis: Axis::IoDepth,
        values: &BW_DP_LIN_DEPTHS,
    },
    ModeEntry {
        name: "bw-th",
        fixed: settings(0, 4096, 2, false),
        axis: Axis::Threads,
        values: &THREADS_VALUES,
    },
    ModeEntry {
        name: "bw-cpu",
        fixed: settings(1, 65536, 2, false),
        axis: Axis::CpuLoad,
        values: &[],
    },
    ModeEntry {
        name: "bw-cpu-mt",
        fixed: settings(0, 4096, 2, false),
        axis: Axis::CpuLoad,
        values: &[],
    },
    ModeEntry {
        name: "lat",
        fixed: settings(1, 0, 1, true),
        axis: Axis::BlockSize,
        values: &BS_VALUES,
    },
    ModeEntry {
        name: "lat-cpu",
        fixed: settings(1, 4096, 1, true),
        axis: Axis::CpuLoad,
        values: &[],
    },
];

/// Caller-supplied facts the derivation rules may consult.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'ctx> {
    pub cores_per_socket: u64,
    pub cpu_load_range: Option<&'ctx str>,
}

struct Derivation {
    applies: fn(&str) -> bool,
    apply: fn(ParameterTemplate, &ResolveContext<'_>) -> Result<ParameterTemplate, ConfigError>,
}

const DERIVATIONS: [Derivation; 2] = [
    Derivation {
        applies: is_multi_threaded,
        apply: bind_threads_to_socket,
    },
    Derivation {
        applies: is_cpu_load_mode,
        apply: inject_cpu_load,
    },
];

fn is_multi_threaded(mode: &str) -> bool {
    mode.ends_with("-mt")
}

fn is_cpu_load_mode(mode: &str) -> bool {
    mode.contains("cpu")
}

fn bind_threads_to_socket(
    template: ParameterTemplate,
    ctx: &ResolveContext<'_>,
) -> Result<ParameterTemplate, ConfigError> {
    let mut fixed = *template.fixed();
    fixed.threads = ctx.cores_per_socket;
    Ok(template.with_fixed(fixed))
}

fn inject_cpu_load(
    template: ParameterTemplate,
    ctx: &ResolveContext<'_>,
) -> Result<ParameterTemplate, ConfigError> {
    let key = ctx.cpu_load_range.unwrap_or(DEFAULT_CPU_LOAD_RANGE);
    let range = cpu_load_range(key).ok_or_else(|| ConfigError::UnknownCpuLoadRange {
        value: key.to_owned(),
    })?;
    Ok(template.with_sweep(Axis::CpuLoad, range.to_vec()))
}

/// Looks up a named CPU-load range.
#[must_use]
pub fn cpu_load_range(key: &str) -> Option<&'static [u64]> {
    CPU_LOAD_RANGES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, values)| *values)
}

pub struct ModeCatalog;

impl ModeCatalog {
    #[must_use]
    pub fn entries() -> &'static [ModeEntry] {
        &MODES
    }

    #[must_use]
    pub fn entry(mode: &str) -> Option<&'static ModeEntry> {
        MODES.iter().find(|entry| entry.name == mode)
    }

    /// Resolves `mode` into a template with a non-empty swept axis.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown mode, an unknown CPU-load range, or a
    /// template whose axis ends up without values.
    pub fn resolve(mode: &str, ctx: &ResolveContext<'_>) -> Result<ParameterTemplate, ConfigError> {
        let entry = Self::entry(mode).ok_or_else(|| ConfigError::UnknownMode {
            mode: mode.to_owned(),
        })?;
        let mut template = ParameterTemplate::new(entry.fixed, entry.axis, entry.values.to_vec());
        for rule in &DERIVATIONS {
            if (rule.applies)(mode) {
                template = (rule.apply)(template, ctx)?;
            }
        }
        if template.values().is_empty() {
            return Err(ConfigError::NoSweptAxis {
                mode: mode.to_owned(),
            });
        }
        Ok(template)
    }
}
