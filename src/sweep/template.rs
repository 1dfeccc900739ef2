use serde::{Deserialize, Serialize};

/// Parameter a sweep iterates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Threads,
    #[serde(rename = "bs")]
    BlockSize,
    #[serde(rename = "iodepth")]
    IoDepth,
    #[serde(rename = "cpuload")]
    CpuLoad,
}

impl Axis {
    /// Field name used for this axis in result records and fio env.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Threads => "threads",
            Self::BlockSize => "bs",
            Self::IoDepth => "iodepth",
            Self::CpuLoad => "cpuload",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Scalar settings of a single measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub threads: u64,
    pub bs: u64,
    pub iodepth: u64,
    pub sync: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpuload: Option<u64>,
}

impl Settings {
    /// Copy of `self` with the `axis` field replaced by `value`.
    #[must_use]
    pub const fn with_axis(self, axis: Axis, value: u64) -> Self {
        let mut next = self;
        match axis {
            Axis::Threads => next.threads = value,
            Axis::BlockSize => next.bs = value,
            Axis::IoDepth => next.iodepth = value,
            Axis::CpuLoad => next.cpuload = Some(value),
        }
        next
    }

    #[must_use]
    pub const fn get(&self, axis: Axis) -> Option<u64> {
        match axis {
            Axis::Threads => Some(self.threads),
            Axis::BlockSize => Some(self.bs),
            Axis::IoDepth => Some(self.iodepth),
            Axis::CpuLoad => self.cpuload,
        }
    }
}

/// Fixed settings plus the one designated axis and its ordered values.
///
/// Produced once per orchestrator; never mutated during a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTemplate {
    fixed: Settings,
    axis: Axis,
    values: Vec<u64>,
}

impl ParameterTemplate {
    #[must_use]
    pub const fn new(fixed: Settings, axis: Axis, values: Vec<u64>) -> Self {
        Self {
            fixed,
            axis,
            values,
        }
    }

    #[must_use]
    pub const fn fixed(&self) -> &Settings {
        &self.fixed
    }

    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Number of measurements a full sweep performs.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.values.len()
    }

    /// Settings for one axis value.
    #[must_use]
    pub const fn settings_for(&self, value: u64) -> Settings {
        self.fixed.with_axis(self.axis, value)
    }

    pub(crate) fn with_fixed(mut self, fixed: Settings) -> Self {
        self.fixed = fixed;
        self
    }

    pub(crate) fn with_sweep(mut self, axis: Axis, values: Vec<u64>) -> Self {
        self.axis = axis;
        self.values = values;
        self
    }
}
