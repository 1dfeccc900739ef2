use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ConfigError};

/// I/O direction a sweep reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKey {
    Read,
    Write,
}

impl ResultKey {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// Maps a fio `rw` token onto the directions it produces.
///
/// Mixed tokens (`rw`, `randrw`, `readwrite`) are checked first so that
/// `readwrite` reports both directions.
///
/// # Errors
///
/// Returns an error for a token naming neither direction.
pub fn result_keys(rw: &str) -> Result<Vec<ResultKey>, ConfigError> {
    if rw.contains("rw") || rw.contains("readwrite") {
        return Ok(vec![ResultKey::Read, ResultKey::Write]);
    }
    if rw.contains("read") {
        return Ok(vec![ResultKey::Read]);
    }
    if rw.contains("write") {
        return Ok(vec![ResultKey::Write]);
    }
    Err(ConfigError::UnknownReadWrite {
        value: rw.to_owned(),
    })
}

/// Observed metrics of one direction. Bandwidth in KiB/s, latency in ns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionMetrics {
    pub bw: u64,
    pub iops: f64,
    pub lat_avg: f64,
    pub lat_min: u64,
    pub lat_max: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_pctl_99: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_pctl_99_9: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FioReport {
    #[serde(default)]
    jobs: Vec<FioJob>,
}

#[derive(Debug, Deserialize)]
struct FioJob {
    read: Option<FioDirection>,
    write: Option<FioDirection>,
}

impl FioJob {
    const fn direction(&self, key: ResultKey) -> Option<&FioDirection> {
        match key {
            ResultKey::Read => self.read.as_ref(),
            ResultKey::Write => self.write.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FioDirection {
    bw: Option<u64>,
    iops: Option<f64>,
    lat_ns: Option<FioLatency>,
    clat_ns: Option<FioCompletionLatency>,
}

#[derive(Debug, Deserialize)]
struct FioLatency {
    min: u64,
    max: u64,
    mean: f64,
}

#[derive(Debug, Deserialize)]
struct FioCompletionLatency {
    #[serde(default)]
    percentile: BTreeMap<String, u64>,
}

const PCTL_99: &str = "99.000000";
const PCTL_99_9: &str = "99.900000";

/// Parses fio `--output-format=json+` output into per-direction metrics.
///
/// Bandwidth and IOPS are summed over jobs; latencies report the worst job.
///
/// # Errors
///
/// Returns an error when the output is not JSON, lists no jobs, or a job
/// lacks a metric of a requested direction.
pub fn parse_fio_output(
    stdout: &str,
    keys: &[ResultKey],
) -> Result<BTreeMap<ResultKey, DirectionMetrics>, ClientError> {
    // fio may print notes before the JSON document.
    let json = stdout
        .find('{')
        .and_then(|start| stdout.get(start..))
        .unwrap_or(stdout);
    let report: FioReport =
        serde_json::from_str(json).map_err(|err| ClientError::OutputNotJson { source: err })?;
    if report.jobs.is_empty() {
        return Err(ClientError::NoJobs);
    }

    let mut results = BTreeMap::new();
    for key in keys {
        results.insert(*key, aggregate(&report.jobs, *key)?);
    }
    Ok(results)
}

fn aggregate(jobs: &[FioJob], key: ResultKey) -> Result<DirectionMetrics, ClientError> {
    let missing = |metric: &'static str| ClientError::MissingMetric {
        direction: key.key(),
        metric,
    };

    let mut bw = 0u64;
    let mut iops = Vec::with_capacity(jobs.len());
    let mut lat_avg = f64::MIN;
    let mut lat_min = u64::MAX;
    let mut lat_max = 0u64;
    let mut lat_pctl_99: Option<u64> = None;
    let mut lat_pctl_99_9: Option<u64> = None;

    for job in jobs {
        let direction = job.direction(key).ok_or_else(|| missing("section"))?;
        bw = bw.saturating_add(direction.bw.ok_or_else(|| missing("bw"))?);
        iops.push(direction.iops.ok_or_else(|| missing("iops"))?);
        let lat = direction.lat_ns.as_ref().ok_or_else(|| missing("lat_ns"))?;
        lat_avg = lat_avg.max(lat.mean);
        lat_min = lat_min.min(lat.min);
        lat_max = lat_max.max(lat.max);
        if let Some(clat) = direction.clat_ns.as_ref() {
            lat_pctl_99 = worst(lat_pctl_99, clat.percentile.get(PCTL_99));
            lat_pctl_99_9 = worst(lat_pctl_99_9, clat.percentile.get(PCTL_99_9));
        }
    }

    Ok(DirectionMetrics {
        bw,
        iops: iops.iter().sum(),
        lat_avg,
        lat_min,
        lat_max,
        lat_pctl_99,
        lat_pctl_99_9,
    })
}

fn worst(current: Option<u64>, candidate: Option<&u64>) -> Option<u64> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => Some(current.max(*candidate)),
        (None, Some(candidate)) => Some(*candidate),
        (current, None) => current,
    }
}
