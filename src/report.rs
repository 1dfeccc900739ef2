//! Plain-text and JSON rendering for the offline subcommands.
use serde_json::Value;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::sweep::catalog::DEFAULT_CPU_LOAD_RANGE;
use crate::sweep::{Axis, MeasurementPoint, ModeCatalog, Settings};

/// Renders points already ordered by `axis`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_points(
    points: &[&MeasurementPoint],
    axis: Axis,
    format: OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(points)?),
        OutputFormat::Text => {
            if points.is_empty() {
                return Ok("no points collected\n".to_owned());
            }
            let lines: Vec<String> = points.iter().map(|point| point_line(point, axis)).collect();
            Ok(format!("{}\n", lines.join("\n")))
        }
    }
}

/// Axis first, then the remaining settings, then one group per metrics object.
fn point_line(point: &MeasurementPoint, axis: Axis) -> String {
    let lead = point
        .get(axis.key())
        .map_or_else(|| "?".to_owned(), scalar_text);
    let mut settings = vec![format!("{}={}", axis.key(), lead)];
    let mut groups = Vec::new();
    for (key, value) in point.fields() {
        if key == axis.key() {
            continue;
        }
        match value {
            Value::Object(metrics) => {
                let pairs: Vec<String> = metrics
                    .iter()
                    .map(|(metric, metric_value)| format!("{}={}", metric, scalar_text(metric_value)))
                    .collect();
                groups.push(format!("{}: {}", key, pairs.join(" ")));
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
                settings.push(format!("{}={}", key, scalar_text(value)));
            }
        }
    }
    let mut parts = vec![settings.join(" ")];
    parts.extend(groups);
    parts.join(" | ")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_owned(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// One line per registered mode: axis, its values and the fixed settings.
#[must_use]
pub fn render_modes() -> String {
    let lines: Vec<String> = ModeCatalog::entries()
        .iter()
        .map(|entry| {
            let values = if entry.values.is_empty() {
                format!("cpu load range (default {})", DEFAULT_CPU_LOAD_RANGE)
            } else {
                format!("{:?}", entry.values)
            };
            format!(
                "{:<10} axis={:<8} {} values={}",
                entry.name,
                entry.axis.key(),
                fixed_text(&entry.fixed, entry.axis),
                values
            )
        })
        .collect();
    format!("{}\n", lines.join("\n"))
}

fn fixed_text(fixed: &Settings, axis: Axis) -> String {
    let field = |candidate: Axis, value: u64| {
        if candidate == axis {
            "*".to_owned()
        } else {
            value.to_string()
        }
    };
    format!(
        "threads={} bs={} iodepth={} sync={}",
        field(Axis::Threads, fixed.threads),
        field(Axis::BlockSize, fixed.bs),
        field(Axis::IoDepth, fixed.iodepth),
        fixed.sync
    )
}
