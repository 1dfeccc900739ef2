use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::{AppError, AppResult, StoreError};

use super::metrics::{DirectionMetrics, ResultKey};
use super::template::{Axis, Settings};

/// One collected record: the iteration's settings plus a metrics object per
/// result key. Records of older files may carry extra fields; they are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementPoint(Map<String, Value>);

impl MeasurementPoint {
    /// Builds a record from iteration settings and parsed results.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings or metrics fail to serialize.
    pub fn new(
        settings: &Settings,
        results: &BTreeMap<ResultKey, DirectionMetrics>,
    ) -> AppResult<Self> {
        let mut fields = match serde_json::to_value(settings)? {
            Value::Object(fields) => fields,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
                Map::new()
            }
        };
        for (key, metrics) in results {
            fields.insert(key.key().to_owned(), serde_json::to_value(metrics)?);
        }
        Ok(Self(fields))
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Integer value of the axis field, if present and integral.
    #[must_use]
    pub fn axis_value(&self, axis: Axis) -> Option<u64> {
        self.get(axis.key()).and_then(Value::as_u64)
    }

    #[must_use]
    pub fn matches(&self, axis: Axis, value: u64) -> bool {
        // Exact JSON equality: 4096 and 4096.0 or "4096" are different keys.
        self.get(axis.key()) == Some(&Value::from(value))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultDocument {
    input_file: String,
    json: Vec<MeasurementPoint>,
}

/// Durable, resumable set of measurement points mirrored to one JSON file.
#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    document: ResultDocument,
}

impl ResultStore {
    /// Loads `path`, or starts an empty store tagged with it when absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    path: path.to_path_buf(),
                    document: ResultDocument {
                        input_file: path.to_string_lossy().into_owned(),
                        json: Vec::new(),
                    },
                });
            }
            Err(err) => {
                return Err(AppError::store(StoreError::Read {
                    path: path.to_path_buf(),
                    source: err,
                }));
            }
        };
        let document = serde_json::from_str(&content).map_err(|err| {
            AppError::store(StoreError::Malformed {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn input_file(&self) -> &str {
        &self.document.input_file
    }

    #[must_use]
    pub fn points(&self) -> &[MeasurementPoint] {
        &self.document.json
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.document.json.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.json.is_empty()
    }

    /// True iff a point with exactly this axis value is already stored.
    #[must_use]
    pub fn is_done(&self, axis: Axis, value: u64) -> bool {
        self.document
            .json
            .iter()
            .any(|point| point.matches(axis, value))
    }

    /// Appends `point` and rewrites the whole file atomically.
    ///
    /// On failure the in-memory store is left as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns an error if a point for the same axis value already exists or
    /// the file cannot be written.
    pub fn append(&mut self, axis: Axis, point: MeasurementPoint) -> AppResult<()> {
        if let Some(value) = point.axis_value(axis)
            && self.is_done(axis, value)
        {
            return Err(AppError::store(StoreError::DuplicatePoint {
                axis: axis.key(),
                value,
            }));
        }
        self.document.json.push(point);
        if let Err(err) = self.persist() {
            self.document.json.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Points ordered by axis value; records without it sort last.
    #[must_use]
    pub fn sorted_by(&self, axis: Axis) -> Vec<&MeasurementPoint> {
        let mut points: Vec<&MeasurementPoint> = self.document.json.iter().collect();
        points.sort_by_key(|point| point.axis_value(axis).unwrap_or(u64::MAX));
        points
    }

    fn persist(&self) -> AppResult<()> {
        let content = serde_json::to_vec_pretty(&self.document).map_err(|err| {
            AppError::store(StoreError::Serialize {
                path: self.path.clone(),
                source: err,
            })
        })?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            Some(_) | None => Path::new("."),
        };
        let write_err = |err: std::io::Error| {
            AppError::store(StoreError::Write {
                path: self.path.clone(),
                source: err,
            })
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&content).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|err| {
            AppError::store(StoreError::Persist {
                path: self.path.clone(),
                source: err.error,
            })
        })?;
        Ok(())
    }
}
