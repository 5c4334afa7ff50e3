use std::path::{Path, PathBuf};

use oracle_client::MeterReading;
use serde_json::Value;

use super::{format_error, read_bounded, DatasetFormat, DatasetSource};
use crate::error::OracleError;

/// A newline-delimited JSON dataset.
///
/// Each non-blank line is one reading object with the same keys as the JSON
/// array format. Blank lines are skipped and do not count as records.
pub struct NdjsonFileSource {
    path: PathBuf,
    max_bytes: u64,
}

impl NdjsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, max_bytes: u64) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<MeterReading>, OracleError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| format_error(self, format!("dataset is not valid UTF-8: {e}")))?;

        let mut readings = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(fields)) => readings.push(MeterReading::new(readings.len(), fields)),
                Ok(_) => {
                    return Err(format_error(
                        self,
                        format!("line {} is not a JSON object", line_no + 1),
                    ))
                }
                Err(e) => {
                    return Err(format_error(
                        self,
                        format!("failed to parse json line {}: {e}", line_no + 1),
                    ))
                }
            }
        }
        Ok(readings)
    }
}

impl DatasetSource for NdjsonFileSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> DatasetFormat {
        DatasetFormat::Ndjson
    }

    fn load(&self) -> Result<Vec<MeterReading>, OracleError> {
        let bytes = read_bounded(&self.path, self.max_bytes)?;
        self.parse(&bytes)
    }
}
