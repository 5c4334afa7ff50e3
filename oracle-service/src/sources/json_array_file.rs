use std::path::{Path, PathBuf};

use oracle_client::domain::{kind_of, MeterReading};
use serde_json::Value;

use super::{format_error, read_bounded, DatasetFormat, DatasetSource};
use crate::error::OracleError;

/// A dataset stored as one JSON array of reading objects.
pub struct JsonArrayFileSource {
    path: PathBuf,
    max_bytes: u64,
}

impl JsonArrayFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, max_bytes: u64) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<MeterReading>, OracleError> {
        let items = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                return Err(format_error(
                    self,
                    format!("expected a JSON array of records, found {}", kind_of(&other)),
                ))
            }
            Err(e) => return Err(format_error(self, format!("invalid JSON: {e}"))),
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(MeterReading::new(index, fields)),
                other => Err(format_error(
                    self,
                    format!("record {index} is {}, expected an object", kind_of(&other)),
                )),
            })
            .collect()
    }
}

impl DatasetSource for JsonArrayFileSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> DatasetFormat {
        DatasetFormat::Json
    }

    fn load(&self) -> Result<Vec<MeterReading>, OracleError> {
        let bytes = read_bounded(&self.path, self.max_bytes)?;
        self.parse(&bytes)
    }
}
