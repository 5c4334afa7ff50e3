use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use oracle_client::{domain::meter_reading::VALID, MeterReading};
use serde_json::{Map, Value};

use super::{format_error, read_bounded, DatasetFormat, DatasetSource};
use crate::error::OracleError;

/// CSV dataset with a header row.
///
/// Expected header columns (by name, any order):
/// - ownerHash, meterHash, siteHash
/// - epochIndex, typeCode, qtyKWh, policyNonce
/// - valid (`true`/`false`, `yes`/`no` or `1`/`0`)
///
/// Cells are kept as strings and integer columns are coerced when compared.
/// A `valid` cell spelled as a boolean becomes a JSON boolean; any other
/// non-empty text is truthy.
pub struct CsvFileSource {
    path: PathBuf,
    max_bytes: u64,
}

impl CsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, max_bytes: u64) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<MeterReading>, OracleError> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
        let headers = rdr
            .headers()
            .map_err(|e| format_error(self, format!("failed to read CSV headers: {e}")))?
            .clone();

        let mut readings = Vec::new();
        for result in rdr.records() {
            let record =
                result.map_err(|e| format_error(self, format!("failed to read CSV record: {e}")))?;
            readings.push(MeterReading::new(readings.len(), record_to_fields(&record, &headers)));
        }
        Ok(readings)
    }
}

fn record_to_fields(record: &StringRecord, headers: &StringRecord) -> Map<String, Value> {
    headers
        .iter()
        .zip(record.iter())
        .map(|(name, cell)| (name.to_string(), cell_value(name, cell)))
        .collect()
}

fn cell_value(name: &str, cell: &str) -> Value {
    if name == VALID {
        match cell.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => return Value::Bool(true),
            "false" | "no" | "0" => return Value::Bool(false),
            _ => {}
        }
    }
    Value::String(cell.to_string())
}

impl DatasetSource for CsvFileSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> DatasetFormat {
        DatasetFormat::Csv
    }

    fn load(&self) -> Result<Vec<MeterReading>, OracleError> {
        let bytes = read_bounded(&self.path, self.max_bytes)?;
        self.parse(&bytes)
    }
}
