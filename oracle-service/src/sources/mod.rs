pub mod csv_file;
pub mod json_array_file;
pub mod ndjson_file;

pub use csv_file::CsvFileSource;
pub use json_array_file::JsonArrayFileSource;
pub use ndjson_file::NdjsonFileSource;

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use oracle_client::MeterReading;

use crate::error::OracleError;

/// Something that can produce the ordered records of a dataset.
pub trait DatasetSource {
    fn path(&self) -> &Path;

    fn format(&self) -> DatasetFormat;

    /// Read the whole dataset once. Only the container shape is checked here;
    /// record fields are validated when they are compared.
    fn load(&self) -> Result<Vec<MeterReading>, OracleError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetFormat {
    /// A single JSON array of objects.
    Json,
    /// One JSON object per line.
    Ndjson,
    /// Comma-separated values with a header row.
    Csv,
}

impl DatasetFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Csv => "csv",
        }
    }
}

/// Build the source for `path`. Without an explicit `format` the file is read
/// as a JSON array whatever its name.
pub fn open(path: PathBuf, format: Option<DatasetFormat>, max_bytes: u64) -> Box<dyn DatasetSource> {
    match format.unwrap_or(DatasetFormat::Json) {
        DatasetFormat::Json => Box::new(JsonArrayFileSource::new(path, max_bytes)),
        DatasetFormat::Ndjson => Box::new(NdjsonFileSource::new(path, max_bytes)),
        DatasetFormat::Csv => Box::new(CsvFileSource::new(path, max_bytes)),
    }
}

/// Read a file fully, refusing anything over `max_bytes`.
pub(crate) fn read_bounded(path: &Path, max_bytes: u64) -> Result<Vec<u8>, OracleError> {
    let io_err = |source| OracleError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();
    if len > max_bytes {
        return Err(OracleError::TooLarge {
            path: path.to_path_buf(),
            limit: max_bytes,
        });
    }

    let mut buf = Vec::with_capacity(len as usize);
    file.take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(io_err)?;
    if buf.len() as u64 > max_bytes {
        return Err(OracleError::TooLarge {
            path: path.to_path_buf(),
            limit: max_bytes,
        });
    }
    Ok(buf)
}

pub(crate) fn format_error(source: &dyn DatasetSource, reason: String) -> OracleError {
    metrics::counter!("oracle_dataset_format_errors_total", "format" => source.format().as_str())
        .increment(1);
    OracleError::Format {
        path: source.path().to_path_buf(),
        reason,
    }
}
