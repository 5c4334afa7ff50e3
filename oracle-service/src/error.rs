use std::path::PathBuf;

use oracle_client::{QueryError, SchemaError};

/// Every way a verdict query can fail. All of them are fatal.
#[derive(thiserror::Error, Debug)]
pub enum OracleError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {path} is larger than {limit} bytes")]
    TooLarge { path: PathBuf, limit: u64 },
    #[error("malformed dataset {path}: {reason}")]
    Format { path: PathBuf, reason: String },
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("parse error: {0}")]
    Parse(#[from] QueryError),
    #[error(transparent)]
    Usage(#[from] clap::Error),
    #[error("invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl OracleError {
    /// Process exit status for this error. Usage errors follow clap's
    /// convention; everything else exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(e) => u8::try_from(e.exit_code()).unwrap_or(2),
            _ => 1,
        }
    }

    /// Short stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } | Self::TooLarge { .. } => "io",
            Self::Format { .. } => "format",
            Self::Schema(_) => "schema",
            Self::Parse(_) => "parse",
            Self::Usage(_) => "usage",
            Self::Config { .. } => "config",
        }
    }
}
