use std::io::Write;

use oracle_client::{Query, Verdict};

use crate::{
    cli::OracleRequest,
    config::AppConfig,
    error::OracleError,
    resolver::{self, Resolution},
    sources::{self, DatasetSource},
};

/// Load a dataset, resolve one query against it.
pub struct Pipeline {
    pub source: Box<dyn DatasetSource>,
    pub query: Query,
}

impl Pipeline {
    pub fn new(request: OracleRequest, cfg: &AppConfig) -> Self {
        Self {
            source: sources::open(request.data, request.format, cfg.dataset.max_bytes),
            query: request.query,
        }
    }

    pub fn run(self) -> Result<Resolution, OracleError> {
        let query_id = resolver::query_id(&self.query);

        let readings = self.source.load()?;
        tracing::info!(
            path = %self.source.path().display(),
            format = self.source.format().as_str(),
            records = readings.len(),
            "dataset loaded"
        );

        let resolution = resolver::resolve(&readings, &self.query)?;
        tracing::info!(
            query_id = %query_id,
            found = resolution.verdict.found,
            valid = resolution.verdict.valid,
            matched_index = ?resolution.matched_index,
            scanned = resolution.scanned,
            "verdict resolved"
        );

        Ok(resolution)
    }
}

/// Pretty-printed verdict: two-space indent, `found` before `valid`.
pub fn render(verdict: &Verdict) -> serde_json::Result<String> {
    serde_json::to_string_pretty(verdict)
}

/// Write the rendered verdict and a trailing newline.
pub fn emit<W: Write>(out: &mut W, verdict: &Verdict) -> std::io::Result<()> {
    let text = render(verdict).map_err(std::io::Error::other)?;
    writeln!(out, "{text}")?;
    out.flush()
}
