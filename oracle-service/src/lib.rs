pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod resolver;
pub mod sources;

pub use cli::OracleRequest;
pub use error::OracleError;
pub use pipeline::Pipeline;

use config::AppConfig;
use oracle_client::Verdict;

/// Parse `argv`, load the dataset and resolve the query.
pub fn run<I, T>(argv: I, cfg: &AppConfig) -> Result<Verdict, OracleError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let result = cli::parse_from(argv).and_then(|request| Pipeline::new(request, cfg).run());
    match result {
        Ok(resolution) => Ok(resolution.verdict),
        // clap renders usage errors itself.
        Err(e @ OracleError::Usage(_)) => Err(e),
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "query failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn argv(data: &str, qty: &str) -> Vec<String> {
        [
            "oracle_verify", "--data", data,
            "--ownerHash", "0xaa", "--meterHash", "0xbb", "--siteHash", "0xcc",
            "--epochIndex", "202540", "--typeCode", "1", "--qtyKWh", qty, "--policyNonce", "0",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn run_logged(args: Vec<String>) -> (Result<Verdict, OracleError>, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || run(args, &AppConfig::default()));
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (result, logs)
    }

    #[test]
    fn failures_are_logged_with_their_kind() {
        let (result, logs) = run_logged(argv("/nonexistent/readings.json", "100"));
        assert!(matches!(result, Err(OracleError::Io { .. })));
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("query failed"), "{logs}");
        assert!(logs.contains("kind=\"io\""), "{logs}");
    }

    #[test]
    fn parse_failures_are_logged() {
        let (result, logs) = run_logged(argv("/nonexistent/readings.json", "ten"));
        assert!(matches!(result, Err(OracleError::Parse(_))));
        assert!(logs.contains("kind=\"parse\""), "{logs}");
    }

    #[test]
    fn usage_errors_are_left_to_clap() {
        let (result, logs) = run_logged(vec!["oracle_verify".to_string()]);
        assert!(matches!(result, Err(OracleError::Usage(_))));
        assert!(!logs.contains("query failed"), "{logs}");
    }
}
