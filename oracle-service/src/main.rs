use std::process::ExitCode;

use oracle_service::{config::AppConfig, observability, pipeline, OracleError};

fn main() -> ExitCode {
    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => return fail(&e),
    };
    if let Err(e) = observability::init_tracing(&cfg.logging.filter) {
        eprintln!("error (config): invalid logging.filter: {e}");
        return ExitCode::FAILURE;
    }

    let verdict = match oracle_service::run(std::env::args_os(), &cfg) {
        Ok(v) => v,
        // clap prints its own usage text (and handles --help / --version).
        Err(OracleError::Usage(e)) => e.exit(),
        Err(e) => return fail(&e),
    };

    if let Err(e) = pipeline::emit(&mut std::io::stdout().lock(), &verdict) {
        eprintln!("error: failed to write verdict: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn fail(e: &OracleError) -> ExitCode {
    eprintln!("error ({}): {e}", e.kind());
    ExitCode::from(e.exit_code())
}
