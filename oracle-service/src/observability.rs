use tracing_subscriber::{
    filter::{Directive, ParseError},
    EnvFilter,
};

/// Parse a comma-separated filter such as `oracle_service=info,warn`.
pub fn parse_directives(filter: &str) -> Result<Vec<Directive>, ParseError> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| d.parse::<Directive>())
        .collect()
}

/// Install the fmt subscriber on stderr; stdout carries only the verdict.
pub fn init_tracing(filter: &str) -> Result<(), ParseError> {
    let filter = parse_directives(filter)?
        .into_iter()
        .fold(EnvFilter::from_default_env(), |f, d| f.add_directive(d));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
