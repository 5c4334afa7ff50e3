use std::{ffi::OsString, path::PathBuf};

use clap::Parser;
use oracle_client::{Query, QueryError};

use crate::{error::OracleError, sources::DatasetFormat};

/// Check whether a meter reading exists in a local dataset and is marked
/// valid. Prints `{"found": .., "valid": ..}` on stdout.
#[derive(Parser, Debug, Clone)]
#[command(name = "oracle_verify", version, long_about = None)]
pub struct Args {
    /// Dataset file (a JSON array unless --format says otherwise)
    #[arg(long)]
    pub data: PathBuf,

    /// Dataset format; `json` when omitted
    #[arg(long, value_enum)]
    pub format: Option<DatasetFormat>,

    #[arg(long = "ownerHash")]
    pub owner_hash: String,

    #[arg(long = "meterHash")]
    pub meter_hash: String,

    #[arg(long = "siteHash")]
    pub site_hash: String,

    #[arg(long = "epochIndex", allow_hyphen_values = true)]
    pub epoch_index: String,

    #[arg(long = "typeCode", allow_hyphen_values = true)]
    pub type_code: String,

    #[arg(long = "qtyKWh", allow_hyphen_values = true)]
    pub qty_kwh: String,

    #[arg(long = "policyNonce", allow_hyphen_values = true)]
    pub policy_nonce: String,
}

/// One fully-parsed invocation.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub data: PathBuf,
    pub format: Option<DatasetFormat>,
    pub query: Query,
}

impl TryFrom<Args> for OracleRequest {
    type Error = QueryError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let epoch_index = Query::parse_integer("epochIndex", &args.epoch_index)?;
        let type_code = Query::parse_integer("typeCode", &args.type_code)?;
        let qty_kwh = Query::parse_integer("qtyKWh", &args.qty_kwh)?;
        let policy_nonce = Query::parse_integer("policyNonce", &args.policy_nonce)?;

        Ok(Self {
            data: args.data,
            format: args.format,
            query: Query::new(
                &args.owner_hash,
                &args.meter_hash,
                &args.site_hash,
                epoch_index,
                type_code,
                qty_kwh,
                policy_nonce,
            ),
        })
    }
}

/// Parse a full command line (program name first).
pub fn parse_from<I, T>(argv: I) -> Result<OracleRequest, OracleError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv)?;
    Ok(OracleRequest::try_from(args)?)
}
