use oracle_client::{find_first, MeterReading, Query, SchemaError, Verdict};

/// Outcome of resolving one query against a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub verdict: Verdict,
    /// Dataset position of the record the verdict was taken from.
    pub matched_index: Option<usize>,
    /// Records compared before the scan stopped.
    pub scanned: usize,
}

/// Derive the verdict for `query`.
///
/// Rules:
/// - the first record carrying the queried tuple decides `valid`;
/// - no matching record gives `{found: false, valid: false}`.
pub fn resolve(readings: &[MeterReading], query: &Query) -> Result<Resolution, SchemaError> {
    let found = find_first(readings, query).and_then(|m| match m {
        Some(m) => m.reading.valid().map(|valid| (Some(m.index), Verdict::found(valid))),
        None => Ok((None, Verdict::not_found())),
    });

    let (matched_index, verdict) = match found {
        Ok(v) => v,
        Err(e) => {
            metrics::counter!("oracle_schema_errors_total").increment(1);
            return Err(e);
        }
    };

    let scanned = matched_index.map_or(readings.len(), |i| i + 1);
    metrics::counter!("oracle_records_scanned_total").increment(scanned as u64);
    metrics::counter!(
        "oracle_verdicts_total",
        "found" => if verdict.found { "true" } else { "false" }
    )
    .increment(1);

    Ok(Resolution {
        verdict,
        matched_index,
        scanned,
    })
}

fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    let len = s.len() as u32;
    hasher.update(&len.to_le_bytes());
    hasher.update(s.as_bytes());
}

fn hash_i128(hasher: &mut blake3::Hasher, v: i128) {
    hasher.update(&v.to_le_bytes());
}

/// Stable identifier of a query tuple, for correlating log lines.
///
/// Built from the normalized tuple, so queries differing only in hash letter
/// case share an id. Not a signature.
pub fn query_id(query: &Query) -> String {
    let mut h = blake3::Hasher::new();
    hash_str(&mut h, query.owner_hash());
    hash_str(&mut h, query.meter_hash());
    hash_str(&mut h, query.site_hash());
    hash_i128(&mut h, query.epoch_index());
    hash_i128(&mut h, query.type_code());
    hash_i128(&mut h, query.qty_kwh());
    hash_i128(&mut h, query.policy_nonce());
    h.finalize().to_hex().to_string()
}
