use crate::domain::{MeterReading, Query, SchemaError};

/// The first record of a dataset that carries the queried tuple.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// Position of the record in the scanned slice.
    pub index: usize,
    pub reading: &'a MeterReading,
}

/// Scan `readings` in order and return the first record matching `query`.
///
/// Records after the match are never read. A record reached before the match
/// whose compared fields are missing or malformed aborts the scan.
pub fn find_first<'a>(
    readings: &'a [MeterReading],
    query: &Query,
) -> Result<Option<Match<'a>>, SchemaError> {
    for (index, reading) in readings.iter().enumerate() {
        if query.matches(reading)? {
            return Ok(Some(Match { index, reading }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn dataset(values: Vec<Value>) -> Vec<MeterReading> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::Object(map) => MeterReading::new(i, map),
                other => panic!("test record must be an object, got {other}"),
            })
            .collect()
    }

    fn record(owner: &str, qty: i64, valid: bool) -> Value {
        json!({
            "ownerHash": owner, "meterHash": "0xbb", "siteHash": "0xcc",
            "epochIndex": 202540, "typeCode": 1, "qtyKWh": qty, "policyNonce": 0,
            "valid": valid,
        })
    }

    fn query(qty: i128) -> Query {
        Query::new("0xaa", "0xbb", "0xcc", 202540, 1, qty, 0)
    }

    #[test]
    fn first_of_duplicate_tuples_wins() {
        let readings = dataset(vec![
            record("0x01", 100, true),
            record("0xAA", 100, false),
            record("0xaa", 100, true),
        ]);
        let m = find_first(&readings, &query(100)).unwrap().unwrap();
        assert_eq!(m.index, 1);
        assert!(!m.reading.valid().unwrap());
    }

    #[test]
    fn no_match_returns_none() {
        let readings = dataset(vec![record("0xaa", 100, true)]);
        assert!(find_first(&readings, &query(99)).unwrap().is_none());
    }

    #[test]
    fn malformed_record_after_match_is_not_validated() {
        let readings = dataset(vec![record("0xaa", 100, true), json!({ "junk": true })]);
        let m = find_first(&readings, &query(100)).unwrap();
        assert_eq!(m.map(|m| m.index), Some(0));
    }

    #[test]
    fn malformed_record_before_match_aborts_scan() {
        let readings = dataset(vec![json!({ "ownerHash": "0xaa" }), record("0xaa", 100, true)]);
        let err = find_first(&readings, &query(100)).unwrap_err();
        assert_eq!(err, SchemaError::Missing { index: 0, field: "meterHash" });
    }

    #[test]
    fn empty_dataset_has_no_match() {
        assert!(find_first(&[], &query(100)).unwrap().is_none());
    }
}
