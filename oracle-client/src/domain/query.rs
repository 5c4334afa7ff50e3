use super::meter_reading::{MeterReading, SchemaError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid integer for --{flag}: '{value}'")]
    InvalidInteger { flag: &'static str, value: String },
}

/// The identifying tuple of a meter reading, as asked by a caller.
///
/// Hash fields are stored lower-cased; comparison against a record lower-cases
/// the record side as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    owner_hash: String,
    meter_hash: String,
    site_hash: String,
    epoch_index: i128,
    type_code: i128,
    qty_kwh: i128,
    policy_nonce: i128,
}

impl Query {
    pub fn new(
        owner_hash: &str,
        meter_hash: &str,
        site_hash: &str,
        epoch_index: i128,
        type_code: i128,
        qty_kwh: i128,
        policy_nonce: i128,
    ) -> Self {
        Self {
            owner_hash: owner_hash.to_lowercase(),
            meter_hash: meter_hash.to_lowercase(),
            site_hash: site_hash.to_lowercase(),
            epoch_index,
            type_code,
            qty_kwh,
            policy_nonce,
        }
    }

    /// Parse the text of a numeric query argument.
    pub fn parse_integer(flag: &'static str, text: &str) -> Result<i128, QueryError> {
        text.trim()
            .parse::<i128>()
            .map_err(|_| QueryError::InvalidInteger {
                flag,
                value: text.to_string(),
            })
    }

    pub fn owner_hash(&self) -> &str {
        &self.owner_hash
    }

    pub fn meter_hash(&self) -> &str {
        &self.meter_hash
    }

    pub fn site_hash(&self) -> &str {
        &self.site_hash
    }

    pub fn epoch_index(&self) -> i128 {
        self.epoch_index
    }

    pub fn type_code(&self) -> i128 {
        self.type_code
    }

    pub fn qty_kwh(&self) -> i128 {
        self.qty_kwh
    }

    pub fn policy_nonce(&self) -> i128 {
        self.policy_nonce
    }

    /// Whether `reading` carries exactly this tuple.
    ///
    /// Fields are read in a fixed order and the comparison stops at the first
    /// unequal field, so a malformed field after that point is not reported.
    pub fn matches(&self, reading: &MeterReading) -> Result<bool, SchemaError> {
        Ok(reading.owner_hash()?.to_lowercase() == self.owner_hash
            && reading.meter_hash()?.to_lowercase() == self.meter_hash
            && reading.site_hash()?.to_lowercase() == self.site_hash
            && reading.epoch_index()? == self.epoch_index
            && reading.type_code()? == self.type_code
            && reading.qty_kwh()? == self.qty_kwh
            && reading.policy_nonce()? == self.policy_nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn reading(value: Value) -> MeterReading {
        match value {
            Value::Object(map) => MeterReading::new(0, map),
            other => panic!("test record must be an object, got {other}"),
        }
    }

    fn sample_query() -> Query {
        Query::new("0xAA", "0xbb", "0xCc", 202540, 1, 100, 0)
    }

    #[test]
    fn hashes_are_lowercased_on_construction() {
        let q = sample_query();
        assert_eq!(q.owner_hash(), "0xaa");
        assert_eq!(q.meter_hash(), "0xbb");
        assert_eq!(q.site_hash(), "0xcc");
    }

    #[test]
    fn parse_integer_trims_and_reports_flag() {
        assert_eq!(Query::parse_integer("qtyKWh", " 100 ").unwrap(), 100);
        assert_eq!(Query::parse_integer("policyNonce", "+7").unwrap(), 7);
        let err = Query::parse_integer("epochIndex", "20x").unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidInteger { flag: "epochIndex", value: "20x".to_string() }
        );
        assert_eq!(err.to_string(), "invalid integer for --epochIndex: '20x'");
    }

    #[test]
    fn matches_ignores_hash_case() {
        let r = reading(json!({
            "ownerHash": "0xaA", "meterHash": "0xBB", "siteHash": "0xcc",
            "epochIndex": 202540, "typeCode": 1, "qtyKWh": 100, "policyNonce": 0,
        }));
        assert!(sample_query().matches(&r).unwrap());
    }

    #[test]
    fn off_by_one_quantity_does_not_match() {
        let r = reading(json!({
            "ownerHash": "0xaa", "meterHash": "0xbb", "siteHash": "0xcc",
            "epochIndex": 202540, "typeCode": 1, "qtyKWh": 101, "policyNonce": 0,
        }));
        assert!(!sample_query().matches(&r).unwrap());
    }

    #[test]
    fn comparison_stops_at_first_unequal_field() {
        // Owner differs, so the missing quantity is never read.
        let r = reading(json!({
            "ownerHash": "0xff", "meterHash": "0xbb", "siteHash": "0xcc",
            "epochIndex": 202540, "typeCode": 1, "policyNonce": 0,
        }));
        assert!(!sample_query().matches(&r).unwrap());
    }

    #[test]
    fn malformed_field_before_mismatch_is_reported() {
        let r = reading(json!({
            "ownerHash": "0xaa", "meterHash": "0xbb", "siteHash": "0xcc",
            "epochIndex": "soon", "typeCode": 9,
        }));
        assert!(matches!(
            sample_query().matches(&r),
            Err(SchemaError::NotAnInteger { field: "epochIndex", .. })
        ));
    }
}
