use serde_json::{Map, Value};

pub const OWNER_HASH: &str = "ownerHash";
pub const METER_HASH: &str = "meterHash";
pub const SITE_HASH: &str = "siteHash";
pub const EPOCH_INDEX: &str = "epochIndex";
pub const TYPE_CODE: &str = "typeCode";
pub const QTY_KWH: &str = "qtyKWh";
pub const POLICY_NONCE: &str = "policyNonce";
pub const VALID: &str = "valid";

/// A field of a dataset record that was absent or had the wrong shape.
///
/// Raised only when the field is actually read, so records that are never
/// consulted are never validated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("record {index}: missing field '{field}'")]
    Missing { index: usize, field: &'static str },
    #[error("record {index}: field '{field}' must be a string, found {found}")]
    NotAString {
        index: usize,
        field: &'static str,
        found: &'static str,
    },
    #[error("record {index}: field '{field}' is not an integer: {value}")]
    NotAnInteger {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// One meter-reading record as loaded from a dataset.
///
/// The raw object is kept as-is; typed accessors check presence and shape of
/// a single field at the moment it is read.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterReading {
    index: usize,
    fields: Map<String, Value>,
}

impl MeterReading {
    pub fn new(index: usize, fields: Map<String, Value>) -> Self {
        Self { index, fields }
    }

    /// Position of this record in its dataset.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn owner_hash(&self) -> Result<&str, SchemaError> {
        self.hash_field(OWNER_HASH)
    }

    pub fn meter_hash(&self) -> Result<&str, SchemaError> {
        self.hash_field(METER_HASH)
    }

    pub fn site_hash(&self) -> Result<&str, SchemaError> {
        self.hash_field(SITE_HASH)
    }

    pub fn epoch_index(&self) -> Result<i128, SchemaError> {
        self.integer_field(EPOCH_INDEX)
    }

    pub fn type_code(&self) -> Result<i128, SchemaError> {
        self.integer_field(TYPE_CODE)
    }

    pub fn qty_kwh(&self) -> Result<i128, SchemaError> {
        self.integer_field(QTY_KWH)
    }

    pub fn policy_nonce(&self) -> Result<i128, SchemaError> {
        self.integer_field(POLICY_NONCE)
    }

    /// The `valid` flag coerced to a boolean (see [`truthy`]).
    pub fn valid(&self) -> Result<bool, SchemaError> {
        self.field(VALID).map(truthy)
    }

    fn field(&self, name: &'static str) -> Result<&Value, SchemaError> {
        self.fields.get(name).ok_or(SchemaError::Missing {
            index: self.index,
            field: name,
        })
    }

    fn hash_field(&self, name: &'static str) -> Result<&str, SchemaError> {
        match self.field(name)? {
            Value::String(s) => Ok(s),
            other => Err(SchemaError::NotAString {
                index: self.index,
                field: name,
                found: kind_of(other),
            }),
        }
    }

    fn integer_field(&self, name: &'static str) -> Result<i128, SchemaError> {
        let value = self.field(name)?;
        coerce_integer(value).ok_or_else(|| SchemaError::NotAnInteger {
            index: self.index,
            field: name,
            value: value.to_string(),
        })
    }
}

/// Integer-like values: JSON integers, integral floats and decimal strings.
/// Booleans are rejected.
fn coerce_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(i128::from(u))
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 1.0e38)
                    .map(|f| f as i128)
            }
        }
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}

/// Truthiness of a `valid` value.
///
/// Null, `false`, zero and empty strings or containers are false; every other
/// value is true, including the string `"false"`.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !matches!(n.as_f64(), Some(f) if f == 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Human-readable JSON type of `value`, for diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
