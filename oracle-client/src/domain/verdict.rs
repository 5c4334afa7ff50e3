use serde::Serialize;

/// Result of a membership-and-validity query.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub found: bool,
    pub valid: bool,
}

impl Verdict {
    /// A query that matched no record is never valid.
    pub fn not_found() -> Self {
        Self { found: false, valid: false }
    }

    pub fn found(valid: bool) -> Self {
        Self { found: true, valid }
    }
}
