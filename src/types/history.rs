use serde::{Deserialize, Serialize};

/// A single visit recorded in the history store.
///
/// Records are never updated after insertion. Repeated visits to the same
/// `(scheme, address)` pair produce separate rows; `timestamp` (milliseconds
/// since the UNIX epoch) is unique and orders visits by recency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: i64,
    pub scheme: String,
    pub address: String,
}

impl HistoryRecord {
    /// Returns the record rendered as `scheme:address`.
    pub fn uri(&self) -> String {
        format!("{}:{}", self.scheme, self.address)
    }
}
