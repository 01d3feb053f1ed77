//! Scan history record — one entry per accepted scan.

use crate::{CustomerId, Timestamp};
use serde::{Deserialize, Serialize};

/// A single accepted scan, appended to the tenant's scan log.
///
/// Used solely to answer "which customers were scanned on day D".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub customer_id: CustomerId,
    pub scan_timestamp: Timestamp,
}

impl ScanRecord {
    pub fn new(customer_id: CustomerId, scan_timestamp: Timestamp) -> Self {
        Self {
            customer_id,
            scan_timestamp,
        }
    }
}
