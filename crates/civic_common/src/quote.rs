//! Vendor quotes for marketplace-routed complaints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vendor's bid to resolve a complaint.
///
/// At most one quote per complaint is ever approved; the flag only moves
/// false -> true. Losing quotes are kept for audit, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub complaint_id: String,
    pub vendor_id: String,
    pub price: f64,
    pub estimated_time: String,
    pub approved: bool,
    pub submitted_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        complaint_id: impl Into<String>,
        vendor_id: impl Into<String>,
        price: f64,
        estimated_time: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("QT-{}", Uuid::new_v4().simple()),
            complaint_id: complaint_id.into(),
            vendor_id: vendor_id.into(),
            price,
            estimated_time: estimated_time.into(),
            approved: false,
            submitted_at: Utc::now(),
        }
    }
}
