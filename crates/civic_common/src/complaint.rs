//! Complaint records and their lifecycle history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::ComplaintStatus;

/// Who currently owns the work on a complaint.
///
/// A complaint is bound to at most one of an officer or a vendor; modeling
/// the binding as a single enum keeps "both at once" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Assignee {
    Officer(String),
    Vendor(String),
}

/// What happened to a complaint, when, and who did it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Created,
    OfficerAssigned,
    SentToMarketplace,
    QuoteSubmitted,
    QuoteApproved,
    Resolved,
}

/// One entry in a complaint's append-only timeline.
///
/// Retained for audit alongside non-winning quotes; never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub at: DateTime<Utc>,
    pub actor_id: String,
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A citizen-reported civic issue tracked through resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub citizen_id: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub status: ComplaintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<LifecycleEvent>,
}

impl Complaint {
    /// File a new complaint in `Pending`.
    pub fn new(
        citizen_id: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let citizen_id = citizen_id.into();
        let now = Utc::now();
        let mut complaint = Self {
            id: format!("CMP-{}", Uuid::new_v4().simple()),
            citizen_id: citizen_id.clone(),
            category: category.into(),
            description: description.into(),
            location: location.into(),
            status: ComplaintStatus::Pending,
            assignee: None,
            resolution_notes: None,
            proof_notes: None,
            created_at: now,
            history: Vec::new(),
        };
        complaint.record(&citizen_id, EventKind::Created, None);
        complaint
    }

    /// The assigned officer, if government-routed.
    pub fn officer_id(&self) -> Option<&str> {
        match &self.assignee {
            Some(Assignee::Officer(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    /// The bound vendor, if a quote was approved.
    pub fn vendor_id(&self) -> Option<&str> {
        match &self.assignee {
            Some(Assignee::Vendor(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Whether `user_id` is the owning officer or bound vendor.
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        match &self.assignee {
            Some(Assignee::Officer(id)) | Some(Assignee::Vendor(id)) => id == user_id,
            None => false,
        }
    }

    /// Append a timeline entry.
    pub fn record(&mut self, actor_id: &str, kind: EventKind, note: Option<String>) {
        self.history.push(LifecycleEvent {
            at: Utc::now(),
            actor_id: actor_id.to_string(),
            kind,
            note,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_complaint_is_pending() {
        let c = Complaint::new("cit-1", "Road Damage", "Pothole on Main St", "Sector 4");
        assert_eq!(c.status, ComplaintStatus::Pending);
        assert!(c.assignee.is_none());
        assert!(c.id.starts_with("CMP-"));
        assert_eq!(c.history.len(), 1);
        assert_eq!(c.history[0].kind, EventKind::Created);
        assert_eq!(c.history[0].actor_id, "cit-1");
    }

    #[test]
    fn test_assignee_accessors() {
        let mut c = Complaint::new("cit-1", "Garbage", "Overflowing dumpster", "Central Park");
        assert!(!c.is_assigned_to("off-1"));

        c.assignee = Some(Assignee::Officer("off-1".into()));
        assert_eq!(c.officer_id(), Some("off-1"));
        assert_eq!(c.vendor_id(), None);
        assert!(c.is_assigned_to("off-1"));

        c.assignee = Some(Assignee::Vendor("ven-1".into()));
        assert_eq!(c.vendor_id(), Some("ven-1"));
        assert_eq!(c.officer_id(), None);
        assert!(!c.is_assigned_to("off-1"));
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut c = Complaint::new("cit-1", "Street Light", "Flickering", "Avenue 5");
        c.record("adm-1", EventKind::OfficerAssigned, None);
        c.record("off-1", EventKind::Resolved, Some("replaced bulb".into()));
        let kinds: Vec<_> = c.history.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Created,
                EventKind::OfficerAssigned,
                EventKind::Resolved
            ]
        );
        assert_eq!(c.history[2].note.as_deref(), Some("replaced bulb"));
    }
}
