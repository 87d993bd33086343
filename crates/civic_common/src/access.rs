//! Role-based access gate.
//!
//! One place answers "which complaints can this actor see". Mutation-side
//! role and ownership checks live with the operations in the engine, but
//! they all run against the server-resolved [`Actor`] — nothing a client
//! claims about itself is consulted.

use crate::complaint::Complaint;
use crate::status::ComplaintStatus;
use crate::user::{Actor, Role};

/// Visibility rule per role:
///
/// - citizen: own complaints
/// - officer: complaints assigned to them
/// - vendor: open marketplace jobs plus complaints bound to them
/// - admin: everything
pub fn can_view(actor: &Actor, complaint: &Complaint) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Citizen => complaint.citizen_id == actor.user_id,
        Role::Officer => complaint.officer_id() == Some(actor.user_id.as_str()),
        Role::Vendor => {
            complaint.status == ComplaintStatus::AwaitingQuotes
                || complaint.vendor_id() == Some(actor.user_id.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complaint::Assignee;

    fn complaint(citizen: &str) -> Complaint {
        Complaint::new(citizen, "Garbage", "Overflowing dumpster", "Central Park")
    }

    #[test]
    fn test_citizen_sees_only_own() {
        let c = complaint("cit-1");
        assert!(can_view(&Actor::new("cit-1", Role::Citizen), &c));
        assert!(!can_view(&Actor::new("cit-2", Role::Citizen), &c));
    }

    #[test]
    fn test_officer_sees_only_assigned() {
        let mut c = complaint("cit-1");
        let officer = Actor::new("off-1", Role::Officer);
        assert!(!can_view(&officer, &c));

        c.assignee = Some(Assignee::Officer("off-1".into()));
        c.status = ComplaintStatus::InProgress;
        assert!(can_view(&officer, &c));
        assert!(!can_view(&Actor::new("off-2", Role::Officer), &c));
    }

    #[test]
    fn test_vendor_sees_open_jobs_and_own_work() {
        let mut c = complaint("cit-1");
        let vendor = Actor::new("ven-1", Role::Vendor);

        // Pending is not yet on the marketplace.
        assert!(!can_view(&vendor, &c));

        c.status = ComplaintStatus::AwaitingQuotes;
        assert!(can_view(&vendor, &c));

        // Bound to another vendor: gone from this vendor's view.
        c.status = ComplaintStatus::InProgress;
        c.assignee = Some(Assignee::Vendor("ven-2".into()));
        assert!(!can_view(&vendor, &c));
        assert!(can_view(&Actor::new("ven-2", Role::Vendor), &c));
    }

    #[test]
    fn test_admin_sees_everything() {
        let c = complaint("cit-1");
        assert!(can_view(&Actor::new("adm-1", Role::Admin), &c));
    }
}
