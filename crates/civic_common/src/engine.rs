//! Complaint lifecycle and dispatch engine.
//!
//! Owns the shared complaint/quote store and the user directory, and applies
//! every mutation as a compare-and-set against the complaint's current
//! status. Callers hold the engine behind one lock, so two admins racing to
//! route the same `Pending` complaint, or two approvals landing on the same
//! marketplace job, serialize here: the loser fails its precondition and
//! nothing is mutated. A retried mutation fails the same way instead of
//! silently applying twice.

use std::collections::HashMap;

use tracing::info;

use crate::access::can_view;
use crate::complaint::{Assignee, Complaint, EventKind};
use crate::directory::UserDirectory;
use crate::error::{CivicError, CivicResult};
use crate::quote::Quote;
use crate::status::ComplaintStatus;
use crate::user::{Actor, Role, User};

/// Fields a citizen supplies when filing a complaint.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub category: String,
    pub description: String,
    pub location: String,
}

/// Per-status complaint counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplaintStats {
    pub total: usize,
    pub pending: usize,
    pub awaiting_quotes: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

pub struct DispatchEngine {
    directory: UserDirectory,
    complaints: HashMap<String, Complaint>,
    /// Insertion order, for stable listings.
    order: Vec<String>,
    /// All quotes ever submitted, in submission order.
    quotes: Vec<Quote>,
}

impl DispatchEngine {
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory,
            complaints: HashMap::new(),
            order: Vec::new(),
            quotes: Vec::new(),
        }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    // ========================================================================
    // Complaints
    // ========================================================================

    /// File a new complaint. Citizen only; all fields required.
    pub fn create_complaint(&mut self, actor: &Actor, req: NewComplaint) -> CivicResult<Complaint> {
        actor.require_role(Role::Citizen)?;
        for (field, value) in [
            ("category", &req.category),
            ("description", &req.description),
            ("location", &req.location),
        ] {
            if value.trim().is_empty() {
                return Err(CivicError::Validation(format!("{} must not be empty", field)));
            }
        }

        let complaint = Complaint::new(&actor.user_id, req.category, req.description, req.location);
        info!("Complaint {} filed by {}", complaint.id, actor.user_id);
        self.order.push(complaint.id.clone());
        self.complaints
            .insert(complaint.id.clone(), complaint.clone());
        Ok(complaint)
    }

    /// Complaints visible to the actor, oldest first.
    pub fn list_complaints(&self, actor: &Actor) -> Vec<Complaint> {
        self.order
            .iter()
            .filter_map(|id| self.complaints.get(id))
            .filter(|c| can_view(actor, c))
            .cloned()
            .collect()
    }

    /// A single complaint, subject to the same visibility rule as listings.
    pub fn get_complaint(&self, actor: &Actor, complaint_id: &str) -> CivicResult<Complaint> {
        let complaint = self.require_complaint(complaint_id)?;
        if !can_view(actor, complaint) {
            return Err(CivicError::Forbidden(format!(
                "complaint {} is not visible to {}",
                complaint_id, actor.user_id
            )));
        }
        Ok(complaint.clone())
    }

    /// Per-status counts across the whole store. Admin only.
    pub fn stats(&self, actor: &Actor) -> CivicResult<ComplaintStats> {
        actor.require_role(Role::Admin)?;
        let mut stats = ComplaintStats::default();
        for complaint in self.complaints.values() {
            stats.total += 1;
            match complaint.status {
                ComplaintStatus::Pending => stats.pending += 1,
                ComplaintStatus::AwaitingQuotes => stats.awaiting_quotes += 1,
                ComplaintStatus::InProgress => stats.in_progress += 1,
                ComplaintStatus::Resolved => stats.resolved += 1,
            }
        }
        Ok(stats)
    }

    // ========================================================================
    // Dispatch routing
    // ========================================================================

    /// Assign a government officer to a `Pending` complaint.
    ///
    /// Admin only. The complaint enters `In Progress` owned by the officer;
    /// a re-attempt (or routing after `route_to_private`) fails the status
    /// compare-and-set.
    pub fn route_to_government(
        &mut self,
        actor: &Actor,
        complaint_id: &str,
        officer_id: &str,
    ) -> CivicResult<Complaint> {
        actor.require_role(Role::Admin)?;
        let officer = self
            .directory
            .get(officer_id)
            .ok_or_else(|| CivicError::NotFound(format!("user {}", officer_id)))?;
        if officer.role != Role::Officer {
            return Err(CivicError::Validation(format!(
                "user {} is not an officer",
                officer_id
            )));
        }

        let complaint = self.require_complaint_mut(complaint_id)?;
        if complaint.status != ComplaintStatus::Pending {
            return Err(CivicError::InvalidTransition(format!(
                "cannot assign an officer to a complaint in status {}",
                complaint.status
            )));
        }

        complaint.assignee = Some(Assignee::Officer(officer_id.to_string()));
        complaint.status = ComplaintStatus::InProgress;
        complaint.record(&actor.user_id, EventKind::OfficerAssigned, None);
        info!(
            "Complaint {} assigned to officer {} by {}",
            complaint_id, officer_id, actor.user_id
        );
        Ok(complaint.clone())
    }

    /// Route a `Pending` complaint to the private vendor marketplace.
    ///
    /// Admin only. The complaint enters `Awaiting Quotes` with no assignee.
    pub fn route_to_private(&mut self, actor: &Actor, complaint_id: &str) -> CivicResult<Complaint> {
        actor.require_role(Role::Admin)?;

        let complaint = self.require_complaint_mut(complaint_id)?;
        if complaint.status != ComplaintStatus::Pending {
            return Err(CivicError::InvalidTransition(format!(
                "cannot send a complaint in status {} to the marketplace",
                complaint.status
            )));
        }

        complaint.status = ComplaintStatus::AwaitingQuotes;
        complaint.record(&actor.user_id, EventKind::SentToMarketplace, None);
        info!(
            "Complaint {} sent to marketplace by {}",
            complaint_id, actor.user_id
        );
        Ok(complaint.clone())
    }

    // ========================================================================
    // Quote marketplace
    // ========================================================================

    /// Submit a bid on a marketplace job.
    ///
    /// Vendor only; the complaint must be `Awaiting Quotes` and the vendor
    /// must not already have an open quote on it.
    pub fn submit_quote(
        &mut self,
        actor: &Actor,
        complaint_id: &str,
        price: f64,
        estimated_time: &str,
    ) -> CivicResult<Quote> {
        actor.require_role(Role::Vendor)?;
        if !price.is_finite() || price <= 0.0 {
            return Err(CivicError::Validation("price must be positive".into()));
        }
        if estimated_time.trim().is_empty() {
            return Err(CivicError::Validation(
                "estimated_time must not be empty".into(),
            ));
        }

        let complaint = self.require_complaint(complaint_id)?;
        if complaint.status != ComplaintStatus::AwaitingQuotes {
            return Err(CivicError::InvalidTransition(format!(
                "cannot quote a complaint in status {}",
                complaint.status
            )));
        }
        let duplicate = self.quotes.iter().any(|q| {
            q.complaint_id == complaint_id && q.vendor_id == actor.user_id && !q.approved
        });
        if duplicate {
            return Err(CivicError::DuplicateQuote(format!(
                "vendor {} already has an open quote on {}",
                actor.user_id, complaint_id
            )));
        }

        let quote = Quote::new(complaint_id, &actor.user_id, price, estimated_time);
        self.quotes.push(quote.clone());
        let complaint = self.require_complaint_mut(complaint_id)?;
        complaint.record(&actor.user_id, EventKind::QuoteSubmitted, None);
        info!(
            "Quote {} submitted on {} by {}",
            quote.id, complaint_id, actor.user_id
        );
        Ok(quote)
    }

    /// Quotes for a complaint, in submission order.
    ///
    /// The owning citizen and admins see all of them; a vendor sees only
    /// its own submissions. Officers are not marketplace participants.
    pub fn list_quotes(&self, actor: &Actor, complaint_id: &str) -> CivicResult<Vec<Quote>> {
        let complaint = self.require_complaint(complaint_id)?;
        match actor.role {
            Role::Admin => {}
            Role::Citizen => {
                if complaint.citizen_id != actor.user_id {
                    return Err(CivicError::Forbidden(format!(
                        "complaint {} is not owned by {}",
                        complaint_id, actor.user_id
                    )));
                }
            }
            Role::Vendor => {}
            Role::Officer => {
                return Err(CivicError::Forbidden(
                    "officers do not participate in the quote marketplace".into(),
                ));
            }
        }

        Ok(self
            .quotes
            .iter()
            .filter(|q| q.complaint_id == complaint_id)
            .filter(|q| actor.role != Role::Vendor || q.vendor_id == actor.user_id)
            .cloned()
            .collect())
    }

    /// Approve one vendor's quote and bind the complaint to that vendor.
    ///
    /// Owning citizen only; the complaint must still be `Awaiting Quotes`
    /// (the second approval on a job loses the compare-and-set and the
    /// already-bound vendor is untouched). Sibling quotes stay unapproved
    /// but are retained for audit.
    pub fn approve_quote(
        &mut self,
        actor: &Actor,
        complaint_id: &str,
        vendor_id: &str,
    ) -> CivicResult<Complaint> {
        actor.require_role(Role::Citizen)?;
        let complaint = self.require_complaint(complaint_id)?;
        if complaint.citizen_id != actor.user_id {
            return Err(CivicError::Forbidden(format!(
                "complaint {} is not owned by {}",
                complaint_id, actor.user_id
            )));
        }
        if complaint.status != ComplaintStatus::AwaitingQuotes {
            return Err(CivicError::InvalidTransition(format!(
                "cannot approve a quote on a complaint in status {}",
                complaint.status
            )));
        }

        let quote = self
            .quotes
            .iter_mut()
            .find(|q| q.complaint_id == complaint_id && q.vendor_id == vendor_id && !q.approved)
            .ok_or_else(|| {
                CivicError::NotFound(format!(
                    "no open quote from vendor {} on {}",
                    vendor_id, complaint_id
                ))
            })?;
        quote.approved = true;

        let complaint = self.require_complaint_mut(complaint_id)?;
        complaint.assignee = Some(Assignee::Vendor(vendor_id.to_string()));
        complaint.status = ComplaintStatus::InProgress;
        complaint.record(&actor.user_id, EventKind::QuoteApproved, None);
        info!(
            "Quote from {} approved on {} by {}",
            vendor_id, complaint_id, actor.user_id
        );
        Ok(complaint.clone())
    }

    // ========================================================================
    // Status updates
    // ========================================================================

    /// Move a complaint to a new status.
    ///
    /// The only status change expressible here is resolution: routing
    /// decisions carry extra state (an officer, a winning quote) and go
    /// through their own operations. Resolution is restricted to the
    /// assigned officer or bound vendor, who may attach resolution and
    /// proof notes.
    pub fn update_status(
        &mut self,
        actor: &Actor,
        complaint_id: &str,
        new_status: ComplaintStatus,
        resolution_notes: Option<String>,
        proof_notes: Option<String>,
    ) -> CivicResult<Complaint> {
        let complaint = self.require_complaint(complaint_id)?;

        if new_status != ComplaintStatus::Resolved
            || !complaint.status.may_transition_to(new_status)
        {
            return Err(CivicError::InvalidTransition(format!(
                "cannot move a complaint from {} to {}",
                complaint.status, new_status
            )));
        }
        if !complaint.is_assigned_to(&actor.user_id) {
            return Err(CivicError::Forbidden(format!(
                "complaint {} is not assigned to {}",
                complaint_id, actor.user_id
            )));
        }

        let note = resolution_notes.clone();
        let complaint = self.require_complaint_mut(complaint_id)?;
        complaint.status = ComplaintStatus::Resolved;
        complaint.resolution_notes = resolution_notes;
        complaint.proof_notes = proof_notes;
        complaint.record(&actor.user_id, EventKind::Resolved, note);
        info!("Complaint {} resolved by {}", complaint_id, actor.user_id);
        Ok(complaint.clone())
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// The actor's own account record.
    pub fn profile(&self, actor: &Actor) -> CivicResult<User> {
        self.directory
            .get(&actor.user_id)
            .cloned()
            .ok_or_else(|| CivicError::NotFound(format!("user {}", actor.user_id)))
    }

    /// Update the actor's own contact fields. Role and email stay fixed.
    pub fn update_profile(
        &mut self,
        actor: &Actor,
        name: &str,
        phone: &str,
    ) -> CivicResult<User> {
        if name.trim().is_empty() {
            return Err(CivicError::Validation("name must not be empty".into()));
        }
        let user = self
            .directory
            .get_mut(&actor.user_id)
            .ok_or_else(|| CivicError::NotFound(format!("user {}", actor.user_id)))?;
        user.name = name.trim().to_string();
        user.phone = phone.trim().to_string();
        Ok(user.clone())
    }

    /// Mark a vendor account as verified. Admin only, idempotent.
    pub fn verify_vendor(&mut self, actor: &Actor, vendor_id: &str) -> CivicResult<User> {
        actor.require_role(Role::Admin)?;
        let user = self
            .directory
            .get_mut(vendor_id)
            .ok_or_else(|| CivicError::NotFound(format!("user {}", vendor_id)))?;
        let profile = user.vendor.as_mut().ok_or_else(|| {
            CivicError::Validation(format!("user {} is not a vendor", vendor_id))
        })?;
        profile.verified = true;
        info!("Vendor {} verified by {}", vendor_id, actor.user_id);
        Ok(user.clone())
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn require_complaint(&self, complaint_id: &str) -> CivicResult<&Complaint> {
        self.complaints
            .get(complaint_id)
            .ok_or_else(|| CivicError::NotFound(format!("complaint {}", complaint_id)))
    }

    fn require_complaint_mut(&mut self, complaint_id: &str) -> CivicResult<&mut Complaint> {
        self.complaints
            .get_mut(complaint_id)
            .ok_or_else(|| CivicError::NotFound(format!("complaint {}", complaint_id)))
    }
}
