//! Wire types shared by the daemon and its clients.
//!
//! Every response uses the `{success, data?, message?}` envelope the
//! browser dashboards consume. Failures additionally carry the stable
//! `error` kind from [`CivicError::kind`] so callers can branch without
//! parsing prose.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::complaint::Complaint;
use crate::directory::UserDirectory;
use crate::error::CivicError;
use crate::quote::Quote;
use crate::status::ComplaintStatus;
use crate::user::{Role, User};

/// Uniform response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failure(err: &CivicError) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(err.to_string()),
            error: Some(err.kind().to_string()),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComplaintRequest {
    pub category: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignOfficerRequest {
    pub complaint_id: String,
    pub officer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePrivateRequest {
    pub complaint_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuoteRequest {
    pub complaint_id: String,
    pub price: f64,
    pub estimated_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveQuoteRequest {
    pub complaint_id: String,
    pub vendor_id: String,
}

/// Status update as the officer dashboard posts it: the target status plus
/// optional resolution and proof notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub id: String,
    pub status: ComplaintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyVendorRequest {
    pub vendor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

// ============================================================================
// Views
// ============================================================================

/// Complaint row as the dashboards render it, with account names joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintView {
    pub id: String,
    pub citizen_id: String,
    pub citizen_name: String,
    pub category_name: String,
    pub description: String,
    pub location: String,
    pub status: ComplaintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ComplaintView {
    pub fn project(complaint: &Complaint, directory: &UserDirectory) -> Self {
        Self {
            id: complaint.id.clone(),
            citizen_id: complaint.citizen_id.clone(),
            citizen_name: directory.display_name(&complaint.citizen_id),
            category_name: complaint.category.clone(),
            description: complaint.description.clone(),
            location: complaint.location.clone(),
            status: complaint.status,
            officer_id: complaint.officer_id().map(str::to_string),
            officer_name: complaint.officer_id().map(|id| directory.display_name(id)),
            vendor_id: complaint.vendor_id().map(str::to_string),
            vendor_name: complaint.vendor_id().map(|id| directory.display_name(id)),
            resolution_notes: complaint.resolution_notes.clone(),
            proof_notes: complaint.proof_notes.clone(),
            created_at: complaint.created_at,
        }
    }
}

/// Quote row with the vendor's display and business names joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteView {
    pub id: String,
    pub complaint_id: String,
    pub vendor_id: String,
    pub vendor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    pub price: f64,
    pub estimated_time: String,
    pub approved: bool,
    pub submitted_at: DateTime<Utc>,
}

impl QuoteView {
    pub fn project(quote: &Quote, directory: &UserDirectory) -> Self {
        let business_name = directory
            .get(&quote.vendor_id)
            .and_then(|u| u.vendor.as_ref())
            .map(|v| v.business_name.clone());
        Self {
            id: quote.id.clone(),
            complaint_id: quote.complaint_id.clone(),
            vendor_id: quote.vendor_id.clone(),
            vendor_name: directory.display_name(&quote.vendor_id),
            business_name,
            price: quote.price,
            estimated_time: quote.estimated_time.clone(),
            approved: quote.approved,
            submitted_at: quote.submitted_at,
        }
    }
}

/// Account details for the profile page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            business_name: user.vendor.as_ref().map(|v| v.business_name.clone()),
            service_type: user.vendor.as_ref().map(|v| v.service_type.clone()),
            verified: user.vendor.as_ref().map(|v| v.verified),
        }
    }
}

/// Daemon liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
