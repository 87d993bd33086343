//! API routes for civicd
//!
//! Paths mirror what the browser dashboards call (`/api/complaints/my`,
//! `/api/admin/assign`, `/api/officer/update-status`, ...). Every handler
//! resolves the bearer credential to an [`Actor`] first and hands that to
//! the engine; role and ownership are never taken from the request body.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use civic_common::{
    ApiResponse, ApproveQuoteRequest, AssignOfficerRequest, CivicError, ComplaintStats,
    ComplaintView, CreateComplaintRequest, HealthResponse, NewComplaint, ProfileView, QuoteView,
    Role, RoutePrivateRequest, SubmitQuoteRequest, UpdateProfileRequest, UpdateStatusRequest,
    VerifyVendorRequest,
};

use crate::server::AppState;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Failure mapping
// ============================================================================

/// A domain error dressed in the response envelope with its HTTP status.
pub struct ApiFailure(StatusCode, Json<ApiResponse<serde_json::Value>>);

impl From<CivicError> for ApiFailure {
    fn from(err: CivicError) -> Self {
        ApiFailure(status_for(&err), Json(ApiResponse::failure(&err)))
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

pub fn status_for(err: &CivicError) -> StatusCode {
    match err {
        CivicError::Validation(_) => StatusCode::BAD_REQUEST,
        CivicError::Forbidden(_) => StatusCode::FORBIDDEN,
        CivicError::NotFound(_) => StatusCode::NOT_FOUND,
        CivicError::DuplicateQuote(_) | CivicError::InvalidTransition(_) => StatusCode::CONFLICT,
    }
}

fn authenticate(
    engine: &civic_common::DispatchEngine,
    headers: &HeaderMap,
) -> Result<civic_common::Actor, ApiFailure> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            ApiFailure::from(CivicError::Forbidden("missing bearer credential".into()))
        })?;
    engine.directory().resolve_token(token).map_err(ApiFailure::from)
}

// ============================================================================
// Complaint Routes
// ============================================================================

pub fn complaint_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/complaints", post(create_complaint))
        .route("/api/complaints/my", get(my_complaints))
        .route("/api/complaints/:id/quotes", get(complaint_quotes))
        .route("/api/citizen/approve-quote", post(approve_quote))
}

async fn create_complaint(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<CreateComplaintRequest>,
) -> Result<Json<ApiResponse<ComplaintView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let complaint = engine.create_complaint(
        &actor,
        NewComplaint {
            category: req.category,
            description: req.description,
            location: req.location,
        },
    )?;
    info!("  Complaint {} created", complaint.id);
    let view = ComplaintView::project(&complaint, engine.directory());
    Ok(Json(ApiResponse::ok(view)))
}

async fn my_complaints(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<ComplaintView>>>, ApiFailure> {
    let engine = state.engine.read().await;
    let actor = authenticate(&engine, &headers)?;
    let views = engine
        .list_complaints(&actor)
        .iter()
        .map(|c| ComplaintView::project(c, engine.directory()))
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn complaint_quotes(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<QuoteView>>>, ApiFailure> {
    let engine = state.engine.read().await;
    let actor = authenticate(&engine, &headers)?;
    let views = engine
        .list_quotes(&actor, &id)?
        .iter()
        .map(|q| QuoteView::project(q, engine.directory()))
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn approve_quote(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<ApproveQuoteRequest>,
) -> Result<Json<ApiResponse<ComplaintView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let complaint = engine.approve_quote(&actor, &req.complaint_id, &req.vendor_id)?;
    let view = ComplaintView::project(&complaint, engine.directory());
    Ok(Json(ApiResponse::ok(view)))
}

// ============================================================================
// Admin Routes
// ============================================================================

pub fn admin_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/admin/complaints", get(all_complaints))
        .route("/api/admin/stats", get(complaint_stats))
        .route("/api/admin/assign", post(assign_officer))
        .route("/api/admin/route-private", post(route_private))
        .route("/api/admin/verify-vendor", post(verify_vendor))
}

async fn all_complaints(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<ComplaintView>>>, ApiFailure> {
    let engine = state.engine.read().await;
    let actor = authenticate(&engine, &headers)?;
    actor.require_role(Role::Admin)?;
    let views = engine
        .list_complaints(&actor)
        .iter()
        .map(|c| ComplaintView::project(c, engine.directory()))
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn complaint_stats(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<ComplaintStats>>, ApiFailure> {
    let engine = state.engine.read().await;
    let actor = authenticate(&engine, &headers)?;
    let stats = engine.stats(&actor)?;
    Ok(Json(ApiResponse::ok(stats)))
}

async fn assign_officer(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<AssignOfficerRequest>,
) -> Result<Json<ApiResponse<ComplaintView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let complaint = engine.route_to_government(&actor, &req.complaint_id, &req.officer_id)?;
    info!(
        "  Complaint {} assigned to officer {}",
        req.complaint_id, req.officer_id
    );
    let view = ComplaintView::project(&complaint, engine.directory());
    Ok(Json(ApiResponse::ok(view)))
}

async fn route_private(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<RoutePrivateRequest>,
) -> Result<Json<ApiResponse<ComplaintView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let complaint = engine.route_to_private(&actor, &req.complaint_id)?;
    info!("  Complaint {} sent to marketplace", req.complaint_id);
    let view = ComplaintView::project(&complaint, engine.directory());
    Ok(Json(ApiResponse::ok(view)))
}

async fn verify_vendor(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<VerifyVendorRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let user = engine.verify_vendor(&actor, &req.vendor_id)?;
    Ok(Json(ApiResponse::ok(ProfileView::from(&user))))
}

// ============================================================================
// Officer Routes
// ============================================================================

pub fn officer_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/officer/assigned", get(assigned_complaints))
        // Assigned vendors post here too; the engine checks the binding,
        // not the path.
        .route("/api/officer/update-status", post(update_status))
}

async fn assigned_complaints(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<ComplaintView>>>, ApiFailure> {
    let engine = state.engine.read().await;
    let actor = authenticate(&engine, &headers)?;
    actor.require_role(Role::Officer)?;
    let views = engine
        .list_complaints(&actor)
        .iter()
        .map(|c| ComplaintView::project(c, engine.directory()))
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn update_status(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<ComplaintView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let complaint = engine.update_status(
        &actor,
        &req.id,
        req.status,
        req.resolution_notes,
        req.proof_notes,
    )?;
    info!("  Complaint {} moved to {}", req.id, complaint.status);
    let view = ComplaintView::project(&complaint, engine.directory());
    Ok(Json(ApiResponse::ok(view)))
}

// ============================================================================
// Vendor Routes
// ============================================================================

pub fn vendor_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/vendor/jobs", get(vendor_jobs))
        .route("/api/vendor/quote", post(submit_quote))
}

async fn vendor_jobs(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<ComplaintView>>>, ApiFailure> {
    let engine = state.engine.read().await;
    let actor = authenticate(&engine, &headers)?;
    actor.require_role(Role::Vendor)?;
    let views = engine
        .list_complaints(&actor)
        .iter()
        .map(|c| ComplaintView::project(c, engine.directory()))
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn submit_quote(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<SubmitQuoteRequest>,
) -> Result<Json<ApiResponse<QuoteView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let quote = engine.submit_quote(&actor, &req.complaint_id, req.price, &req.estimated_time)?;
    info!("  Quote {} submitted on {}", quote.id, req.complaint_id);
    let view = QuoteView::project(&quote, engine.directory());
    Ok(Json(ApiResponse::ok(view)))
}

// ============================================================================
// Profile Routes
// ============================================================================

pub fn profile_routes() -> Router<AppStateArc> {
    Router::new().route("/api/profile", get(get_profile).post(update_profile))
}

async fn get_profile(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<ProfileView>>, ApiFailure> {
    let engine = state.engine.read().await;
    let actor = authenticate(&engine, &headers)?;
    let user = engine.profile(&actor)?;
    Ok(Json(ApiResponse::ok(ProfileView::from(&user))))
}

async fn update_profile(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, ApiFailure> {
    let mut engine = state.engine.write().await;
    let actor = authenticate(&engine, &headers)?;
    let user = engine.update_profile(&actor, &req.name, &req.phone)?;
    Ok(Json(ApiResponse::ok(ProfileView::from(&user))))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

async fn health(State(state): State<AppStateArc>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_for(&CivicError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&CivicError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&CivicError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&CivicError::DuplicateQuote("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&CivicError::InvalidTransition("x".into())),
            StatusCode::CONFLICT
        );
    }
}
