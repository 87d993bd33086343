//! Command implementations: call the daemon API and render the results.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use civic_common::{
    ComplaintStatus, ComplaintView, HealthResponse, ProfileView, QuoteView, Role,
};

use crate::client::ApiClient;

/// Run the status command
pub async fn status(client: &ApiClient) -> Result<()> {
    let health: HealthResponse = client.get("/v1/health").await?;
    println!();
    println!("{}", "  CivicConnect Daemon".bold());
    println!("  Version:  {}", health.version);
    println!("  Status:   {}", health.status.green());
    println!("  Uptime:   {}s", health.uptime_seconds);
    Ok(())
}

/// List complaints, picking the endpoint the account's dashboard would use.
pub async fn complaints(client: &ApiClient) -> Result<()> {
    let me: ProfileView = client.get("/api/profile").await?;
    let endpoint = match me.role {
        Role::Admin => "/api/admin/complaints",
        Role::Officer => "/api/officer/assigned",
        Role::Vendor => "/api/vendor/jobs",
        Role::Citizen => "/api/complaints/my",
    };

    let complaints: Vec<ComplaintView> = client.get(endpoint).await?;
    if complaints.is_empty() {
        println!("No complaints to show.");
        return Ok(());
    }

    println!();
    println!("{}", format!("  Complaints ({})", complaints.len()).bold());
    for c in &complaints {
        println!(
            "  {}  [{}]  {}  {} - {}",
            c.id.bold(),
            status_label(c.status),
            c.created_at.format("%Y-%m-%d"),
            c.category_name,
            c.location.dimmed(),
        );
        if let Some(officer) = &c.officer_name {
            println!("      assigned to {}", officer);
        }
        if let Some(vendor) = &c.vendor_name {
            println!("      handled by {}", vendor);
        }
        if let Some(notes) = &c.resolution_notes {
            println!("      resolution: {}", notes);
        }
    }
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    category: String,
    description: String,
    location: String,
) -> Result<()> {
    let c: ComplaintView = client
        .post(
            "/api/complaints",
            &json!({
                "category": category,
                "description": description,
                "location": location,
            }),
        )
        .await?;
    println!("Complaint {} filed [{}]", c.id.bold(), status_label(c.status));
    Ok(())
}

pub async fn assign(client: &ApiClient, complaint_id: String, officer_id: String) -> Result<()> {
    let c: ComplaintView = client
        .post(
            "/api/admin/assign",
            &json!({ "complaint_id": complaint_id, "officer_id": officer_id }),
        )
        .await?;
    println!(
        "Complaint {} assigned to {} [{}]",
        c.id.bold(),
        c.officer_name.as_deref().unwrap_or(&officer_id),
        status_label(c.status)
    );
    Ok(())
}

pub async fn route_private(client: &ApiClient, complaint_id: String) -> Result<()> {
    let c: ComplaintView = client
        .post(
            "/api/admin/route-private",
            &json!({ "complaint_id": complaint_id }),
        )
        .await?;
    println!(
        "Complaint {} sent to the marketplace [{}]",
        c.id.bold(),
        status_label(c.status)
    );
    Ok(())
}

pub async fn quote(
    client: &ApiClient,
    complaint_id: String,
    price: f64,
    eta: String,
) -> Result<()> {
    let q: QuoteView = client
        .post(
            "/api/vendor/quote",
            &json!({ "complaint_id": complaint_id, "price": price, "estimated_time": eta }),
        )
        .await?;
    println!(
        "Quote {} submitted on {}: ${:.2}, {}",
        q.id.bold(),
        q.complaint_id,
        q.price,
        q.estimated_time
    );
    Ok(())
}

pub async fn quotes(client: &ApiClient, complaint_id: String) -> Result<()> {
    let quotes: Vec<QuoteView> =
        client.get(&format!("/api/complaints/{}/quotes", complaint_id)).await?;
    if quotes.is_empty() {
        println!("No quotes on {} yet.", complaint_id);
        return Ok(());
    }

    println!();
    println!("{}", format!("  Quotes on {}", complaint_id).bold());
    for q in &quotes {
        let marker = if q.approved {
            "approved".green().to_string()
        } else {
            "open".dimmed().to_string()
        };
        println!(
            "  {}  {}  ${:.2}  {}  [{}]",
            q.id.bold(),
            q.business_name.as_deref().unwrap_or(&q.vendor_name),
            q.price,
            q.estimated_time,
            marker
        );
    }
    Ok(())
}

pub async fn approve(client: &ApiClient, complaint_id: String, vendor_id: String) -> Result<()> {
    let c: ComplaintView = client
        .post(
            "/api/citizen/approve-quote",
            &json!({ "complaint_id": complaint_id, "vendor_id": vendor_id }),
        )
        .await?;
    println!(
        "Quote approved; {} is now handled by {} [{}]",
        c.id.bold(),
        c.vendor_name.as_deref().unwrap_or(&vendor_id),
        status_label(c.status)
    );
    Ok(())
}

pub async fn resolve(
    client: &ApiClient,
    complaint_id: String,
    notes: Option<String>,
    proof: Option<String>,
) -> Result<()> {
    let c: ComplaintView = client
        .post(
            "/api/officer/update-status",
            &json!({
                "id": complaint_id,
                "status": ComplaintStatus::Resolved,
                "resolution_notes": notes,
                "proof_notes": proof,
            }),
        )
        .await?;
    println!("Complaint {} [{}]", c.id.bold(), status_label(c.status));
    Ok(())
}

pub async fn verify_vendor(client: &ApiClient, vendor_id: String) -> Result<()> {
    let profile: ProfileView = client
        .post("/api/admin/verify-vendor", &json!({ "vendor_id": vendor_id }))
        .await?;
    println!(
        "Vendor {} ({}) is now {}",
        profile.id.bold(),
        profile.business_name.as_deref().unwrap_or(&profile.name),
        "verified".green()
    );
    Ok(())
}

pub async fn profile(
    client: &ApiClient,
    name: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let me: ProfileView = client.get("/api/profile").await?;

    let me = if name.is_some() || phone.is_some() {
        client
            .post(
                "/api/profile",
                &json!({
                    "name": name.unwrap_or_else(|| me.name.clone()),
                    "phone": phone.unwrap_or_else(|| me.phone.clone()),
                }),
            )
            .await?
    } else {
        me
    };

    println!();
    println!("{}", format!("  {}", me.name).bold());
    println!("  Role:   {}", me.role);
    println!("  Email:  {}", me.email);
    if !me.phone.is_empty() {
        println!("  Phone:  {}", me.phone);
    }
    if let Some(business) = &me.business_name {
        let verified = if me.verified.unwrap_or(false) {
            "verified".green().to_string()
        } else {
            "unverified".yellow().to_string()
        };
        println!("  Business: {} ({})", business, verified);
    }
    Ok(())
}

fn status_label(status: ComplaintStatus) -> String {
    match status {
        ComplaintStatus::Pending => status.as_str().yellow().to_string(),
        ComplaintStatus::AwaitingQuotes => status.as_str().magenta().to_string(),
        ComplaintStatus::InProgress => status.as_str().cyan().to_string(),
        ComplaintStatus::Resolved => status.as_str().green().to_string(),
    }
}
