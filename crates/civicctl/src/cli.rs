//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap. Keeps argument parsing separate
//! from execution logic.

use clap::{Parser, Subcommand};

/// CivicConnect CLI
#[derive(Parser)]
#[command(name = "civicctl")]
#[command(about = "CivicConnect - civic complaint tracking and dispatch", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Daemon API base URL (overrides $CIVICD_API_URL and the default)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token to authenticate with (overrides $CIVICD_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show daemon health
    Status,

    /// List complaints visible to this account
    Complaints,

    /// File a new complaint (citizen)
    Create {
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
    },

    /// Assign a government officer to a pending complaint (admin)
    Assign {
        complaint_id: String,
        officer_id: String,
    },

    /// Send a pending complaint to the vendor marketplace (admin)
    RoutePrivate { complaint_id: String },

    /// Bid on a marketplace job (vendor)
    Quote {
        complaint_id: String,
        price: f64,
        /// Estimated time to complete, e.g. "2 days"
        #[arg(long, default_value = "1 day")]
        eta: String,
    },

    /// List quotes on a complaint
    Quotes { complaint_id: String },

    /// Approve a vendor's quote (owning citizen)
    Approve {
        complaint_id: String,
        vendor_id: String,
    },

    /// Mark an assigned complaint resolved
    Resolve {
        complaint_id: String,
        /// Resolution notes shown to the reporting citizen
        #[arg(long)]
        notes: Option<String>,
        /// Proof of completion (photo reference, receipt, ...)
        #[arg(long)]
        proof: Option<String>,
    },

    /// Mark a vendor account verified (admin)
    VerifyVendor { vendor_id: String },

    /// Show the account profile, or update it with --name/--phone
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}
