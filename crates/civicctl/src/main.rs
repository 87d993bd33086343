//! Civic Control - CLI client for the CivicConnect daemon
//!
//! Lets citizens, admins, officers, and vendors drive the complaint
//! lifecycle from a terminal.

mod cli;
mod client;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::client::ApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url.as_deref(), cli.token.as_deref());

    match cli.command {
        Commands::Status => commands::status(&client).await,
        Commands::Complaints => commands::complaints(&client).await,
        Commands::Create {
            category,
            description,
            location,
        } => commands::create(&client, category, description, location).await,
        Commands::Assign {
            complaint_id,
            officer_id,
        } => commands::assign(&client, complaint_id, officer_id).await,
        Commands::RoutePrivate { complaint_id } => {
            commands::route_private(&client, complaint_id).await
        }
        Commands::Quote {
            complaint_id,
            price,
            eta,
        } => commands::quote(&client, complaint_id, price, eta).await,
        Commands::Quotes { complaint_id } => commands::quotes(&client, complaint_id).await,
        Commands::Approve {
            complaint_id,
            vendor_id,
        } => commands::approve(&client, complaint_id, vendor_id).await,
        Commands::Resolve {
            complaint_id,
            notes,
            proof,
        } => commands::resolve(&client, complaint_id, notes, proof).await,
        Commands::VerifyVendor { vendor_id } => commands::verify_vendor(&client, vendor_id).await,
        Commands::Profile { name, phone } => commands::profile(&client, name, phone).await,
    }
}
