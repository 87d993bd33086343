//! Daemon configuration.
//!
//! Configuration lives in /etc/civicconnect/config.toml (overridable with
//! $CIVICD_CONFIG). The account roster and each account's bearer token are
//! provisioned here; credential issuance itself (login, passwords,
//! registration) belongs to the identity service in front of the daemon.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use civic_common::{CivicResult, Role, User, UserDirectory, VendorProfile, DEFAULT_API_ADDR};

/// System configuration directory
pub const SYSTEM_CONFIG_DIR: &str = "/etc/civicconnect";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Address the HTTP API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Provisioned accounts with their session tokens.
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            users: Vec::new(),
        }
    }
}

/// One `[[users]]` entry from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    /// Opaque bearer token this account authenticates with.
    pub token: String,

    // Vendor-only fields.
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl DaemonConfig {
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("CIVICD_CONFIG") {
            return PathBuf::from(path);
        }
        Path::new(SYSTEM_CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load from the default path; a missing or unreadable file falls back
    /// to defaults so the daemon still comes up for inspection.
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Could not load {} ({e:#}), using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Build the user directory and session table from the roster.
    pub fn build_directory(&self) -> CivicResult<UserDirectory> {
        let mut directory = UserDirectory::new();
        for seed in &self.users {
            let vendor = if seed.role == Role::Vendor {
                Some(VendorProfile {
                    business_name: seed.business_name.clone().unwrap_or_default(),
                    service_type: seed.service_type.clone().unwrap_or_default(),
                    verified: seed.verified,
                })
            } else {
                None
            };
            directory.insert_user(User {
                id: seed.id.clone(),
                role: seed.role,
                name: seed.name.clone(),
                email: seed.email.clone(),
                phone: seed.phone.clone(),
                vendor,
            })?;
            directory.register_session(seed.token.clone(), &seed.id)?;
        }
        Ok(directory)
    }
}

fn default_bind_addr() -> String {
    DEFAULT_API_ADDR.to_string()
}
