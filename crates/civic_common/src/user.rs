//! User accounts, roles, and the authenticated actor.

use serde::{Deserialize, Serialize};

use crate::error::{CivicError, CivicResult};

/// The four participant roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Officer,
    Admin,
    Vendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Officer => "officer",
            Role::Admin => "admin",
            Role::Vendor => "vendor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated identity attached to every engine operation.
///
/// Always derived server-side from the bearer credential. Role and id
/// claimed by a client are never trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn require_role(&self, role: Role) -> CivicResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(CivicError::Forbidden(format!(
                "{} role required, caller is {}",
                role, self.role
            )))
        }
    }
}

/// Marketplace profile carried by vendor accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProfile {
    pub business_name: String,
    pub service_type: String,
    /// Set only by an admin through vendor verification.
    #[serde(default)]
    pub verified: bool,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Present only for `Role::Vendor` accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorProfile>,
}

impl User {
    pub fn actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role)
    }
}
