//! User directory and bearer session resolution.
//!
//! Credential issuance (login, passwords, registration) is handled by the
//! identity service in front of the daemon; the directory only maps
//! provisioned opaque tokens to known accounts.

use std::collections::HashMap;

use crate::error::{CivicError, CivicResult};
use crate::user::{Actor, User};

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
    /// Bearer token -> user id.
    sessions: HashMap<String, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&mut self, user: User) -> CivicResult<()> {
        if user.id.is_empty() {
            return Err(CivicError::Validation("user id must not be empty".into()));
        }
        if self.users.contains_key(&user.id) {
            return Err(CivicError::Validation(format!(
                "duplicate user id {}",
                user.id
            )));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Provision a session token for an existing account.
    pub fn register_session(
        &mut self,
        token: impl Into<String>,
        user_id: &str,
    ) -> CivicResult<()> {
        if !self.users.contains_key(user_id) {
            return Err(CivicError::NotFound(format!("user {}", user_id)));
        }
        self.sessions.insert(token.into(), user_id.to_string());
        Ok(())
    }

    /// Resolve a bearer token to the acting identity.
    pub fn resolve_token(&self, token: &str) -> CivicResult<Actor> {
        let user_id = self
            .sessions
            .get(token)
            .ok_or_else(|| CivicError::Forbidden("invalid or expired credential".into()))?;
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| CivicError::Forbidden("invalid or expired credential".into()))?;
        Ok(user.actor())
    }

    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn get_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.get_mut(user_id)
    }

    /// Display name for joined views; falls back to the raw id for
    /// accounts that have since disappeared from the roster.
    pub fn display_name(&self, user_id: &str) -> String {
        self.users
            .get(user_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| user_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.into(),
            role,
            name: format!("{} name", id),
            email: format!("{}@example.com", id),
            phone: String::new(),
            vendor: None,
        }
    }

    #[test]
    fn test_resolve_token_roundtrip() {
        let mut dir = UserDirectory::new();
        dir.insert_user(user("cit-1", Role::Citizen)).unwrap();
        dir.register_session("tok-abc", "cit-1").unwrap();

        let actor = dir.resolve_token("tok-abc").unwrap();
        assert_eq!(actor.user_id, "cit-1");
        assert_eq!(actor.role, Role::Citizen);
    }

    #[test]
    fn test_unknown_token_is_forbidden() {
        let dir = UserDirectory::new();
        let err = dir.resolve_token("nope").unwrap_err();
        assert_eq!(err.kind(), "forbidden");
    }

    #[test]
    fn test_session_requires_existing_user() {
        let mut dir = UserDirectory::new();
        let err = dir.register_session("tok", "ghost").unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let mut dir = UserDirectory::new();
        dir.insert_user(user("u1", Role::Citizen)).unwrap();
        let err = dir.insert_user(user("u1", Role::Admin)).unwrap_err();
        assert_eq!(err.kind(), "validation");
    }
}
