//! Identity entity - who is logged in, as derived from the bearer token

use super::UserType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded, user-facing view of the current user.
///
/// Built from unverified token claims: good enough to personalise the UI and
/// choose which views to show, never a substitute for the backend's own
/// authorization.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: Option<String>,
    pub name: Option<String>,
    /// Taken from the `sub` claim
    pub email: Option<String>,
    pub user_type: Option<UserType>,
    pub phone: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// True when the identity carries one of `allowed` as its role.
    /// An identity without a role matches nothing.
    pub fn has_role(&self, allowed: &[UserType]) -> bool {
        self.user_type
            .as_ref()
            .is_some_and(|role| allowed.contains(role))
    }

    /// Whether the `exp` claim lies in the past. Display only: the backend
    /// decides whether a token is still accepted.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}
