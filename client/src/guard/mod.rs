//! Guard module - role-gated access to protected views
//!
//! [`RouteGuard::decide`] is a pure function of the session snapshot, the
//! guard's allow-list and the requested location. The caller performs the
//! navigation it returns. Denials are ordinary outcomes, not errors.
//!
//! The allow-list is a navigation convenience built on unverified token
//! claims. The backend still enforces roles on every request.

pub mod routes;

use crate::entities::UserType;
use crate::session::SessionState;
use tracing::{debug, instrument};

pub use routes::RouteTable;

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/";

/// Why a guard sent the user elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Nobody is logged in
    Unauthenticated,
    /// The identity's role is not on the allow-list
    Forbidden,
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hydration still running: show a neutral waiting state, decide later
    Pending,
    /// Show the protected view
    Render,
    /// Navigate to `to`. `from` carries the requested location when the user
    /// should come back to it after logging in.
    Redirect {
        to: String,
        from: Option<String>,
        reason: RedirectReason,
    },
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }
}

/// Gate in front of a protected view
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGuard {
    allowed: Vec<UserType>,
    login_path: String,
    unauthorized_path: String,
}

impl RouteGuard {
    pub fn new(allowed: impl IntoIterator<Item = UserType>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            unauthorized_path: DEFAULT_UNAUTHORIZED_PATH.to_string(),
        }
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_unauthorized_path(mut self, path: impl Into<String>) -> Self {
        self.unauthorized_path = path.into();
        self
    }

    pub fn allowed(&self) -> &[UserType] {
        &self.allowed
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn unauthorized_path(&self) -> &str {
        &self.unauthorized_path
    }

    /// Decides whether `requested` may be rendered for the given session.
    ///
    /// # Returns
    /// * `Pending` - while the session is loading; never a redirect
    /// * `Redirect` to the login path with `from = requested` - no identity
    /// * `Redirect` to the unauthorized path - role missing or not allowed
    /// * `Render` - role is on the allow-list
    #[instrument(skip(self, session), fields(allowed = ?self.allowed))]
    pub fn decide(&self, session: &SessionState, requested: &str) -> GuardDecision {
        if session.loading {
            debug!("Session still loading, holding decision");
            return GuardDecision::Pending;
        }

        let Some(identity) = &session.identity else {
            debug!("No identity, redirecting to {}", self.login_path);
            return GuardDecision::Redirect {
                to: self.login_path.clone(),
                from: Some(requested.to_string()),
                reason: RedirectReason::Unauthenticated,
            };
        };

        if !identity.has_role(&self.allowed) {
            debug!(
                "Role {:?} not allowed, redirecting to {}",
                identity.user_type, self.unauthorized_path
            );
            return GuardDecision::Redirect {
                to: self.unauthorized_path.clone(),
                from: None,
                reason: RedirectReason::Forbidden,
            };
        }

        GuardDecision::Render
    }
}
