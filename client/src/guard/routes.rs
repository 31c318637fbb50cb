//! Route table - which views are public, which roles open the protected ones,
//! and where each role lands after logging in.

use super::{DEFAULT_LOGIN_PATH, DEFAULT_UNAUTHORIZED_PATH, GuardDecision, RouteGuard};
use crate::core::Config;
use crate::entities::{Identity, UserType};
use crate::session::SessionState;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct RouteTable {
    login_path: String,
    unauthorized_path: String,
    public: Vec<String>,
    protected: Vec<(String, RouteGuard)>,
    homes: Vec<(UserType, String)>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH, DEFAULT_UNAUTHORIZED_PATH)
    }
}

impl RouteTable {
    /// Empty table. The login path is always public.
    pub fn new(login_path: impl Into<String>, unauthorized_path: impl Into<String>) -> Self {
        let login_path = login_path.into();
        Self {
            public: vec![login_path.clone()],
            login_path,
            unauthorized_path: unauthorized_path.into(),
            protected: Vec::new(),
            homes: Vec::new(),
        }
    }

    /// The dashboards' routes, with the default redirect targets
    pub fn swms() -> Self {
        Self::default().with_swms_routes()
    }

    /// The dashboards' routes, with redirect targets taken from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.login_path.clone(), config.unauthorized_path.clone()).with_swms_routes()
    }

    fn with_swms_routes(self) -> Self {
        self.public("/")
            .public("/register")
            .protect("/citizen-dashboard", [UserType::Citizen])
            .protect("/city-authority-dashboard", [UserType::CityAuthority])
            .protect("/assigned-routes", [UserType::CityAuthority])
            .protect("/driver-dashboard", [UserType::Driver])
            .protect(
                "/waste-collection-staff-dashboard",
                [UserType::WasteCollectionStaff],
            )
            .protect("/sensor-manager-dashboard", [UserType::SensorManager])
            .home(UserType::Citizen, "/citizen-dashboard")
            .home(UserType::CityAuthority, "/city-authority-dashboard")
            .home(UserType::Driver, "/driver-dashboard")
            .home(UserType::WasteCollectionStaff, "/waste-collection-staff-dashboard")
            .home(UserType::SensorManager, "/sensor-manager-dashboard")
    }

    /// Registers a view anyone may open. Matches the exact path only.
    pub fn public(mut self, path: impl Into<String>) -> Self {
        self.public.push(path.into());
        self
    }

    /// Registers a protected view. Nested paths below it share its guard.
    pub fn protect(
        mut self,
        path: impl Into<String>,
        allowed: impl IntoIterator<Item = UserType>,
    ) -> Self {
        let guard = RouteGuard::new(allowed)
            .with_login_path(self.login_path.clone())
            .with_unauthorized_path(self.unauthorized_path.clone());
        self.protected.push((path.into(), guard));
        self
    }

    /// Sets the landing view of a role
    pub fn home(mut self, role: UserType, path: impl Into<String>) -> Self {
        self.homes.retain(|(r, _)| *r != role);
        self.homes.push((role, path.into()));
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Guard of the most specific protected view containing `path`
    pub fn guard_for(&self, path: &str) -> Option<&RouteGuard> {
        let path = normalize(path);
        self.protected
            .iter()
            .filter(|(prefix, _)| is_within(prefix, path))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, guard)| guard)
    }

    pub fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        self.public.iter().any(|p| normalize(p) == path)
    }

    /// Decision for navigating to `path`, or `None` when no view lives there
    #[instrument(skip(self, session))]
    pub fn resolve(&self, path: &str, session: &SessionState) -> Option<GuardDecision> {
        if let Some(guard) = self.guard_for(path) {
            return Some(guard.decide(session, path));
        }
        if self.is_public(path) {
            return Some(GuardDecision::Render);
        }
        debug!("No view registered for {}", path);
        None
    }

    pub fn home_for(&self, role: &UserType) -> Option<&str> {
        self.homes
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, path)| path.as_str())
    }

    /// Where to go once `identity` has logged in: back to the location the
    /// login redirect preserved if the identity may open it, otherwise the
    /// role's landing view, otherwise `/`.
    pub fn post_login_target(&self, from: Option<&str>, identity: &Identity) -> String {
        if let Some(from) = from {
            if let Some(guard) = self.guard_for(from) {
                if identity.has_role(guard.allowed()) {
                    return from.to_string();
                }
            }
        }
        identity
            .user_type
            .as_ref()
            .and_then(|role| self.home_for(role))
            .unwrap_or("/")
            .to_string()
    }
}

/// Drops query, fragment and trailing slash
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Whether `path` is `prefix` itself or lies below it on a segment boundary
fn is_within(prefix: &str, path: &str) -> bool {
    let prefix = normalize(prefix);
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
