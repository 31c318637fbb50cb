use crate::entities::Identity;

/// Snapshot of the authentication state observed by the UI
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Present iff a token was accepted and decoded, or a login succeeded
    pub identity: Option<Identity>,
    /// True only until the first hydration finishes
    pub loading: bool,
}

impl SessionState {
    /// State of a freshly constructed session, before hydration
    pub fn initial() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}
