use super::SessionState;
use crate::api::AuthApi;
use crate::core::{ApiError, decode_token};
use crate::dtos::LoginDTO;
use crate::entities::Identity;
use crate::storage::{LEGACY_COOKIE_SLOT, TOKEN_SLOT, TokenStore};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Process-wide authentication state with an explicit initialization phase.
///
/// # Type Parameters
/// * `A` - backend used to validate tokens and sign in
/// * `S` - persisted token slots
pub struct SessionStore<A, S> {
    api: A,
    store: S,
    state: watch::Sender<SessionState>,
    hydrated: AtomicBool,
}

impl<A: AuthApi, S: TokenStore> SessionStore<A, S> {
    /// Creates a session in the loading phase. Nothing is read until
    /// [`hydrate`](Self::hydrate) runs.
    pub fn new(api: A, store: S) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            api,
            store,
            state,
            hydrated: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Resolves the persisted token into an identity and ends the loading phase.
    ///
    /// Runs once; later calls return the current state untouched. Every
    /// failure (storage, network, rejected or undecodable token) ends in an
    /// empty identity, and `loading` is cleared in all cases.
    #[instrument(skip(self))]
    pub async fn hydrate(&self) -> SessionState {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            debug!("Session already hydrated");
            return self.snapshot();
        }

        let identity = self.resolve_persisted_identity().await;
        match &identity {
            Some(identity) => info!("Session restored for {}", identity.display_name()),
            None => info!("No authenticated session"),
        }

        self.state.send_modify(|state| {
            state.identity = identity;
            state.loading = false;
        });
        self.snapshot()
    }

    async fn resolve_persisted_identity(&self) -> Option<Identity> {
        let token = match self.store.get(TOKEN_SLOT) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                debug!("No token persisted");
                return None;
            }
            Err(e) => {
                warn!("Token storage unreadable, treating as logged out: {}", e);
                return None;
            }
        };

        match self.api.validate_token(&token).await {
            Ok(true) => match decode_token(&token) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!("Backend accepted a token that cannot be decoded: {}", e);
                    self.clear_token();
                    None
                }
            },
            Ok(false) => {
                info!("Persisted token is no longer valid, clearing it");
                self.clear_token();
                None
            }
            Err(e) => {
                warn!("Token validation failed, clearing token: {}", e);
                self.clear_token();
                None
            }
        }
    }

    fn clear_token(&self) {
        if let Err(e) = self.store.remove(TOKEN_SLOT) {
            warn!("Failed to clear persisted token: {}", e);
        }
    }

    /// Sets the identity returned by a login call. The claims are taken as
    /// given, no token is decoded.
    #[instrument(skip(self, identity), fields(user_id = ?identity.user_id))]
    pub fn login(&self, identity: Identity) {
        info!("Setting user data for {}", identity.display_name());
        self.state.send_modify(|state| state.identity = Some(identity));
    }

    /// Clears the identity and both persisted token slots
    #[instrument(skip(self))]
    pub fn logout(&self) {
        info!("Logging out user");
        self.state.send_modify(|state| state.identity = None);
        for slot in [TOKEN_SLOT, LEGACY_COOKIE_SLOT] {
            if let Err(e) = self.store.remove(slot) {
                warn!("Failed to clear slot {}: {}", slot, e);
            }
        }
    }

    /// Logs in against the backend, persists the returned token and adopts
    /// the returned claims as the current identity.
    ///
    /// A token that cannot be persisted keeps the user signed in for this
    /// run only.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn sign_in(&self, credentials: &LoginDTO) -> Result<Identity, ApiError> {
        let auth = self.api.login(credentials).await?;

        for slot in [TOKEN_SLOT, LEGACY_COOKIE_SLOT] {
            if let Err(e) = self.store.put(slot, &auth.token) {
                warn!("Failed to persist token in slot {}: {}", slot, e);
            }
        }

        let identity = Identity::from(&auth);
        self.login(identity.clone());
        Ok(identity)
    }

    /// Closes the backend session (best effort) and then logs out locally
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if let Some(token) = self.token() {
            if let Err(e) = self.api.logout(&token).await {
                warn!("Backend logout failed, clearing local session anyway: {}", e);
            }
        }
        self.logout();
    }

    /// Bearer token for authenticated calls, if one is persisted
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_SLOT) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Token storage unreadable: {}", e);
                None
            }
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Receiver notified on every change, for surfaces that re-render
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Waits until hydration has finished and returns the state at that point
    pub async fn ready(&self) -> SessionState {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            // sender is owned by self
            Err(_) => return self.snapshot(),
        };
        state
    }
}
