//! Session core of the Smart Waste Management dashboards.
//!
//! Boot sequence: build a [`SessionStore`] over a [`RestClient`] and a
//! [`TokenStore`], call [`SessionStore::hydrate`], then ask a [`RouteGuard`]
//! (or the [`RouteTable`]) before showing each view.
//!
//! Identities come from unverified token claims. They drive what the UI
//! shows; the backend keeps enforcing authorization on every request.

pub mod api;
pub mod core;
pub mod dtos;
pub mod entities;
pub mod guard;
pub mod session;
pub mod storage;

pub use api::{AuthApi, RestClient};
pub use crate::core::{ApiError, ClientError, Config, DecodeError, StorageError, decode_token};
pub use entities::{Identity, UserType};
pub use guard::{GuardDecision, RedirectReason, RouteGuard, RouteTable};
pub use session::{SessionState, SessionStore};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
