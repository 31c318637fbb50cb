//! Session module - the single source of truth for "who is logged in"
//!
//! A [`SessionStore`] is built explicitly at application start and handed to
//! every surface that needs it (usually as an `Arc`). It starts in the
//! loading phase, leaves it exactly once through [`SessionStore::hydrate`],
//! and afterwards only changes through login and logout.

mod state;
mod store;

pub use state::SessionState;
pub use store::SessionStore;
