//! Entities - domain types shared by the codec, session and guard

pub mod identity;
pub mod user_type;

pub use identity::Identity;
pub use user_type::UserType;
