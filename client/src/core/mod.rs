//! Core module - infrastructure shared by every other component
//!
//! - configuration loaded from the environment
//! - error types
//! - the token codec

pub mod config;
pub mod error;
pub mod token;

pub use config::Config;
pub use error::{ApiError, ClientError, DecodeError, StorageError};
pub use token::decode_token;
