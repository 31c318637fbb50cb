//! DTOs module - Data Transfer Objects
//!
//! Wire shapes of the backend's `/auth` endpoints. They stay separate from
//! the entities so the session core does not depend on the backend's JSON
//! layout.

pub mod auth;
pub mod response;

pub use auth::{AuthResponseDTO, LoginDTO, RegisterDTO, UserInfoDTO};
pub use response::ApiResponse;
