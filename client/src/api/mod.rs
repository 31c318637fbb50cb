//! API module - the backend's authentication endpoints
//!
//! [`AuthApi`] is the seam the session store talks through; [`RestClient`]
//! is the HTTP implementation. Tests substitute their own implementation.

pub mod rest;

use crate::core::ApiError;
use crate::dtos::{AuthResponseDTO, LoginDTO, RegisterDTO, UserInfoDTO};
use std::sync::Arc;

pub use rest::RestClient;

/// Authentication operations offered by the backend
pub trait AuthApi {
    /// Exchanges credentials for a bearer token and the user's claims
    ///
    /// # Returns
    /// * `Ok(AuthResponseDTO)` - token plus the backend-validated claims
    /// * `Err(ApiError)` - invalid credentials, validation or transport failure
    async fn login(&self, credentials: &LoginDTO) -> Result<AuthResponseDTO, ApiError>;

    /// Asks the backend whether `token` is still accepted
    ///
    /// # Returns
    /// * `Ok(true)` - token accepted
    /// * `Ok(false)` - token rejected
    /// * `Err(ApiError)` - the question could not be answered
    async fn validate_token(&self, token: &str) -> Result<bool, ApiError>;

    /// Creates an account through the role-specific registration endpoint
    async fn register(&self, request: &RegisterDTO) -> Result<AuthResponseDTO, ApiError>;

    /// Profile of the user owning `token`
    async fn current_user(&self, token: &str) -> Result<UserInfoDTO, ApiError>;

    /// Tells the backend to drop its own session cookie
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
}

impl<A: AuthApi> AuthApi for Arc<A> {
    async fn login(&self, credentials: &LoginDTO) -> Result<AuthResponseDTO, ApiError> {
        (**self).login(credentials).await
    }

    async fn validate_token(&self, token: &str) -> Result<bool, ApiError> {
        (**self).validate_token(token).await
    }

    async fn register(&self, request: &RegisterDTO) -> Result<AuthResponseDTO, ApiError> {
        (**self).register(request).await
    }

    async fn current_user(&self, token: &str) -> Result<UserInfoDTO, ApiError> {
        (**self).current_user(token).await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        (**self).logout(token).await
    }
}
