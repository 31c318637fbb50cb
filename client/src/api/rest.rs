use super::AuthApi;
use crate::core::{ApiError, Config};
use crate::dtos::{ApiResponse, AuthResponseDTO, LoginDTO, RegisterDTO, UserInfoDTO};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

/// HTTP implementation of [`AuthApi`] on top of reqwest
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
}

impl RestClient {
    /// # Arguments
    /// * `base_url` - root of the REST API, e.g. `http://localhost:8080/api`
    /// * `timeout` - upper bound for every request
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads the `{ success, message, data }` envelope, turning non-2xx
    /// statuses and `success: false` into [`ApiError::Rejected`].
    async fn read_envelope<T: DeserializeOwned>(
        response: Response,
    ) -> Result<ApiResponse<T>, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            warn!("Backend answered {}: {}", status, message);
            return Err(ApiError::rejected(status.as_u16(), message));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response body: {:?}", e);
            ApiError::from(e)
        })?;
        if !envelope.success {
            let message = envelope.message_or("Request was not successful");
            warn!("Backend reported failure: {}", message);
            return Err(ApiError::rejected(status.as_u16(), message));
        }
        Ok(envelope)
    }

    fn data_of<T>(envelope: ApiResponse<T>) -> Result<T, ApiError> {
        envelope.data.ok_or(ApiError::MissingData)
    }
}

impl AuthApi for RestClient {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &LoginDTO) -> Result<AuthResponseDTO, ApiError> {
        credentials.validate()?;
        debug!("Sending login request");

        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await?;
        let auth = Self::data_of(Self::read_envelope::<AuthResponseDTO>(response).await?)?;

        info!("Login accepted");
        Ok(auth)
    }

    #[instrument(skip(self, token))]
    async fn validate_token(&self, token: &str) -> Result<bool, ApiError> {
        debug!("Validating token with backend");
        let response = self
            .http
            .get(self.url("/auth/validate"))
            .bearer_auth(token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            info!("Backend refused the token ({})", response.status());
            return Ok(false);
        }

        let valid = Self::read_envelope::<bool>(response)
            .await?
            .data
            .unwrap_or(false);
        info!("Token validation result: {}", valid);
        Ok(valid)
    }

    #[instrument(skip(self, request), fields(email = %request.email, user_type = %request.user_type))]
    async fn register(&self, request: &RegisterDTO) -> Result<AuthResponseDTO, ApiError> {
        let segment = request.endpoint_segment().ok_or_else(|| {
            warn!("No registration endpoint for role {}", request.user_type);
            ApiError::UnsupportedRole(request.user_type.to_string())
        })?;
        request.validate()?;

        let response = self
            .http
            .post(self.url(&format!("/auth/register/{segment}")))
            .json(request)
            .send()
            .await?;
        let auth = Self::data_of(Self::read_envelope::<AuthResponseDTO>(response).await?)?;

        info!("Registration accepted");
        Ok(auth)
    }

    #[instrument(skip(self, token))]
    async fn current_user(&self, token: &str) -> Result<UserInfoDTO, ApiError> {
        let response = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::data_of(Self::read_envelope::<UserInfoDTO>(response).await?)
    }

    #[instrument(skip(self, token))]
    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::read_envelope::<serde_json::Value>(response).await?;
        info!("Backend session closed");
        Ok(())
    }
}
