//! Auth DTOs - request and response bodies of the `/auth` endpoints

use crate::entities::{Identity, UserType};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{7,15}$").unwrap();
}

/// Credentials for `POST /auth/login`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct LoginDTO {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Body for `POST /auth/register/{role}`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDTO {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Phone must contain 7 to 15 digits"))]
    pub phone: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub user_type: UserType,
}

impl RegisterDTO {
    /// Path segment of the role-specific registration endpoint, if the role
    /// can self-register.
    pub fn endpoint_segment(&self) -> Option<&'static str> {
        match self.user_type {
            UserType::Citizen => Some("citizen"),
            UserType::CityAuthority => Some("city-authority"),
            UserType::Driver => Some("driver"),
            UserType::WasteCollectionStaff => Some("waste-collection-staff"),
            UserType::SensorManager => Some("sensor-manager"),
            UserType::Other(_) => None,
        }
    }
}

/// `data` of a successful login or registration
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDTO {
    pub token: String,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_type: Option<UserType>,
    pub message: Option<String>,
}

impl From<&AuthResponseDTO> for Identity {
    fn from(value: &AuthResponseDTO) -> Self {
        Self {
            user_id: value.user_id.clone(),
            name: value.name.clone(),
            email: value.email.clone(),
            user_type: value.user_type.clone(),
            phone: value.phone.clone(),
            issued_at: None,
            expires_at: None,
        }
    }
}

/// `data` of `GET /auth/me`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoDTO {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
