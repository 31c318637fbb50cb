//! Token codec - reads the claims of a bearer token without verifying it
//!
//! The payload segment is decoded only to personalise the UI and gate
//! navigation. The signature is never checked here: the backend is the
//! trust boundary and enforces roles on every call.

use crate::core::DecodeError;
use crate::entities::{Identity, UserType};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

/// Standard alphabet, padding optional: JWT segments are emitted unpadded.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes the payload segment of `token` into an [`Identity`].
///
/// Missing claims become `None`; only a structurally broken token fails.
#[instrument(skip(token))]
pub fn decode_token(token: &str) -> Result<Identity, DecodeError> {
    let claims = decode_claims(token).inspect_err(|e| warn!("Failed to decode token: {}", e))?;

    let identity = Identity {
        user_id: string_claim(&claims, "userId"),
        name: string_claim(&claims, "name"),
        email: string_claim(&claims, "sub"),
        user_type: string_claim(&claims, "userType").map(UserType::from),
        phone: string_claim(&claims, "phone"),
        issued_at: timestamp_claim(&claims, "iat"),
        expires_at: timestamp_claim(&claims, "exp"),
    };
    debug!(
        "Token decoded for user {}",
        identity.user_id.as_deref().unwrap_or("<none>")
    );
    Ok(identity)
}

fn decode_claims(token: &str) -> Result<Map<String, Value>, DecodeError> {
    let payload = token.split('.').nth(1).ok_or(DecodeError::Malformed)?;
    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE.decode(standard)?;
    let text = String::from_utf8(bytes)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Object(claims) => Ok(claims),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Strings are copied verbatim, numbers rendered as text, anything else is absent.
fn string_claim(claims: &Map<String, Value>, key: &str) -> Option<String> {
    match claims.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn timestamp_claim(claims: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    claims
        .get(key)?
        .as_i64()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
