//! Envelope wrapped around every backend response

use serde::{Deserialize, Serialize};

/// `{ success, message, data }` as returned by every controller
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_failure() {
        let body: ApiResponse<bool> = serde_json::from_value(json!({})).unwrap();
        assert!(!body.success);
        assert_eq!(body.data, None);
        assert_eq!(body.message_or("Network error"), "Network error");
    }

    #[test]
    fn parses_validation_envelope() {
        let body: ApiResponse<bool> =
            serde_json::from_value(json!({ "success": true, "data": true })).unwrap();
        assert!(body.success);
        assert_eq!(body.data, Some(true));
    }
}
