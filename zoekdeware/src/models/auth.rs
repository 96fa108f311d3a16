//! Authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `register` and `login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Body of `refresh`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by every auth operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as unix seconds; advisory only
    pub expires_at: i64,
}

impl AuthResponse {
    /// Expiry as a timestamp, if it is in range
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gateway_auth_response() {
        let json = r#"{"access_token":"a","refresh_token":"r","expires_at":1700000000}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.access_token, "a");
        assert_eq!(response.refresh_token, "r");
        assert_eq!(
            response.expiry().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn test_refresh_body_uses_snake_case() {
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: "r".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"refresh_token": "r"}));
    }
}
