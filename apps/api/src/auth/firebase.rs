use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AuthError, AuthProvider, AuthUser};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

/// Firebase provider. Verifies ID tokens with the Identity Toolkit
/// `accounts:lookup` endpoint.
#[derive(Clone)]
pub struct RemoteAuth {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteAuth {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(IDENTITY_TOOLKIT_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl AuthProvider for RemoteAuth {
    async fn authenticate(&self, token: Option<&str>) -> Result<AuthUser, AuthError> {
        let id_token = token.ok_or(AuthError::MissingToken)?;

        let response = self
            .client
            .post(format!("{}/accounts:lookup", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest { id_token })
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            debug!("Firebase rejected token with status {status}");
            return Err(AuthError::InvalidToken);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Firebase lookup failed ({status}): {body}");
            return Err(AuthError::Provider(format!("lookup returned {status}")));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let user = lookup.users.into_iter().next().ok_or(AuthError::InvalidToken)?;
        Ok(AuthUser {
            uid: user.local_id,
            email: user.email,
            provider: self.name(),
        })
    }

    fn name(&self) -> &'static str {
        "firebase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_rejected_without_network() {
        let auth = RemoteAuth::with_base_url("http://127.0.0.1:9".to_string(), "k".to_string());
        let err = auth.authenticate(None).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[test]
    fn test_lookup_response_parses() {
        let json = r#"{"kind": "identitytoolkit#GetAccountInfoResponse",
            "users": [{"localId": "u1", "email": "a@b.c", "emailVerified": true}]}"#;
        let parsed: LookupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.users[0].local_id, "u1");
        assert_eq!(parsed.users[0].email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_lookup_request_uses_camel_case() {
        let value = serde_json::to_value(LookupRequest { id_token: "t" }).unwrap();
        assert_eq!(value, serde_json::json!({"idToken": "t"}));
    }
}
