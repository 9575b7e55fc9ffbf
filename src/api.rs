//! Client side of the remote auth service.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SIGNUP_PATH: &str = "/api/auth/signup";

pub const LOGIN_OK: u16 = 200;
pub const SIGNUP_OK: u16 = 201;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub age: String,
    pub mobile_no: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Body of either endpoint: `token` on success, `message` otherwise.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AuthBody {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: AuthBody,
}

impl GatewayReply {
    /// Turns a reply into the issued token, given the status the endpoint
    /// uses to signal success.
    pub fn into_token(self, success: u16) -> Result<String, AuthError> {
        if self.status == success {
            return self
                .body
                .token
                .filter(|t| !t.is_empty())
                .ok_or(AuthError::MissingToken);
        }
        Err(AuthError::Rejected {
            message: self
                .body
                .message
                .unwrap_or_else(|| format!("Request failed with status {}", self.status)),
        })
    }
}

#[async_trait(?Send)]
pub trait AuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<GatewayReply, AuthError>;

    async fn signup(&self, request: &SignupRequest) -> Result<GatewayReply, AuthError>;
}

/// Talks to the auth service over HTTP from the browser.
pub struct HttpAuthGateway {
    base_url: String,
}

impl HttpAuthGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<GatewayReply, AuthError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = Request::post(&url)
            .json(payload)
            .map_err(|e| AuthError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .json::<AuthBody>()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(GatewayReply { status, body })
    }
}

#[async_trait(?Send)]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<GatewayReply, AuthError> {
        self.post(LOGIN_PATH, request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<GatewayReply, AuthError> {
        self.post(SIGNUP_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, json: &str) -> GatewayReply {
        GatewayReply {
            status,
            body: serde_json::from_str(json).unwrap(),
        }
    }

    #[test]
    fn signup_payload_uses_camel_case() {
        let request = SignupRequest {
            name: "Asha".into(),
            age: "29".into(),
            mobile_no: "9876543210".into(),
            email: "asha@example.com".into(),
            username: "asha".into(),
            password: "secret".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["mobileNo"], "9876543210");
        assert!(json.get("mobile_no").is_none());
    }

    #[test]
    fn success_status_yields_token() {
        assert_eq!(
            reply(200, r#"{"token":"abc"}"#).into_token(LOGIN_OK),
            Ok("abc".to_string())
        );
        assert_eq!(
            reply(201, r#"{"token":"xyz"}"#).into_token(SIGNUP_OK),
            Ok("xyz".to_string())
        );
    }

    #[test]
    fn signup_requires_created_status() {
        assert!(matches!(
            reply(200, r#"{"token":"xyz"}"#).into_token(SIGNUP_OK),
            Err(AuthError::Rejected { .. })
        ));
    }

    #[test]
    fn rejection_keeps_server_message() {
        assert_eq!(
            reply(401, r#"{"message":"Invalid credentials"}"#).into_token(LOGIN_OK),
            Err(AuthError::Rejected {
                message: "Invalid credentials".into()
            })
        );
    }

    #[test]
    fn success_without_token_is_an_error() {
        assert_eq!(
            reply(200, "{}").into_token(LOGIN_OK),
            Err(AuthError::MissingToken)
        );
    }
}
