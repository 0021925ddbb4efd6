//! HTTPS client for the VK method API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use super::{ApiError, GroupRecord, PlatformApi, UserRecord};
use crate::config::ApiConfig;

/// VK wraps every result in either `{"response": ...}` or `{"error": {...}}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: Option<T>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

/// Shared, cloneable VK API client authenticated with a community token.
#[derive(Clone)]
pub struct VkClient {
    http: Client,
    base_url: String,
    version: String,
    token: String,
}

impl VkClient {
    /// Build a client from the access token and API settings.
    pub fn new(token: impl Into<String>, api: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(api.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            version: api.version.clone(),
            token: token.into(),
        })
    }

    /// Invoke `method` and unwrap the response envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, method);

        debug!(method = method, "vk_api_request");

        // The token goes in the body; request URLs end up in error messages.
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        form.push(("access_token", self.token.as_str()));
        form.push(("v", self.version.as_str()));
        form.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let resp = self.http.post(&url).form(&form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(method = method, status_code = status.as_u16(), "vk_api_bad_status");
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;

        match (envelope.response, envelope.error) {
            (_, Some(err)) => Err(ApiError::Api {
                code: err.error_code,
                message: err.error_msg,
            }),
            (Some(response), None) => Ok(response),
            (None, None) => Err(ApiError::Decode(<serde_json::Error as serde::de::Error>::custom(
                "envelope has neither response nor error",
            ))),
        }
    }
}

#[async_trait]
impl PlatformApi for VkClient {
    async fn users_get(&self, user_id: i64) -> Result<Vec<UserRecord>, ApiError> {
        self.call("users.get", &[("user_ids", user_id.to_string())])
            .await
    }

    async fn groups_get_by_id(&self, group_id: i64) -> Result<Vec<GroupRecord>, ApiError> {
        self.call("groups.getById", &[("group_id", group_id.to_string())])
            .await
    }

    async fn delete_comment(&self, owner_id: i64, comment_id: i64) -> Result<bool, ApiError> {
        let done: i64 = self
            .call(
                "wall.deleteComment",
                &[
                    ("owner_id", owner_id.to_string()),
                    ("comment_id", comment_id.to_string()),
                ],
            )
            .await?;

        Ok(done == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> VkClient {
        let api = ApiConfig {
            base_url: server.uri(),
            ..ApiConfig::default()
        };
        VkClient::new("test-token", &api).unwrap()
    }

    #[tokio::test]
    async fn test_users_get_sends_token_and_version() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users.get"))
            .and(body_string_contains("user_ids=42"))
            .and(body_string_contains("access_token=test-token"))
            .and(body_string_contains("v=5.131"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": [{"id": 42, "first_name": "John", "last_name": "Doe"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let users = client_for(&server).users_get(42).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 42);
        assert_eq!(users[0].first_name, "John");
    }

    #[tokio::test]
    async fn test_groups_get_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/groups.getById"))
            .and(body_string_contains("group_id=7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": [{"id": 7, "name": "Rust Club", "screen_name": "rustclub"}]
            })))
            .mount(&server)
            .await;

        let groups = client_for(&server).groups_get_by_id(7).await.unwrap();

        assert_eq!(groups[0].name, "Rust Club");
    }

    #[tokio::test]
    async fn test_delete_comment_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/wall.deleteComment"))
            .and(body_string_contains("owner_id=-10"))
            .and(body_string_contains("comment_id=55"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).delete_comment(-10, 55).await.unwrap());
    }

    #[tokio::test]
    async fn test_api_error_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/wall.deleteComment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": {"error_code": 15, "error_msg": "Access denied"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).delete_comment(-10, 55).await.unwrap_err();

        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code, 15);
                assert_eq!(message, "Access denied");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = client_for(&server).users_get(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Status(502)));
    }

    #[tokio::test]
    async fn test_empty_envelope_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).users_get(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_network_error_does_not_expose_token() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_ms: 1000,
            ..ApiConfig::default()
        };
        let client = VkClient::new("SECRET-TOKEN-123", &api).unwrap();

        let err = client.delete_comment(-10, 55).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert!(!err.to_string().contains("SECRET-TOKEN-123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRET-TOKEN-123"));

        let err = client.users_get(1).await.unwrap_err();
        assert!(!err.to_string().contains("SECRET-TOKEN-123"), "{err}");
    }
}
