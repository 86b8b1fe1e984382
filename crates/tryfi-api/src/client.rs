//! TryFi HTTP/GraphQL client implementation.

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::documents::{API_GRAPHQL, API_LOGIN};
use crate::types::{GraphqlEnvelope, LoginResponse};
use crate::{ApiError, Session};

/// Client for the TryFi GraphQL API.
///
/// The vendor authenticates GraphQL calls with the session cookie set by
/// `/auth/login`, so the underlying HTTP client keeps a cookie store and the
/// [`Session`] is held alongside it.
pub struct TryFiClient {
    http: Client,
    api_host: String,
    session: Option<Session>,
}

impl TryFiClient {
    /// Create a new client for the default API host.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with explicit connection settings.
    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            api_host: config.api_host,
            session: None,
        })
    }

    /// Authenticate with email and password.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, ApiError> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let url = format!("{}{}", self.api_host, API_LOGIN);

        let response = self
            .http
            .post(&url)
            .form(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.map_err(|e| {
                ApiError::Auth(format!(
                    "login failed ({}): failed to read response: {}",
                    status, e
                ))
            })?;
            return Err(ApiError::Auth(format!("login failed ({}): {}", status, text)));
        }

        let text = response.text().await?;
        let login: LoginResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::malformed("login", e))?;

        match login {
            LoginResponse::Failure { error } => {
                warn!(reason = %error.message, "login rejected");
                Err(ApiError::Auth(error.message))
            }
            LoginResponse::Success(session) => {
                debug!(user_id = %session.user_id, "authenticated with TryFi");
                Ok(&*self.session.insert(session))
            }
        }
    }

    /// The current session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Get the API host this client talks to.
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Full URL of the GraphQL endpoint.
    pub fn graphql_url(&self) -> String {
        format!("{}{}", self.api_host, API_GRAPHQL)
    }

    fn require_session(&self) -> Result<&Session, ApiError> {
        self.session.as_ref().ok_or(ApiError::NotAuthenticated)
    }

    /// Run a GraphQL query (sent as `GET ?query=`) and decode its `data`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        context: &'static str,
        document: &str,
    ) -> Result<T, ApiError> {
        self.require_session()?;
        debug!(context, "sending GraphQL query");

        let response = self
            .http
            .get(self.graphql_url())
            .query(&[("query", document)])
            .send()
            .await?;

        self.handle_response(context, response).await
    }

    /// Run a GraphQL mutation (sent as a JSON `POST`) and decode its `data`.
    pub async fn mutation<T: DeserializeOwned>(
        &self,
        context: &'static str,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        #[derive(Serialize)]
        struct MutationRequest<'a> {
            query: &'a str,
            variables: serde_json::Value,
        }

        self.require_session()?;
        debug!(context, variables = %variables, "sending GraphQL mutation");

        let response = self
            .http
            .post(self.graphql_url())
            .json(&MutationRequest {
                query: document,
                variables,
            })
            .send()
            .await?;

        self.handle_response(context, response).await
    }

    /// Map status codes and GraphQL errors, then decode `data` into `T`.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        context: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(ApiError::RateLimited { retry_after_secs });
        }

        let text = response.text().await.map_err(|e| {
            ApiError::InvalidResponse(format!(
                "{} request failed ({}): failed to read response: {}",
                context, status, e
            ))
        })?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth(format!(
                "{} rejected ({}): {}",
                context, status, text
            )));
        }

        if !status.is_success() {
            // Some gateways still return a GraphQL error body with a 4xx/5xx
            if let Ok(GraphqlEnvelope {
                errors: Some(errors),
                ..
            }) = serde_json::from_str::<GraphqlEnvelope>(&text)
                && !errors.is_empty()
            {
                return Err(ApiError::Graphql {
                    messages: errors.into_iter().map(|e| e.message).collect(),
                });
            }

            return Err(ApiError::InvalidResponse(format!(
                "{} request failed ({}): {}",
                context, status, text
            )));
        }

        let envelope: GraphqlEnvelope =
            serde_json::from_str(&text).map_err(|e| ApiError::malformed(context, e))?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            return Err(ApiError::Graphql {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        let data = envelope.data.ok_or_else(|| {
            ApiError::InvalidResponse(format!("{} response contained no data", context))
        })?;

        serde_json::from_value(data).map_err(|e| ApiError::malformed(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn logged_in_client(mock_server: &MockServer) -> TryFiClient {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "userId": "user123",
                "sessionId": "session123",
                "email": "test@example.com"
            })))
            .mount(mock_server)
            .await;

        let mut client = TryFiClient::with_config(ClientConfig::with_host(mock_server.uri())).unwrap();
        client.login("test@example.com", "password").await.unwrap();
        client
    }

    #[test]
    fn test_client_creation() {
        let client = TryFiClient::new().unwrap();
        assert_eq!(client.api_host(), "https://api.tryfi.com");
        assert_eq!(client.graphql_url(), "https://api.tryfi.com/graphql");
        assert!(client.session().is_none());
    }

    #[tokio::test]
    async fn test_login_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_string_contains("email=test%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "userId": "user123",
                "sessionId": "session123",
                "email": "test@example.com"
            })))
            .mount(&mock_server)
            .await;

        let mut client = TryFiClient::with_config(ClientConfig::with_host(mock_server.uri())).unwrap();
        let session = client.login("test@example.com", "password").await.unwrap();

        assert_eq!(session.user_id, "user123");
        assert_eq!(session.session_id, "session123");
        assert_eq!(client.session().map(|s| s.user_id.as_str()), Some("user123"));
    }

    #[tokio::test]
    async fn test_login_error_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": { "message": "Invalid credentials" }
            })))
            .mount(&mock_server)
            .await;

        let mut client = TryFiClient::with_config(ClientConfig::with_host(mock_server.uri())).unwrap();
        let err = client
            .login("test@example.com", "wrong_password")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Auth(ref msg) if msg == "Invalid credentials"));
        assert!(client.session().is_none());
    }

    #[tokio::test]
    async fn test_login_http_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let mut client = TryFiClient::with_config(ClientConfig::with_host(mock_server.uri())).unwrap();
        let err = client.login("test@example.com", "wrong").await.unwrap_err();

        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn test_query_without_session() {
        let client = TryFiClient::new().unwrap();
        let result = client
            .query::<serde_json::Value>("test", "query { test }")
            .await;

        assert!(matches!(result.unwrap_err(), ApiError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_query_sends_document_as_get_parameter() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .and(query_param("query", "query { test }"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "data": { "result": "success" } })),
            )
            .mount(&mock_server)
            .await;

        let data: serde_json::Value = client.query("test", "query { test }").await.unwrap();
        assert_eq!(data["result"], "success");
    }

    #[tokio::test]
    async fn test_mutation_posts_variables() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("\"moduleId\":\"123\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "data": { "result": "success" } })),
            )
            .mount(&mock_server)
            .await;

        let data: serde_json::Value = client
            .mutation(
                "test",
                "mutation test",
                serde_json::json!({ "input": { "moduleId": "123", "nested": { "value": true } } }),
            )
            .await
            .unwrap();
        assert_eq!(data["result"], "success");
    }

    #[tokio::test]
    async fn test_graphql_errors() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": null,
                "errors": [{ "message": "Pet not found" }]
            })))
            .mount(&mock_server)
            .await;

        let err = client
            .query::<serde_json::Value>("test", "query { test }")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Graphql { ref messages } if messages == &["Pet not found"]));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = client
            .query::<serde_json::Value>("test", "query { test }")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Malformed { context: "test", .. }));
    }

    #[tokio::test]
    async fn test_expired_session() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401).set_body_string("session expired"))
            .mount(&mock_server)
            .await;

        let err = client
            .query::<serde_json::Value>("test", "query { test }")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
            .mount(&mock_server)
            .await;

        let err = client
            .query::<serde_json::Value>("test", "query { test }")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::RateLimited {
                retry_after_secs: Some(30)
            }
        ));
    }
}
