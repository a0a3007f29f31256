//! HTTP transport
//!
//! One request per call: no retries, no backoff. Every request carries
//! `Content-Type: application/json` and `Authorization: Bearer <token>` where
//! the token is the session's, or the configured anonymous token when no
//! session exists yet.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::ErrorBody;

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync + 'static {
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        session: Option<&Session>,
    ) -> ClientResult<T>;

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ClientResult<T>;

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ClientResult<T>;

    async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        session: Option<&Session>,
    ) -> ClientResult<T>;
}

/// Network HTTP client over `reqwest`
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    config: ClientConfig,
}

impl NetworkHttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn auth_header(&self, session: Option<&Session>) -> Option<String> {
        session
            .map(|s| s.token())
            .or(self.config.anon_token.as_deref())
            .map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        endpoint: &str,
        req: RequestBuilder,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let mut req = req;
        if let Some(auth) = self.auth_header(session) {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        tracing::debug!(method, endpoint, "request");
        let response = req.send().await?;
        handle_response(response).await
    }
}

/// Map a response to the caller's shape or to a [`ClientError`]
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        return Ok(serde_json::from_slice(&bytes)?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.text().map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    tracing::debug!(status = status.as_u16(), %message, "request failed");
    match status {
        StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(message)),
        _ => Err(ClientError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let req = self.client.get(self.config.endpoint_url(endpoint));
        self.send("GET", endpoint, req, session).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let req = self.client.post(self.config.endpoint_url(endpoint)).json(body);
        self.send("POST", endpoint, req, session).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let req = self.client.put(self.config.endpoint_url(endpoint)).json(body);
        self.send("PUT", endpoint, req, session).await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let req = self.client.delete(self.config.endpoint_url(endpoint));
        self.send("DELETE", endpoint, req, session).await
    }
}
