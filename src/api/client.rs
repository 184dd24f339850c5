//! # API Client
//!
//! Shared transport for every resource wrapper. Owns the base URL, one
//! `reqwest::Client`, and the injected credential store.
//!
//! Each call issues exactly one request. No retries, no batching. A request
//! timeout is only applied when one is configured.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::credentials::CredentialStore;
use super::error::ApiError;
use super::{AuthApi, BookingsApi, ReviewsApi, ToursApi, UsersApi};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            credentials,
        }
    }

    /// Like [`ApiClient::new`], with an optional per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn tours(&self) -> ToursApi<'_> {
        ToursApi::new(self)
    }

    pub fn bookings(&self) -> BookingsApi<'_> {
        BookingsApi::new(self)
    }

    pub fn reviews(&self) -> ReviewsApi<'_> {
        ReviewsApi::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads the bearer token at call time. Fails before any I/O if absent.
    fn bearer(&self) -> Result<String, ApiError> {
        self.credentials.token().ok_or_else(|| {
            warn!("Refusing to send request: no bearer token stored");
            ApiError::MissingCredential
        })
    }

    /// Builds a request without credentials (login only).
    pub(crate) fn public(&self, method: Method, path: &str) -> RequestBuilder {
        info!("{} {} (public)", method, path);
        self.http.request(method, self.url(path))
    }

    /// Builds a request carrying `Authorization: Bearer <token>`.
    pub(crate) fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.bearer()?;
        info!("{} {}", method, path);
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(token))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.authed(Method::GET, path)?;
        self.send_json(req).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authed(Method::POST, path)?.json(body);
        self.send_json(req).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authed(Method::PUT, path)?.json(body);
        self.send_json(req).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authed(Method::PATCH, path)?.json(body);
        self.send_json(req).await
    }

    /// DELETE; the response body (usually a confirmation message) is discarded.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let req = self.authed(Method::DELETE, path)?;
        let response = Self::check(req.send().await?).await?;
        debug!("DELETE {} -> {}", path, response.status());
        Ok(())
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = Self::check(req.send().await?).await?;
        let bytes = response.bytes().await?;
        debug!("Response body: {} bytes", bytes.len());
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Failed to decode response body: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    pub(crate) async fn send_bytes(&self, req: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = Self::check(req.send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Turns non-2xx responses into a normalized error: the server's JSON
    /// payload if the body is JSON, otherwise the body text or status reason.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        debug!("Response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!("API error: {} - {}", code, body);

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(payload) if !payload.is_null() => Err(ApiError::Server {
                status: code,
                payload,
            }),
            _ => {
                let message = if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body
                };
                Err(ApiError::Http {
                    status: code,
                    message,
                })
            }
        }
    }
}
