use log::info;
use reqwest::Method;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{LoginRequest, LoginResponse};

/// `POST /auth/login` and local logout.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a bearer token and persists it.
    ///
    /// This is the only unauthenticated call the console makes.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let req = self
            .client
            .public(Method::POST, "/auth/login")
            .json(credentials);
        let response: LoginResponse = self.client.send_json(req).await?;
        self.client.credentials().store(&response.token)?;
        info!("Logged in as {}", credentials.email);
        Ok(response)
    }

    /// Forgets the stored token. There is no server-side logout endpoint.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.credentials().clear()?;
        info!("Logged out");
        Ok(())
    }
}
