use super::client::ApiClient;
use super::error::ApiError;
use super::types::{User, UserDraft};

/// `/users[/:id]`
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/users").await
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn create(&self, draft: &UserDraft) -> Result<User, ApiError> {
        self.client.post("/users", draft).await
    }

    pub async fn update(&self, id: &str, draft: &UserDraft) -> Result<User, ApiError> {
        self.client.put(&format!("/users/{id}"), draft).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/users/{id}")).await
    }
}
