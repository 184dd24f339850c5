use super::client::ApiClient;
use super::error::ApiError;
use super::types::Review;

/// `/reviews`. Reviews are moderated, not edited: the only write besides
/// delete is the visibility toggle.
pub struct ReviewsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReviewsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Review>, ApiError> {
        self.client.get("/reviews").await
    }

    /// Flips visibility server-side and returns the updated review.
    pub async fn toggle_visibility(&self, id: &str) -> Result<Review, ApiError> {
        self.client
            .patch(&format!("/reviews/{id}/visibility"), &serde_json::json!({}))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/reviews/{id}")).await
    }

    pub async fn list_for_tour(&self, tour_id: &str) -> Result<Vec<Review>, ApiError> {
        self.client.get(&format!("/reviews/{tour_id}")).await
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Review>, ApiError> {
        self.client.get(&format!("/reviews/user/{user_id}")).await
    }
}
