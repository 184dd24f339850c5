use std::path::{Path, PathBuf};

use log::info;
use reqwest::Method;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{Booking, BookingDraft, PaginatedBookings};

/// `/bookings`
pub struct BookingsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, draft: &BookingDraft) -> Result<Booking, ApiError> {
        self.client.post("/bookings", draft).await
    }

    /// `GET /bookings?page&limit`
    pub async fn list(&self, page: u64, limit: u64) -> Result<PaginatedBookings, ApiError> {
        let req = self
            .client
            .authed(Method::GET, "/bookings")?
            .query(&[("page", page), ("limit", limit)]);
        self.client.send_json(req).await
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>, ApiError> {
        self.client.get(&format!("/bookings/user/{user_id}")).await
    }

    pub async fn get(&self, id: &str) -> Result<Booking, ApiError> {
        self.client.get(&format!("/bookings/{id}")).await
    }

    pub async fn update(&self, id: &str, draft: &BookingDraft) -> Result<Booking, ApiError> {
        self.client.put(&format!("/bookings/{id}"), draft).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/bookings/{id}")).await
    }

    /// Raw CSV bytes for one month of bookings.
    pub async fn download_month(&self, year: i32, month: u32) -> Result<Vec<u8>, ApiError> {
        let req = self
            .client
            .authed(Method::GET, &format!("/bookings/download/{year}/{month}"))?;
        self.client.send_bytes(req).await
    }

    /// Downloads a month and writes it to `dir/bookings_<year>_<month>.csv`.
    pub async fn export_month(
        &self,
        year: i32,
        month: u32,
        dir: &Path,
    ) -> Result<PathBuf, ApiError> {
        let bytes = self.download_month(year, month).await?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(export_file_name(year, month));
        tokio::fs::write(&path, &bytes).await?;
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

pub fn export_file_name(year: i32, month: u32) -> String {
    format!("bookings_{year}_{month}.csv")
}
