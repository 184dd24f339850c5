//! # Backend Executor
//!
//! Turns an `Operation` into exactly one call on the resource wrappers and
//! wraps the result as a `Completion`. The TUI only ever talks to
//! `dyn Backend`, so tests can swap in a scripted implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use super::client::ApiClient;
use super::error::ApiError;
use crate::core::operation::{Completion, Operation};

#[async_trait]
pub trait Backend: Send + Sync {
    /// Performs one operation against the server.
    async fn execute(&self, operation: Operation) -> Result<Completion, ApiError>;
}

pub struct HttpBackend {
    client: ApiClient,
    download_dir: PathBuf,
}

impl HttpBackend {
    pub fn new(client: ApiClient, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            download_dir: download_dir.into(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn execute(&self, operation: Operation) -> Result<Completion, ApiError> {
        debug!("Executing {}", operation.name());
        let c = &self.client;
        let done = match operation {
            Operation::Login(request) => Completion::LoggedIn(c.auth().login(&request).await?),
            Operation::Logout => {
                c.auth().logout()?;
                Completion::LoggedOut
            }

            Operation::FetchUsers => Completion::Users(c.users().list().await?),
            Operation::FetchUser(id) => Completion::User(c.users().get(&id).await?),
            Operation::CreateUser(draft) => Completion::UserCreated(c.users().create(&draft).await?),
            Operation::UpdateUser { id, draft } => {
                Completion::UserUpdated(c.users().update(&id, &draft).await?)
            }
            Operation::DeleteUser(id) => {
                c.users().delete(&id).await?;
                Completion::UserDeleted(id)
            }

            Operation::FetchTours => Completion::Tours(c.tours().list().await?),
            Operation::FetchTour(id) => Completion::Tour(c.tours().get(&id).await?),
            Operation::CreateTour { draft, uploads } => {
                Completion::TourCreated(c.tours().create(&draft, &uploads).await?)
            }
            Operation::UpdateTour { id, draft, uploads } => {
                Completion::TourUpdated(c.tours().update(&id, &draft, &uploads).await?)
            }
            Operation::DeleteTour(id) => {
                c.tours().delete(&id).await?;
                Completion::TourDeleted(id)
            }

            Operation::CreateBooking(draft) => {
                Completion::BookingCreated(c.bookings().create(&draft).await?)
            }
            Operation::FetchBookings { page, limit } => {
                Completion::BookingsPage(c.bookings().list(page, limit).await?)
            }
            Operation::FetchUserBookings(user_id) => {
                Completion::UserBookings(c.bookings().list_for_user(&user_id).await?)
            }
            Operation::FetchBooking(id) => Completion::Booking(c.bookings().get(&id).await?),
            Operation::UpdateBooking { id, draft } => {
                Completion::BookingUpdated(c.bookings().update(&id, &draft).await?)
            }
            Operation::DeleteBooking(id) => {
                c.bookings().delete(&id).await?;
                Completion::BookingDeleted(id)
            }
            Operation::DownloadBookings { year, month } => Completion::BookingsExported(
                c.bookings()
                    .export_month(year, month, &self.download_dir)
                    .await?,
            ),

            Operation::FetchReviews => Completion::Reviews(c.reviews().list().await?),
            Operation::ToggleReviewVisibility(id) => {
                Completion::ReviewUpdated(c.reviews().toggle_visibility(&id).await?)
            }
            Operation::DeleteReview(id) => {
                c.reviews().delete(&id).await?;
                Completion::ReviewDeleted(id)
            }
            Operation::FetchReviewsByTour(tour_id) => {
                Completion::ReviewsByTour(c.reviews().list_for_tour(&tour_id).await?)
            }
            Operation::FetchReviewsByUser(user_id) => {
                Completion::ReviewsByUser(c.reviews().list_for_user(&user_id).await?)
            }
        };
        Ok(done)
    }
}
