pub mod auth;
pub mod backend;
pub mod bookings;
pub mod client;
pub mod credentials;
pub mod error;
pub mod reviews;
pub mod tours;
pub mod types;
pub mod users;

pub use auth::AuthApi;
pub use backend::{Backend, HttpBackend};
pub use bookings::BookingsApi;
pub use client::ApiClient;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{ApiError, ErrorPayload};
pub use reviews::ReviewsApi;
pub use tours::ToursApi;
pub use users::UsersApi;
