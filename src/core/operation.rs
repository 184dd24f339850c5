//! # Operations
//!
//! An `Operation` names one backend call and carries its already-validated
//! arguments. A `Completion` is what that call produced on success.
//!
//! Both are plain data: the reducer decides which container an operation
//! belongs to, and the backend executor turns an operation into exactly one
//! HTTP request.

use std::path::PathBuf;

use crate::api::types::{
    Booking, BookingDraft, LoginRequest, LoginResponse, PaginatedBookings, Review, Tour,
    TourDraft, User, UserDraft,
};
use crate::core::request::{Field, Resource};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Login(LoginRequest),
    Logout,

    FetchUsers,
    FetchUser(String),
    CreateUser(UserDraft),
    UpdateUser { id: String, draft: UserDraft },
    DeleteUser(String),

    FetchTours,
    FetchTour(String),
    CreateTour { draft: TourDraft, uploads: Vec<PathBuf> },
    UpdateTour {
        id: String,
        draft: TourDraft,
        uploads: Vec<PathBuf>,
    },
    DeleteTour(String),

    CreateBooking(BookingDraft),
    FetchBookings { page: u64, limit: u64 },
    FetchUserBookings(String),
    FetchBooking(String),
    UpdateBooking { id: String, draft: BookingDraft },
    DeleteBooking(String),
    DownloadBookings { year: i32, month: u32 },

    FetchReviews,
    ToggleReviewVisibility(String),
    DeleteReview(String),
    FetchReviewsByTour(String),
    FetchReviewsByUser(String),
}

/// Which container field an operation writes, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// Overwrites the field wholesale. Subject to stale-response discard.
    Replace,
    /// Patches the current value (append, map-replace, filter). Always applied.
    Patch,
}

impl Operation {
    pub fn resource(&self) -> Resource {
        use Operation::*;
        match self {
            Login(_) | Logout => Resource::Session,
            FetchUsers | FetchUser(_) | CreateUser(_) | UpdateUser { .. } | DeleteUser(_) => {
                Resource::Users
            }
            FetchTours | FetchTour(_) | CreateTour { .. } | UpdateTour { .. } | DeleteTour(_) => {
                Resource::Tours
            }
            CreateBooking(_)
            | FetchBookings { .. }
            | FetchUserBookings(_)
            | FetchBooking(_)
            | UpdateBooking { .. }
            | DeleteBooking(_)
            | DownloadBookings { .. } => Resource::Bookings,
            FetchReviews
            | ToggleReviewVisibility(_)
            | DeleteReview(_)
            | FetchReviewsByTour(_)
            | FetchReviewsByUser(_) => Resource::Reviews,
        }
    }

    pub fn field(&self) -> Field {
        use Operation::*;
        match self {
            Login(_) | Logout => Field::Session,
            FetchUser(_) | FetchTour(_) | FetchBooking(_) => Field::Current,
            UpdateBooking { .. } => Field::Current,
            FetchReviewsByTour(_) => Field::ByTour,
            FetchReviewsByUser(_) => Field::ByUser,
            DownloadBookings { .. } => Field::Export,
            _ => Field::Items,
        }
    }

    pub fn write_kind(&self) -> WriteKind {
        use Operation::*;
        match self {
            FetchUsers
            | FetchUser(_)
            | FetchTours
            | FetchTour(_)
            | FetchBookings { .. }
            | FetchUserBookings(_)
            | FetchBooking(_)
            | FetchReviews
            | FetchReviewsByTour(_)
            | FetchReviewsByUser(_) => WriteKind::Replace,
            _ => WriteKind::Patch,
        }
    }

    /// Short name for logs and the status bar, e.g. `users/fetchUsers`.
    pub fn name(&self) -> &'static str {
        use Operation::*;
        match self {
            Login(_) => "auth/login",
            Logout => "auth/logout",
            FetchUsers => "users/fetchUsers",
            FetchUser(_) => "users/fetchUser",
            CreateUser(_) => "users/createUser",
            UpdateUser { .. } => "users/updateUser",
            DeleteUser(_) => "users/deleteUser",
            FetchTours => "tours/fetchTours",
            FetchTour(_) => "tours/fetchTour",
            CreateTour { .. } => "tours/createTour",
            UpdateTour { .. } => "tours/updateTour",
            DeleteTour(_) => "tours/deleteTour",
            CreateBooking(_) => "bookings/createBooking",
            FetchBookings { .. } => "bookings/fetchPaginatedBookings",
            FetchUserBookings(_) => "bookings/fetchUserBookings",
            FetchBooking(_) => "bookings/fetchBookingById",
            UpdateBooking { .. } => "bookings/updateBooking",
            DeleteBooking(_) => "bookings/deleteBooking",
            DownloadBookings { .. } => "bookings/downloadMonthlyBookings",
            FetchReviews => "reviews/getReviews",
            ToggleReviewVisibility(_) => "reviews/toggleReviewVisibility",
            DeleteReview(_) => "reviews/removeReview",
            FetchReviewsByTour(_) => "reviews/getReviewsByTour",
            FetchReviewsByUser(_) => "reviews/getReviewsByUser",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    LoggedIn(LoginResponse),
    LoggedOut,

    Users(Vec<User>),
    User(User),
    UserCreated(User),
    UserUpdated(User),
    UserDeleted(String),

    Tours(Vec<Tour>),
    Tour(Tour),
    TourCreated(Tour),
    TourUpdated(Tour),
    TourDeleted(String),

    BookingCreated(Booking),
    BookingsPage(PaginatedBookings),
    UserBookings(Vec<Booking>),
    Booking(Booking),
    BookingUpdated(Booking),
    BookingDeleted(String),
    BookingsExported(PathBuf),

    Reviews(Vec<Review>),
    ReviewUpdated(Review),
    ReviewDeleted(String),
    ReviewsByTour(Vec<Review>),
    ReviewsByUser(Vec<Review>),
}
