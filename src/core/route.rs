//! # Routes
//!
//! Maps URL-style paths to views and enforces the authentication gate.
//! Every route except `/login` requires a session.
//!
//! ```text
//! /login              Login
//! /                   Dashboard
//! /users              Users
//! /tours              Tours
//! /tours/:id          TourDetails
//! /add-tour           AddTour
//! /update-tour/:id    UpdateTour
//! /bookings           Bookings
//! /reviews            Reviews
//! *                   NotFound
//! ```

use std::fmt;

use crate::core::operation::Operation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Users,
    Tours,
    TourDetails(String),
    AddTour,
    UpdateTour(String),
    Bookings,
    Reviews,
    NotFound(String),
}

/// Sidebar entries, in display order.
pub const NAV_ROUTES: [Route; 5] = [
    Route::Dashboard,
    Route::Users,
    Route::Tours,
    Route::Bookings,
    Route::Reviews,
];

impl Route {
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.trim().split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Dashboard,
            ["login"] => Route::Login,
            ["users"] => Route::Users,
            ["tours"] => Route::Tours,
            ["tours", id] => Route::TourDetails(id.to_string()),
            ["add-tour"] => Route::AddTour,
            ["update-tour", id] => Route::UpdateTour(id.to_string()),
            ["bookings"] => Route::Bookings,
            ["reviews"] => Route::Reviews,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".into(),
            Route::Dashboard => "/".into(),
            Route::Users => "/users".into(),
            Route::Tours => "/tours".into(),
            Route::TourDetails(id) => format!("/tours/{id}"),
            Route::AddTour => "/add-tour".into(),
            Route::UpdateTour(id) => format!("/update-tour/{id}"),
            Route::Bookings => "/bookings".into(),
            Route::Reviews => "/reviews".into(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Users => "Users",
            Route::Tours => "Tours",
            Route::TourDetails(_) => "Tour Details",
            Route::AddTour => "Add Tour",
            Route::UpdateTour(_) => "Update Tour",
            Route::Bookings => "Bookings",
            Route::Reviews => "Reviews",
            Route::NotFound(_) => "404 Not Found",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Resolves the route actually shown: unauthenticated access goes to login.
    pub fn guard(self, authenticated: bool) -> Route {
        if self.requires_auth() && !authenticated {
            Route::Login
        } else {
            self
        }
    }

    /// Loads a view dispatches when it is entered.
    pub fn mount_operations(&self, page_size: u64) -> Vec<Operation> {
        match self {
            Route::Dashboard => vec![
                Operation::FetchUsers,
                Operation::FetchTours,
                Operation::FetchBookings {
                    page: 1,
                    limit: page_size,
                },
                Operation::FetchReviews,
            ],
            Route::Users => vec![Operation::FetchUsers],
            Route::Tours => vec![Operation::FetchTours],
            Route::TourDetails(id) => vec![
                Operation::FetchTour(id.clone()),
                Operation::FetchReviewsByTour(id.clone()),
            ],
            Route::UpdateTour(id) => vec![Operation::FetchTour(id.clone())],
            Route::Bookings => vec![Operation::FetchBookings {
                page: 1,
                limit: page_size,
            }],
            Route::Reviews => vec![Operation::FetchReviews],
            Route::Login | Route::AddTour | Route::NotFound(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/users/"), Route::Users);
        assert_eq!(Route::parse("/tours/t1"), Route::TourDetails("t1".into()));
        assert_eq!(Route::parse("/update-tour/t9"), Route::UpdateTour("t9".into()));
        assert_eq!(Route::parse("/add-tour"), Route::AddTour);
        assert_eq!(Route::parse("/reviews"), Route::Reviews);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::parse("/nope"), Route::NotFound("/nope".into()));
        assert_eq!(
            Route::parse("/users/u1/extra"),
            Route::NotFound("/users/u1/extra".into())
        );
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in NAV_ROUTES {
            assert_eq!(Route::parse(&route.path()), route);
        }
        let details = Route::TourDetails("abc".into());
        assert_eq!(Route::parse(&details.path()), details);
    }

    #[test]
    fn test_guard_redirects_unauthenticated() {
        assert_eq!(Route::Users.guard(false), Route::Login);
        assert_eq!(Route::NotFound("/x".into()).guard(false), Route::Login);
        assert_eq!(Route::Login.guard(false), Route::Login);
        assert_eq!(Route::Users.guard(true), Route::Users);
    }

    #[test]
    fn test_mount_operations() {
        assert_eq!(Route::Tours.mount_operations(10), vec![Operation::FetchTours]);
        assert_eq!(
            Route::Bookings.mount_operations(25),
            vec![Operation::FetchBookings { page: 1, limit: 25 }]
        );
        assert!(Route::AddTour.mount_operations(10).is_empty());
    }
}
