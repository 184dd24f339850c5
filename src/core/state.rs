//! # Application State
//!
//! Core business state for the console. This module contains domain logic
//! only, no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── route: Route                  // view currently shown (post-gate)
//! ├── session: SessionState         // authenticated flag + login lifecycle
//! ├── users: UsersState             // Container<User>
//! ├── tours: ToursState             // Container<Tour>
//! ├── bookings: BookingsState       // + pagination, last export
//! ├── reviews: ReviewsState         // + by_tour / by_user
//! ├── status_message: String        // status bar text
//! └── page_size: u64                // bookings page size
//! ```
//!
//! One `App` is built at startup and passed explicitly; there is no global
//! store. State changes only happen through `update(state, action)` in
//! action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::route::Route;
use crate::core::store::{BookingsState, ReviewsState, SessionState, ToursState, UsersState};

#[derive(Debug)]
pub struct App {
    pub route: Route,
    pub session: SessionState,
    pub users: UsersState,
    pub tours: ToursState,
    pub bookings: BookingsState,
    pub reviews: ReviewsState,
    pub status_message: String,
    pub page_size: u64,
}

impl App {
    /// Starts on the login screen; the first `Navigate` decides where to go.
    pub fn new(authenticated: bool, page_size: u64) -> Self {
        Self {
            route: Route::Login,
            session: SessionState::new(authenticated),
            users: UsersState::default(),
            tours: ToursState::default(),
            bookings: BookingsState::default(),
            reviews: ReviewsState::default(),
            status_message: String::from("Welcome to Tourdesk"),
            page_size: page_size.max(1),
        }
    }

    pub fn from_config(authenticated: bool, config: &ResolvedConfig) -> Self {
        Self::new(authenticated, config.page_size)
    }

    /// True while any container has a request outstanding.
    pub fn is_loading(&self) -> bool {
        self.session.loading()
            || self.users.loading()
            || self.tours.loading()
            || self.bookings.loading()
            || self.reviews.loading()
    }

    /// Drops every container's data. Used on logout.
    pub fn reset_containers(&mut self) {
        self.users.reset();
        self.tours.reset();
        self.bookings.reset();
        self.reviews.reset();
    }
}

#[cfg(test)]
mod tests {
    use crate::core::route::Route;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Tourdesk");
        assert!(!app.is_loading());
        assert!(app.session.authenticated);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.page_size, 10);
    }

    #[test]
    fn test_page_size_never_zero() {
        assert_eq!(super::App::new(false, 0).page_size, 1);
    }
}
