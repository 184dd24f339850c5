//! # State Containers
//!
//! One container per resource, each mirroring what the backend last returned
//! plus its request lifecycle.
//!
//! ```text
//! Container<T>          users, tours
//! ├── items: Vec<T>     last fetched collection, server order
//! ├── current: Option<T>
//! └── lifecycle         loading / error / tickets
//!
//! BookingsState         adds pagination
//! ReviewsState          adds by_tour / by_user lists
//! SessionState          authenticated flag
//! ```
//!
//! Containers are only mutated by the reducer in `action.rs`.

use log::warn;

use crate::api::error::ErrorPayload;
use crate::api::types::{Booking, Identified, Pagination, Review, Tour, User};
use crate::core::operation::Completion;
use crate::core::request::Lifecycle;

/// Replaces the entry whose id matches `item`. Others are untouched.
pub fn replace_by_id<T: Identified>(items: &mut [T], item: T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
        *slot = item;
    }
}

/// Appends `item`, or replaces the entry that already carries its id (a list
/// fetch may have delivered it first).
pub fn upsert_by_id<T: Identified>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

/// Drops every entry with the given id.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) {
    items.retain(|item| item.id() != id);
}

#[derive(Debug)]
pub struct Container<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub lifecycle: Lifecycle,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<T: Identified> Container<T> {
    pub fn loading(&self) -> bool {
        self.lifecycle.loading()
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        self.lifecycle.error.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn set_current(&mut self, item: T) {
        self.current = Some(item);
    }

    pub fn append(&mut self, item: T) {
        upsert_by_id(&mut self.items, item);
    }

    pub fn patch(&mut self, item: T) {
        replace_by_id(&mut self.items, item);
    }

    pub fn remove(&mut self, id: &str) {
        remove_by_id(&mut self.items, id);
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.current = None;
        self.lifecycle.reset();
    }
}

pub type UsersState = Container<User>;
pub type ToursState = Container<Tour>;

impl Container<User> {
    pub fn apply(&mut self, done: Completion) {
        match done {
            Completion::Users(users) => self.replace_all(users),
            Completion::User(user) => self.set_current(user),
            Completion::UserCreated(user) => self.append(user),
            Completion::UserUpdated(user) => self.patch(user),
            Completion::UserDeleted(id) => self.remove(&id),
            other => warn!("Users container ignoring {:?}", other),
        }
    }
}

impl Container<Tour> {
    pub fn apply(&mut self, done: Completion) {
        match done {
            Completion::Tours(tours) => self.replace_all(tours),
            Completion::Tour(tour) => self.set_current(tour),
            Completion::TourCreated(tour) => self.append(tour),
            Completion::TourUpdated(tour) => {
                if self.current.as_ref().is_some_and(|c| c.id == tour.id) {
                    self.current = Some(tour.clone());
                }
                self.patch(tour);
            }
            Completion::TourDeleted(id) => self.remove(&id),
            other => warn!("Tours container ignoring {:?}", other),
        }
    }
}

#[derive(Debug, Default)]
pub struct BookingsState {
    pub items: Vec<Booking>,
    pub current: Option<Booking>,
    pub pagination: Pagination,
    /// Path of the most recent CSV export.
    pub last_export: Option<std::path::PathBuf>,
    pub lifecycle: Lifecycle,
}

impl BookingsState {
    pub fn loading(&self) -> bool {
        self.lifecycle.loading()
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        self.lifecycle.error.as_ref()
    }

    pub fn apply(&mut self, done: Completion) {
        match done {
            Completion::BookingCreated(booking) => upsert_by_id(&mut self.items, booking),
            Completion::BookingsPage(page) => {
                self.items = page.bookings;
                self.pagination = page.meta;
            }
            Completion::UserBookings(bookings) => self.items = bookings,
            Completion::Booking(booking) => self.current = Some(booking),
            Completion::BookingUpdated(booking) => {
                replace_by_id(&mut self.items, booking.clone());
                self.current = Some(booking);
            }
            Completion::BookingDeleted(id) => remove_by_id(&mut self.items, &id),
            Completion::BookingsExported(path) => self.last_export = Some(path),
            other => warn!("Bookings container ignoring {:?}", other),
        }
    }

    /// Drops the selected booking and the error. The list is kept and
    /// requests still in flight settle normally.
    pub fn clear(&mut self) {
        self.current = None;
        self.lifecycle.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct ReviewsState {
    pub items: Vec<Review>,
    pub by_tour: Vec<Review>,
    pub by_user: Vec<Review>,
    pub lifecycle: Lifecycle,
}

impl ReviewsState {
    pub fn loading(&self) -> bool {
        self.lifecycle.loading()
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        self.lifecycle.error.as_ref()
    }

    pub fn apply(&mut self, done: Completion) {
        match done {
            Completion::Reviews(reviews) => self.items = reviews,
            Completion::ReviewUpdated(review) => {
                replace_by_id(&mut self.by_tour, review.clone());
                replace_by_id(&mut self.by_user, review.clone());
                replace_by_id(&mut self.items, review);
            }
            Completion::ReviewDeleted(id) => {
                remove_by_id(&mut self.items, &id);
                remove_by_id(&mut self.by_tour, &id);
                remove_by_id(&mut self.by_user, &id);
            }
            Completion::ReviewsByTour(reviews) => self.by_tour = reviews,
            Completion::ReviewsByUser(reviews) => self.by_user = reviews,
            other => warn!("Reviews container ignoring {:?}", other),
        }
    }

    pub fn clear_error(&mut self) {
        self.lifecycle.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub authenticated: bool,
    pub email: Option<String>,
    pub lifecycle: Lifecycle,
}

impl SessionState {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            ..Default::default()
        }
    }

    pub fn loading(&self) -> bool {
        self.lifecycle.loading()
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        self.lifecycle.error.as_ref()
    }
}
