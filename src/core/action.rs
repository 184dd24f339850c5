//! # Actions
//!
//! Everything that can happen in the console becomes an `Action`.
//! User opens the tours view? That's `Action::Navigate(Route::Tours)`.
//! Server responds? That's `Action::Settled { ticket, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O to perform. No side
//! effects here. Requests are spawned by the TUI.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!
//! Request(op) ──► lifecycle.begin() ──► Effect::Spawn([PendingRequest])
//!                                              │
//!                                       backend.execute(op)
//!                                              │
//! Settled { ticket, result } ◄─────────────────┘
//!        └─► lifecycle.settle() ──► container.apply(completion)
//! ```

use log::{debug, info, warn};

use crate::api::error::ErrorPayload;
use crate::core::operation::{Completion, Operation};
use crate::core::request::{Lifecycle, Resource, Ticket};
use crate::core::route::Route;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Enter a route. Applies the auth gate and dispatches the view's loads.
    Navigate(Route),
    /// Dispatch one operation.
    Request(Operation),
    /// A spawned request finished.
    Settled {
        ticket: Ticket,
        result: Result<Completion, ErrorPayload>,
    },
    /// Drop the selected booking and the bookings error.
    ClearBooking,
    ClearReviewsError,
    Quit,
}

/// An operation the TUI must run, tagged with the ticket to settle it under.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Spawn(Vec<PendingRequest>),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(route) => navigate(app, route),
        Action::Request(operation) => dispatch(app, vec![operation]),
        Action::Settled { ticket, result } => settle(app, ticket, result),
        Action::ClearBooking => {
            app.bookings.clear();
            Effect::None
        }
        Action::ClearReviewsError => {
            app.reviews.clear_error();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn navigate(app: &mut App, requested: Route) -> Effect {
    let route = requested.clone().guard(app.session.authenticated);
    if route != requested {
        info!("{} requires a session, redirecting to {}", requested, route);
    }
    debug!("Navigate: {}", route);
    let operations = route.mount_operations(app.page_size);
    app.status_message = route.title().to_string();
    app.route = route;
    dispatch(app, operations)
}

fn dispatch(app: &mut App, operations: Vec<Operation>) -> Effect {
    if operations.is_empty() {
        return Effect::None;
    }
    let pending = operations
        .into_iter()
        .map(|operation| {
            if let Operation::Login(request) = &operation {
                app.session.email = Some(request.email.clone());
            }
            let resource = operation.resource();
            let ticket = lifecycle_mut(app, resource).begin(
                resource,
                operation.field(),
                operation.write_kind(),
            );
            debug!("Dispatch {} as {:?}", operation.name(), ticket);
            PendingRequest { ticket, operation }
        })
        .collect();
    Effect::Spawn(pending)
}

fn lifecycle_mut(app: &mut App, resource: Resource) -> &mut Lifecycle {
    match resource {
        Resource::Session => &mut app.session.lifecycle,
        Resource::Users => &mut app.users.lifecycle,
        Resource::Tours => &mut app.tours.lifecycle,
        Resource::Bookings => &mut app.bookings.lifecycle,
        Resource::Reviews => &mut app.reviews.lifecycle,
    }
}

fn settle(app: &mut App, ticket: Ticket, result: Result<Completion, ErrorPayload>) -> Effect {
    let failure = result.as_ref().err().map(ToString::to_string);
    let lifecycle = lifecycle_mut(app, ticket.resource);
    let Some(done) = lifecycle.settle(&ticket, result) else {
        if let Some(message) = failure
            && lifecycle.error.is_some()
        {
            warn!("{:?} request failed: {}", ticket.resource, message);
            app.status_message = format!("Error: {message}");
        }
        return Effect::None;
    };

    if let Some(message) = completion_status(&done) {
        app.status_message = message;
    }

    match ticket.resource {
        Resource::Session => apply_session(app, done),
        Resource::Users => {
            app.users.apply(done);
            Effect::None
        }
        Resource::Tours => {
            let deleted = matches!(done, Completion::TourDeleted(_));
            app.tours.apply(done);
            if deleted {
                dispatch(app, vec![Operation::FetchTours])
            } else {
                Effect::None
            }
        }
        Resource::Bookings => {
            app.bookings.apply(done);
            Effect::None
        }
        Resource::Reviews => {
            let changed = matches!(
                done,
                Completion::ReviewUpdated(_) | Completion::ReviewDeleted(_)
            );
            app.reviews.apply(done);
            if changed {
                let refetch = match &app.route {
                    Route::TourDetails(id) => Operation::FetchReviewsByTour(id.clone()),
                    _ => Operation::FetchReviews,
                };
                dispatch(app, vec![refetch])
            } else {
                Effect::None
            }
        }
    }
}

fn apply_session(app: &mut App, done: Completion) -> Effect {
    match done {
        Completion::LoggedIn(_) => {
            app.session.authenticated = true;
            info!("Session established");
            navigate(app, Route::Dashboard)
        }
        Completion::LoggedOut => {
            app.session.authenticated = false;
            app.session.email = None;
            app.reset_containers();
            navigate(app, Route::Login)
        }
        other => {
            warn!("Session container ignoring {:?}", other);
            Effect::None
        }
    }
}

fn completion_status(done: &Completion) -> Option<String> {
    let message = match done {
        Completion::UserCreated(user) => format!("Created user {}", user.email),
        Completion::UserUpdated(user) => format!("Updated user {}", user.email),
        Completion::UserDeleted(_) => "User deleted".to_string(),
        Completion::TourCreated(tour) => format!("Created tour {}", tour.title),
        Completion::TourUpdated(tour) => format!("Updated tour {}", tour.title),
        Completion::TourDeleted(_) => "Tour deleted".to_string(),
        Completion::BookingCreated(_) => "Booking created".to_string(),
        Completion::BookingUpdated(_) => "Booking updated".to_string(),
        Completion::BookingDeleted(_) => "Booking deleted".to_string(),
        Completion::BookingsExported(path) => format!("Exported {}", path.display()),
        Completion::ReviewUpdated(review) if review.visible => "Review shown".to_string(),
        Completion::ReviewUpdated(_) => "Review hidden".to_string(),
        Completion::ReviewDeleted(_) => "Review deleted".to_string(),
        _ => return None,
    };
    Some(message)
}
