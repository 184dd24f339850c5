//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request Flow
//!
//! `update()` never performs I/O. When it returns `Effect::Spawn`, every
//! pending request becomes one tokio task calling `Backend::execute`; the
//! task sends `Action::Settled` back over an `mpsc` channel and the loop
//! feeds it into `update()` on the next tick.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, settlements,
//!   or terminal resize.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use chrono::Datelike;
use log::{info, warn};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use ratatui::widgets::TableState;

use crate::api::backend::Backend;
use crate::api::types::{LoginRequest, TourDraft};
use crate::core::action::{Action, Effect, PendingRequest, update};
use crate::core::form::{Form, booking_schema, login_schema, tour_schema, user_schema};
use crate::core::operation::Operation;
use crate::core::request::Field;
use crate::core::route::{NAV_ROUTES, Route};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConfirmEvent, ConfirmState, FormEditor, FormEvent, FormPurpose,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Selection in whichever table the current view shows.
    pub table: TableState,
    /// Open form, if any. Keys go to it first.
    pub form: Option<FormEditor>,
    /// Pending delete awaiting y/n. Takes precedence over everything.
    pub confirm: Option<ConfirmState>,
    /// Month the bookings export key downloads.
    pub export_month: (i32, u32),
    shown_route: Option<Route>,
}

impl TuiState {
    pub fn new() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            table: TableState::default(),
            form: None,
            confirm: None,
            export_month: (today.year(), today.month()),
            shown_route: None,
        }
    }

    fn selected(&self) -> usize {
        self.table.selected().unwrap_or(0)
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run(mut app: App, backend: Arc<dyn Backend>, start: Route) -> std::io::Result<()> {
    let mut tui = TuiState::new();
    let mut terminal = ratatui::init();

    // Channel for settlements from background tasks
    let (tx, rx) = mpsc::channel();

    let mut should_quit = apply(&mut app, Action::Navigate(start), &backend, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true;

    while !should_quit {
        sync_view(&app, &mut tui);

        let animating = app.is_loading();
        if needs_redraw || animating {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if event == TuiEvent::Resize {
                continue;
            }
            for action in handle_event(&app, &mut tui, &event) {
                should_quit |= apply(&mut app, action, &backend, &tx);
            }
            sync_view(&app, &mut tui);
        }

        // Settlements from spawned requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            should_quit |= apply(&mut app, action, &backend, &tx);
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Runs one action through the reducer and performs its effect.
/// Returns true when the app should quit.
fn apply(
    app: &mut App,
    action: Action,
    backend: &Arc<dyn Backend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::Spawn(pending) => {
            spawn_requests(backend, pending, tx);
            false
        }
        Effect::None => false,
    }
}

/// One task per request; each reports back exactly once.
pub fn spawn_requests(
    backend: &Arc<dyn Backend>,
    pending: Vec<PendingRequest>,
    tx: &mpsc::Sender<Action>,
) {
    for PendingRequest { ticket, operation } in pending {
        let backend = backend.clone();
        let tx = tx.clone();
        let name = operation.name();
        info!("Spawning {}", name);
        tokio::spawn(async move {
            let result = backend.execute(operation).await.map_err(|e| {
                warn!("{} failed: {}", name, e);
                e.payload()
            });
            if tx.send(Action::Settled { ticket, result }).is_err() {
                warn!("Failed to deliver {} result: receiver dropped", name);
            }
        });
    }
}

/// Keeps presentation state in step with the current route: resets the
/// selection on route change, opens route-owned forms, and prefills the
/// update-tour form once the tour has loaded.
pub fn sync_view(app: &App, tui: &mut TuiState) {
    if tui.shown_route.as_ref() != Some(&app.route) {
        tui.table = TableState::default();
        tui.confirm = None;
        tui.form = match &app.route {
            Route::Login => Some(FormEditor::new(FormPurpose::Login, login_schema())),
            Route::AddTour => Some(FormEditor::new(FormPurpose::AddTour, tour_schema())),
            _ => None,
        };
        tui.shown_route = Some(app.route.clone());
    }

    // Prefill only from this mount's fetch; `current` may still hold a copy
    // from an earlier visit while FetchTour is in flight.
    if let Route::UpdateTour(id) = &app.route
        && tui.form.is_none()
        && !app.tours.lifecycle.pending(Field::Current)
        && app.tours.error().is_none()
        && let Some(tour) = app.tours.current.as_ref().filter(|t| &t.id == id)
    {
        let source = serde_json::to_value(TourDraft::from(tour)).unwrap_or_default();
        tui.form = Some(FormEditor::from_form(
            FormPurpose::UpdateTour(id.clone()),
            Form::prefilled(tour_schema(), &source),
        ));
    }
}

/// Translates one key event into the actions it triggers.
pub fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    if *event == TuiEvent::ForceQuit {
        return vec![Action::Quit];
    }

    if let Some(confirm) = tui.confirm.as_mut() {
        match confirm.handle_event(event) {
            Some(ConfirmEvent::Confirm) => {
                return tui
                    .confirm
                    .take()
                    .map(|c| Action::Request(c.operation))
                    .into_iter()
                    .collect();
            }
            Some(ConfirmEvent::Decline) => {
                info!("Declined: {}", confirm.prompt);
                tui.confirm = None;
            }
            None => {}
        }
        return Vec::new();
    }

    if let Some(editor) = tui.form.as_mut() {
        return match editor.handle_event(event) {
            Some(FormEvent::Submit) => {
                let actions = submit_form(editor);
                if !actions.is_empty() && editor.purpose != FormPurpose::Login {
                    tui.form = None;
                }
                actions
            }
            Some(FormEvent::Cancel) => match editor.purpose.clone() {
                FormPurpose::Login => Vec::new(),
                FormPurpose::AddTour | FormPurpose::UpdateTour(_) => {
                    vec![Action::Navigate(Route::Tours)]
                }
                _ => {
                    tui.form = None;
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
    }

    match event {
        TuiEvent::Char('q') => vec![Action::Quit],
        TuiEvent::Char(c @ '1'..='5') => {
            let index = (*c as usize) - ('1' as usize);
            vec![Action::Navigate(NAV_ROUTES[index].clone())]
        }
        TuiEvent::Char('r') => vec![Action::Navigate(app.route.clone())],
        TuiEvent::Char('o') => vec![Action::Request(Operation::Logout)],
        TuiEvent::Up => {
            tui.table.select(Some(tui.selected().saturating_sub(1)));
            Vec::new()
        }
        TuiEvent::Down => {
            let last = row_count(app).saturating_sub(1);
            tui.table.select(Some((tui.selected() + 1).min(last)));
            Vec::new()
        }
        _ => route_keys(app, tui, event),
    }
}

fn row_count(app: &App) -> usize {
    match &app.route {
        Route::Users => app.users.items.len(),
        Route::Tours => app.tours.items.len(),
        Route::Bookings => app.bookings.items.len(),
        Route::Reviews => app.reviews.items.len(),
        Route::TourDetails(_) => app.reviews.by_tour.len(),
        _ => 0,
    }
}

fn route_keys(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    let i = tui.selected();
    match (&app.route, event) {
        // Users
        (Route::Users, TuiEvent::Char('a')) => {
            tui.form = Some(FormEditor::new(FormPurpose::AddUser, user_schema(true)));
            Vec::new()
        }
        (Route::Users, TuiEvent::Char('e')) => {
            if let Some(user) = app.users.items.get(i) {
                let source = serde_json::to_value(user).unwrap_or_default();
                tui.form = Some(FormEditor::from_form(
                    FormPurpose::EditUser(user.id.clone()),
                    Form::prefilled(user_schema(false), &source),
                ));
            }
            Vec::new()
        }
        (Route::Users, TuiEvent::Char('d')) => {
            if let Some(user) = app.users.items.get(i) {
                tui.confirm = Some(ConfirmState::new(
                    format!("Delete user {}?", user.email),
                    Operation::DeleteUser(user.id.clone()),
                ));
            }
            Vec::new()
        }

        // Tours
        (Route::Tours, TuiEvent::Char('a')) => vec![Action::Navigate(Route::AddTour)],
        (Route::Tours, TuiEvent::Enter) => app
            .tours
            .items
            .get(i)
            .map(|t| Action::Navigate(Route::TourDetails(t.id.clone())))
            .into_iter()
            .collect(),
        (Route::Tours, TuiEvent::Char('e')) => app
            .tours
            .items
            .get(i)
            .map(|t| Action::Navigate(Route::UpdateTour(t.id.clone())))
            .into_iter()
            .collect(),
        (Route::Tours, TuiEvent::Char('d')) => {
            if let Some(tour) = app.tours.items.get(i) {
                tui.confirm = Some(ConfirmState::new(
                    format!("Delete tour \"{}\"?", tour.title),
                    Operation::DeleteTour(tour.id.clone()),
                ));
            }
            Vec::new()
        }

        // Tour details
        (Route::TourDetails(id), TuiEvent::Char('e')) => {
            vec![Action::Navigate(Route::UpdateTour(id.clone()))]
        }
        (Route::TourDetails(_), TuiEvent::Char('v')) => app
            .reviews
            .by_tour
            .get(i)
            .map(|r| Action::Request(Operation::ToggleReviewVisibility(r.id.clone())))
            .into_iter()
            .collect(),
        (Route::TourDetails(_), TuiEvent::Char('d')) => {
            if let Some(review) = app.reviews.by_tour.get(i) {
                tui.confirm = Some(ConfirmState::new(
                    "Delete this review?",
                    Operation::DeleteReview(review.id.clone()),
                ));
            }
            Vec::new()
        }
        (Route::TourDetails(_) | Route::UpdateTour(_), TuiEvent::Escape) => {
            vec![Action::Navigate(Route::Tours)]
        }

        // Bookings
        (Route::Bookings, TuiEvent::Left) => {
            let page = app.bookings.pagination.page;
            if page > 1 {
                vec![Action::Request(Operation::FetchBookings {
                    page: page - 1,
                    limit: app.page_size,
                })]
            } else {
                Vec::new()
            }
        }
        (Route::Bookings, TuiEvent::Right) => {
            let meta = app.bookings.pagination;
            if meta.page < meta.pages {
                vec![Action::Request(Operation::FetchBookings {
                    page: meta.page + 1,
                    limit: app.page_size,
                })]
            } else {
                Vec::new()
            }
        }
        (Route::Bookings, TuiEvent::Enter) => app
            .bookings
            .items
            .get(i)
            .map(|b| Action::Request(Operation::FetchBooking(b.id.clone())))
            .into_iter()
            .collect(),
        (Route::Bookings, TuiEvent::Char('e')) => {
            if let Some(booking) = app.bookings.items.get(i) {
                let source = serde_json::to_value(booking).unwrap_or_default();
                tui.form = Some(FormEditor::from_form(
                    FormPurpose::EditBooking(booking.id.clone()),
                    Form::prefilled(booking_schema(), &source),
                ));
            }
            Vec::new()
        }
        (Route::Bookings, TuiEvent::Char('d')) => {
            if let Some(booking) = app.bookings.items.get(i) {
                tui.confirm = Some(ConfirmState::new(
                    format!("Delete booking on {}?", booking.date),
                    Operation::DeleteBooking(booking.id.clone()),
                ));
            }
            Vec::new()
        }
        (Route::Bookings, TuiEvent::Char('<')) => {
            tui.export_month = shift_month(tui.export_month, false);
            Vec::new()
        }
        (Route::Bookings, TuiEvent::Char('>')) => {
            tui.export_month = shift_month(tui.export_month, true);
            Vec::new()
        }
        (Route::Bookings, TuiEvent::Char('x')) => {
            let (year, month) = tui.export_month;
            vec![Action::Request(Operation::DownloadBookings { year, month })]
        }
        (Route::Bookings, TuiEvent::Escape) => vec![Action::ClearBooking],

        // Reviews
        (Route::Reviews, TuiEvent::Char('v')) => app
            .reviews
            .items
            .get(i)
            .map(|r| Action::Request(Operation::ToggleReviewVisibility(r.id.clone())))
            .into_iter()
            .collect(),
        (Route::Reviews, TuiEvent::Char('d')) => {
            if let Some(review) = app.reviews.items.get(i) {
                tui.confirm = Some(ConfirmState::new(
                    "Delete this review?",
                    Operation::DeleteReview(review.id.clone()),
                ));
            }
            Vec::new()
        }
        (Route::Reviews, TuiEvent::Escape) => vec![Action::ClearReviewsError],

        (Route::NotFound(_), TuiEvent::Enter | TuiEvent::Escape) => {
            vec![Action::Navigate(Route::Dashboard)]
        }
        _ => Vec::new(),
    }
}

/// Validates the form and builds the actions its purpose calls for. On a
/// validation error the message is kept on the editor and nothing is sent.
fn submit_form(editor: &mut FormEditor) -> Vec<Action> {
    let form = &editor.form;
    let built = match &editor.purpose {
        FormPurpose::Login => form
            .submit::<LoginRequest>()
            .map(|request| vec![Action::Request(Operation::Login(request))]),
        FormPurpose::AddTour => form.submit::<TourDraft>().map(|draft| {
            vec![
                Action::Request(Operation::CreateTour {
                    draft,
                    uploads: form.uploads(),
                }),
                Action::Navigate(Route::Tours),
            ]
        }),
        FormPurpose::UpdateTour(id) => form.submit::<TourDraft>().map(|draft| {
            vec![
                Action::Request(Operation::UpdateTour {
                    id: id.clone(),
                    draft,
                    uploads: form.uploads(),
                }),
                Action::Navigate(Route::Tours),
            ]
        }),
        FormPurpose::AddUser => form
            .submit()
            .map(|draft| vec![Action::Request(Operation::CreateUser(draft))]),
        FormPurpose::EditUser(id) => form.submit().map(|draft| {
            vec![Action::Request(Operation::UpdateUser {
                id: id.clone(),
                draft,
            })]
        }),
        FormPurpose::EditBooking(id) => form.submit().map(|draft| {
            vec![Action::Request(Operation::UpdateBooking {
                id: id.clone(),
                draft,
            })]
        }),
    };
    match built {
        Ok(actions) => {
            editor.error = None;
            actions
        }
        Err(e) => {
            editor.error = Some(e.to_string());
            Vec::new()
        }
    }
}

fn shift_month((year, month): (i32, u32), forward: bool) -> (i32, u32) {
    match (forward, month) {
        (true, 12) => (year + 1, 1),
        (true, m) => (year, m + 1),
        (false, 1) => (year - 1, 12),
        (false, m) => (year, m - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Booking, Pagination, Tour, User};
    use crate::test_support::{ScriptedBackend, test_app, unauthenticated_app};
    use crate::core::operation::Completion;

    fn press(app: &App, tui: &mut TuiState, events: &[TuiEvent]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|e| handle_event(app, tui, e))
            .collect()
    }

    fn on_route(route: Route) -> (App, TuiState) {
        let mut app = test_app();
        app.route = route;
        let mut tui = TuiState::new();
        sync_view(&app, &mut tui);
        (app, tui)
    }

    fn booking(id: &str) -> Booking {
        Booking {
            id: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_digits_navigate() {
        let (app, mut tui) = on_route(Route::Dashboard);
        assert_eq!(
            press(&app, &mut tui, &[TuiEvent::Char('4')]),
            vec![Action::Navigate(Route::Bookings)]
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut app, mut tui) = on_route(Route::Bookings);
        app.bookings.items = vec![booking("b1"), booking("b2")];

        assert!(press(&app, &mut tui, &[TuiEvent::Char('d')]).is_empty());
        assert!(tui.confirm.is_some());
        assert_eq!(
            press(&app, &mut tui, &[TuiEvent::Char('y')]),
            vec![Action::Request(Operation::DeleteBooking("b1".into()))]
        );
        assert!(tui.confirm.is_none());
    }

    #[test]
    fn test_declined_confirmation_is_a_no_op() {
        let (mut app, mut tui) = on_route(Route::Bookings);
        app.bookings.items = vec![booking("b1")];
        let actions = press(
            &app,
            &mut tui,
            &[TuiEvent::Down, TuiEvent::Char('d'), TuiEvent::Char('n')],
        );
        assert!(actions.is_empty());
        assert!(tui.confirm.is_none());
    }

    #[test]
    fn test_confirm_swallows_other_keys() {
        let (mut app, mut tui) = on_route(Route::Users);
        app.users.items = vec![User {
            id: "u1".into(),
            ..Default::default()
        }];
        press(&app, &mut tui, &[TuiEvent::Char('d')]);
        assert!(press(&app, &mut tui, &[TuiEvent::Char('q')]).is_empty());
        assert!(tui.confirm.is_some());
    }

    #[test]
    fn test_login_form_submits_request() {
        let mut app = unauthenticated_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::Navigate(Route::Users));
        sync_view(&app, &mut tui);
        assert_eq!(
            tui.form.as_ref().map(|f| f.purpose.clone()),
            Some(FormPurpose::Login)
        );

        let mut keys: Vec<TuiEvent> = "me@x.io".chars().map(TuiEvent::Char).collect();
        keys.push(TuiEvent::Tab);
        keys.extend("pw".chars().map(TuiEvent::Char));
        keys.push(TuiEvent::Enter);
        let actions = press(&app, &mut tui, &keys);
        assert_eq!(
            actions,
            vec![Action::Request(Operation::Login(LoginRequest {
                email: "me@x.io".into(),
                password: "pw".into(),
            }))]
        );
        assert!(tui.form.is_some());
    }

    #[test]
    fn test_invalid_form_keeps_editor_open_with_error() {
        let (app, mut tui) = on_route(Route::AddTour);
        let actions = press(&app, &mut tui, &[TuiEvent::Enter]);
        assert!(actions.is_empty());
        let editor = tui.form.as_ref().unwrap();
        assert_eq!(editor.error.as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_add_tour_submit_creates_and_returns_to_list() {
        let (app, mut tui) = on_route(Route::AddTour);
        let keys: Vec<TuiEvent> = "Giza".chars().map(TuiEvent::Char).chain([TuiEvent::Enter]).collect();
        let actions = press(&app, &mut tui, &keys);
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            &actions[0],
            Action::Request(Operation::CreateTour { draft, uploads }) if draft.title == "Giza" && uploads.is_empty()
        ));
        assert_eq!(actions[1], Action::Navigate(Route::Tours));
    }

    #[test]
    fn test_update_tour_form_prefills_once_loaded() {
        let (mut app, mut tui) = on_route(Route::UpdateTour("t1".into()));
        assert!(tui.form.is_none());

        app.tours.current = Some(Tour {
            id: "t1".into(),
            title: "Abu Simbel".into(),
            ..Default::default()
        });
        sync_view(&app, &mut tui);
        let editor = tui.form.as_ref().unwrap();
        assert_eq!(editor.purpose, FormPurpose::UpdateTour("t1".into()));
        assert_eq!(editor.form.value("title"), Some("Abu Simbel"));
    }

    #[test]
    fn test_update_tour_form_waits_for_fresh_fetch() {
        let mut app = test_app();
        app.tours.current = Some(Tour {
            id: "t1".into(),
            title: "Old title".into(),
            ..Default::default()
        });
        let mut tui = TuiState::new();
        let pending = match update(&mut app, Action::Navigate(Route::UpdateTour("t1".into()))) {
            Effect::Spawn(pending) => pending,
            other => panic!("expected Spawn, got {other:?}"),
        };
        sync_view(&app, &mut tui);
        assert!(tui.form.is_none());

        update(
            &mut app,
            Action::Settled {
                ticket: pending[0].ticket,
                result: Ok(Completion::Tour(Tour {
                    id: "t1".into(),
                    title: "New title".into(),
                    ..Default::default()
                })),
            },
        );
        sync_view(&app, &mut tui);
        let editor = tui.form.as_ref().unwrap();
        assert_eq!(editor.form.value("title"), Some("New title"));
    }

    #[test]
    fn test_edit_booking_prefills_and_submits_update() {
        let (mut app, mut tui) = on_route(Route::Bookings);
        app.bookings.items = vec![Booking {
            id: "b1".into(),
            date: "2024-05-01".into(),
            amount: 90.0,
            ..Default::default()
        }];
        press(&app, &mut tui, &[TuiEvent::Char('e')]);
        let editor = tui.form.as_ref().unwrap();
        assert_eq!(editor.form.value("amount"), Some("90"));

        let actions = press(&app, &mut tui, &[TuiEvent::Enter]);
        match &actions[..] {
            [Action::Request(Operation::UpdateBooking { id, draft })] => {
                assert_eq!(id, "b1");
                assert_eq!(draft.amount, Some(90.0));
                assert_eq!(draft.date.as_deref(), Some("2024-05-01"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(tui.form.is_none());
    }

    #[test]
    fn test_paging_respects_bounds() {
        let (mut app, mut tui) = on_route(Route::Bookings);
        app.bookings.pagination = Pagination {
            page: 1,
            pages: 2,
            ..Default::default()
        };
        assert!(press(&app, &mut tui, &[TuiEvent::Left]).is_empty());
        assert_eq!(
            press(&app, &mut tui, &[TuiEvent::Right]),
            vec![Action::Request(Operation::FetchBookings { page: 2, limit: 10 })]
        );
        app.bookings.pagination.page = 2;
        assert!(press(&app, &mut tui, &[TuiEvent::Right]).is_empty());
    }

    #[test]
    fn test_export_month_shifts_across_years() {
        let (app, mut tui) = on_route(Route::Bookings);
        tui.export_month = (2024, 1);
        let actions = press(
            &app,
            &mut tui,
            &[TuiEvent::Char('<'), TuiEvent::Char('x')],
        );
        assert_eq!(
            actions,
            vec![Action::Request(Operation::DownloadBookings {
                year: 2023,
                month: 12
            })]
        );
        assert_eq!(shift_month((2023, 12), true), (2024, 1));
    }

    #[test]
    fn test_route_change_resets_selection() {
        let (mut app, mut tui) = on_route(Route::Users);
        tui.table.select(Some(3));
        app.route = Route::Reviews;
        sync_view(&app, &mut tui);
        assert_eq!(tui.table.selected(), None);
    }

    #[tokio::test]
    async fn test_spawned_request_settles_through_channel() {
        let backend: Arc<dyn Backend> = Arc::new(ScriptedBackend::new(vec![Ok(
            Completion::Users(vec![User {
                id: "u1".into(),
                ..Default::default()
            }]),
        )]));
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();

        assert!(!apply(
            &mut app,
            Action::Request(Operation::FetchUsers),
            &backend,
            &tx
        ));
        assert!(app.users.loading());

        let settled = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        apply(&mut app, settled, &backend, &tx);
        assert!(!app.users.loading());
        assert_eq!(app.users.items.len(), 1);
    }
}
