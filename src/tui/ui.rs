use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::metrics::{DashboardMetrics, recent_bookings};
use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::confirm::centered_rect;
use crate::tui::components::resource_table::{
    BOOKING_HEADERS, BOOKING_WIDTHS, REVIEW_HEADERS, REVIEW_WIDTHS, TOUR_HEADERS, TOUR_WIDTHS,
    USER_HEADERS, USER_WIDTHS, booking_row, review_row, tour_row, user_row,
};
use crate::tui::components::{
    ConfirmDialog, Dashboard, ResourceTable, Sidebar, TitleBar, TourDetails,
};

const RECENT_BOOKINGS: usize = 8;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let screen = frame.area();
    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(screen);

    TitleBar {
        view_title: app.route.title().to_string(),
        user: app.session.email.clone(),
        status_message: app.status_message.clone(),
        loading: app.is_loading(),
        spinner_frame,
    }
    .render(frame, title_area);

    if app.route == Route::Login {
        draw_login(frame, body_area, app, tui);
    } else {
        let [side_area, main_area] = Layout::horizontal([Length(16), Min(0)]).areas(body_area);
        Sidebar { active: &app.route }.render(frame, side_area);
        draw_main(frame, main_area, app, tui);
    }

    frame.render_widget(
        Line::styled(help_text(&app.route, tui), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(confirm) = &tui.confirm {
        ConfirmDialog { state: confirm }.render(frame, screen);
    }
}

fn draw_login(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let panel = centered_rect(60, 50, area);
    let [form_area, message_area] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(1)]).areas(panel);

    if let Some(editor) = tui.form.as_mut() {
        editor.render(frame, form_area);
    }

    let message = if app.session.loading() {
        Some(Line::styled("Signing in…", Style::default().fg(Color::Yellow)))
    } else {
        app.session
            .error()
            .map(|e| Line::styled(e.to_string(), Style::default().fg(Color::Red)))
    };
    if let Some(line) = message {
        frame.render_widget(line.alignment(Alignment::Center), message_area);
    }
}

fn draw_main(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    if let Some(editor) = tui.form.as_mut() {
        editor.render(frame, area);
        return;
    }

    match &app.route {
        Route::Dashboard => Dashboard {
            metrics: DashboardMetrics::compute(app),
            recent: recent_bookings(app, RECENT_BOOKINGS),
        }
        .render(frame, area),
        Route::Users => ResourceTable {
            title: format!("Users ({})", app.users.items.len()),
            headers: USER_HEADERS,
            widths: USER_WIDTHS,
            rows: app.users.items.iter().map(user_row).collect(),
            state: &mut tui.table,
            loading: app.users.loading(),
            error: app.users.error().map(ToString::to_string),
            footer: None,
        }
        .render(frame, area),
        Route::Tours => ResourceTable {
            title: format!("Tours ({})", app.tours.items.len()),
            headers: TOUR_HEADERS,
            widths: TOUR_WIDTHS,
            rows: app.tours.items.iter().map(tour_row).collect(),
            state: &mut tui.table,
            loading: app.tours.loading(),
            error: app.tours.error().map(ToString::to_string),
            footer: None,
        }
        .render(frame, area),
        Route::TourDetails(id) => TourDetails {
            tour: app.tours.current.as_ref().filter(|t| &t.id == id),
            reviews: &app.reviews.by_tour,
            review_state: &mut tui.table,
            loading: app.tours.loading() || app.reviews.loading(),
            error: app.tours.error().map(ToString::to_string),
            reviews_error: app.reviews.error().map(ToString::to_string),
        }
        .render(frame, area),
        Route::Bookings => ResourceTable {
            title: "Bookings".to_string(),
            headers: BOOKING_HEADERS,
            widths: BOOKING_WIDTHS,
            rows: app.bookings.items.iter().map(booking_row).collect(),
            state: &mut tui.table,
            loading: app.bookings.loading(),
            error: app.bookings.error().map(ToString::to_string),
            footer: Some(bookings_footer(app, tui.export_month)),
        }
        .render(frame, area),
        Route::Reviews => ResourceTable {
            title: format!("Reviews ({})", app.reviews.items.len()),
            headers: REVIEW_HEADERS,
            widths: REVIEW_WIDTHS,
            rows: app.reviews.items.iter().map(review_row).collect(),
            state: &mut tui.table,
            loading: app.reviews.loading(),
            error: app.reviews.error().map(ToString::to_string),
            footer: None,
        }
        .render(frame, area),
        Route::UpdateTour(_) => {
            let text = match app.tours.error() {
                Some(e) => format!("Error: {e}"),
                None => "Loading tour…".to_string(),
            };
            frame.render_widget(bordered(text, " Update Tour "), area);
        }
        Route::NotFound(path) => {
            let text = format!("404: nothing at {path}. Press Enter for the dashboard.");
            frame.render_widget(bordered(text, " Not Found "), area);
        }
        // Login and AddTour always have a form open.
        Route::Login | Route::AddTour => {}
    }
}

fn bordered(text: String, title: &'static str) -> Paragraph<'static> {
    Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    )
}

fn bookings_footer(app: &App, (year, month): (i32, u32)) -> String {
    let meta = app.bookings.pagination;
    let mut footer = format!(
        "Page {} of {} | {} bookings | total {:.2} | export {year}-{month:02}",
        meta.page,
        meta.pages.max(1),
        meta.total,
        meta.total_amount
    );
    if let Some(current) = &app.bookings.current {
        footer.push_str(&format!(
            " | open: {} {} {}",
            current.date,
            current.status.as_str(),
            current.contact.as_deref().unwrap_or("")
        ));
    }
    if let Some(path) = &app.bookings.last_export {
        footer.push_str(&format!(" | saved {}", path.display()));
    }
    footer
}

fn help_text(route: &Route, tui: &TuiState) -> &'static str {
    if tui.confirm.is_some() {
        return " y confirm  n cancel";
    }
    if tui.form.is_some() {
        return " Enter save  Esc cancel  Tab/↑↓ move  Space cycle choice";
    }
    match route {
        Route::Users => " a add  e edit  d delete  r refresh  1-5 views  o logout  q quit",
        Route::Tours => " Enter details  a add  e edit  d delete  r refresh  1-5 views  q quit",
        Route::TourDetails(_) => " e edit  v show/hide review  d delete review  Esc back",
        Route::Bookings => {
            " ←/→ page  Enter open  e edit  d delete  x export  </> month  Esc clear  q quit"
        }
        Route::Reviews => " v show/hide  d delete  Esc clear error  r refresh  q quit",
        Route::UpdateTour(_) => " Esc back",
        _ => " 1-5 views  r refresh  o logout  q quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Booking, Pagination, Review};
    use crate::test_support::{test_app, unauthenticated_app};
    use crate::tui::sync_view;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        sync_view(app, tui);
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_login_screen() {
        let app = unauthenticated_app();
        let text = screen(&app, &mut TuiState::new());
        assert!(text.contains("Sign in"));
        assert!(text.contains("Email"));
        assert!(!text.contains("Dashboard"));
    }

    #[test]
    fn test_bookings_view_shows_pagination() {
        let mut app = test_app();
        app.route = Route::Bookings;
        app.bookings.items = vec![Booking {
            id: "b1".into(),
            date: "2024-08-15".into(),
            ..Default::default()
        }];
        app.bookings.pagination = Pagination {
            page: 2,
            pages: 4,
            total: 31,
            limit: 10,
            total_amount: 777.0,
        };
        let mut tui = TuiState::new();
        tui.export_month = (2024, 8);
        let text = screen(&app, &mut tui);
        assert!(text.contains("2024-08-15"));
        assert!(text.contains("Page 2 of 4"));
        assert!(text.contains("777.00"));
        assert!(text.contains("export 2024-08"));
    }

    #[test]
    fn test_reviews_error_rendered_inline() {
        let mut app = test_app();
        app.route = Route::Reviews;
        app.reviews.items = vec![Review {
            id: "r1".into(),
            comment: "Lovely".into(),
            ..Default::default()
        }];
        app.reviews.lifecycle.error = Some("Review not found".into());
        let text = screen(&app, &mut TuiState::new());
        assert!(text.contains("Lovely"));
        assert!(text.contains("Error: Review not found"));
    }

    #[test]
    fn test_confirm_overlay_drawn_on_top() {
        let mut app = test_app();
        app.route = Route::Users;
        let mut tui = TuiState::new();
        sync_view(&app, &mut tui);
        tui.confirm = Some(crate::tui::components::ConfirmState::new(
            "Delete user ada@x.io?",
            crate::core::operation::Operation::DeleteUser("u1".into()),
        ));
        let text = screen(&app, &mut tui);
        assert!(text.contains("Delete user ada@x.io?"));
        assert!(text.contains("y confirm"));
    }

    #[test]
    fn test_not_found_and_dashboard_render() {
        let mut app = test_app();
        app.route = Route::NotFound("/nope".into());
        assert!(screen(&app, &mut TuiState::new()).contains("/nope"));

        app.route = Route::Dashboard;
        let text = screen(&app, &mut TuiState::new());
        assert!(text.contains("Revenue"));
        assert!(text.contains("Recent bookings"));
    }
}
