//! # ResourceTable Component
//!
//! One table widget for every list view. Each resource supplies headers,
//! column widths, and a row builder; the table handles selection, the
//! loading placeholder, and the inline error line.
//!
//! Follows the persistent state + transient wrapper pattern: the
//! `TableState` lives in `TuiState`, the table is rebuilt each frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use crate::api::types::{Booking, Ref, Review, Tour, User};
use crate::tui::component::Component;

pub struct ResourceTable<'a> {
    pub title: String,
    pub headers: &'static [&'static str],
    pub widths: &'static [Constraint],
    pub rows: Vec<Vec<String>>,
    pub state: &'a mut TableState,
    pub loading: bool,
    pub error: Option<String>,
    pub footer: Option<String>,
}

impl Component for ResourceTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let error_height = u16::from(self.error.is_some());
        let footer_height = u16::from(self.footer.is_some());
        let [error_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(error_height),
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .areas(inner);

        if let Some(error) = &self.error {
            frame.render_widget(
                Line::styled(format!("Error: {error}"), Style::default().fg(Color::Red)),
                error_area,
            );
        }
        if let Some(footer) = &self.footer {
            frame.render_widget(
                Line::styled(footer.as_str(), Style::default().fg(Color::DarkGray)),
                footer_area,
            );
        }

        if self.rows.is_empty() {
            let text = if self.loading {
                "Loading…"
            } else {
                "Nothing here yet."
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                table_area,
            );
            return;
        }

        let last = self.rows.len() - 1;
        match self.state.selected() {
            None => self.state.select(Some(0)),
            Some(i) if i > last => self.state.select(Some(last)),
            Some(_) => {}
        }

        let header = Row::new(self.headers.iter().copied())
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.rows.iter().map(|cells| Row::new(cells.clone()));
        let table = Table::new(rows, self.widths.iter().copied())
            .header(header)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(table, table_area, self.state);
    }
}

// ============================================================================
// Per-resource columns
// ============================================================================

pub const USER_HEADERS: &[&str] = &["Name", "Email", "Role", "Phone"];
pub const USER_WIDTHS: &[Constraint] = &[
    Constraint::Percentage(25),
    Constraint::Percentage(35),
    Constraint::Percentage(15),
    Constraint::Percentage(25),
];

pub fn user_row(user: &User) -> Vec<String> {
    vec![
        user.name.clone(),
        user.email.clone(),
        user.role.clone().unwrap_or_default(),
        user.phone.clone().unwrap_or_default(),
    ]
}

pub const TOUR_HEADERS: &[&str] = &["Title", "City", "Duration", "Type", "Availability"];
pub const TOUR_WIDTHS: &[Constraint] = &[
    Constraint::Percentage(35),
    Constraint::Percentage(15),
    Constraint::Percentage(15),
    Constraint::Percentage(15),
    Constraint::Percentage(20),
];

pub fn tour_row(tour: &Tour) -> Vec<String> {
    vec![
        tour.title.clone(),
        tour.city.clone(),
        tour.duration.clone(),
        tour.kind.clone(),
        tour.availability.clone(),
    ]
}

pub const BOOKING_HEADERS: &[&str] = &["Date", "Time", "Tour", "Customer", "Status", "Amount"];
pub const BOOKING_WIDTHS: &[Constraint] = &[
    Constraint::Length(12),
    Constraint::Length(7),
    Constraint::Percentage(30),
    Constraint::Percentage(25),
    Constraint::Length(10),
    Constraint::Length(10),
];

pub fn booking_row(booking: &Booking) -> Vec<String> {
    vec![
        booking.date.clone(),
        booking.time.clone().unwrap_or_default(),
        tour_label(booking.tour.as_ref()),
        user_label(booking.user.as_ref()),
        booking.status.as_str().to_string(),
        format!("{:.2}", booking.amount),
    ]
}

pub const REVIEW_HEADERS: &[&str] = &["Tour", "User", "Rating", "Visible", "Comment"];
pub const REVIEW_WIDTHS: &[Constraint] = &[
    Constraint::Percentage(22),
    Constraint::Percentage(18),
    Constraint::Length(6),
    Constraint::Length(7),
    Constraint::Min(10),
];

pub fn review_row(review: &Review) -> Vec<String> {
    vec![
        tour_label(review.tour.as_ref()),
        user_label(review.user.as_ref()),
        format!("{:.1}", review.rating),
        if review.visible { "yes" } else { "no" }.to_string(),
        review.comment.clone(),
    ]
}

/// Embedded references show a name; bare ids show the id.
fn user_label(user: Option<&Ref<User>>) -> String {
    match user {
        Some(Ref::Embedded(u)) if !u.name.is_empty() => u.name.clone(),
        Some(Ref::Embedded(u)) => u.email.clone(),
        Some(Ref::Id(id)) => id.clone(),
        None => "-".to_string(),
    }
}

fn tour_label(tour: Option<&Ref<Tour>>) -> String {
    match tour {
        Some(Ref::Embedded(t)) => t.title.clone(),
        Some(Ref::Id(id)) => id.clone(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BookingStatus;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(table: ResourceTable<'_>) -> String {
        let mut table = table;
        let backend = TestBackend::new(100, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| table.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_booking_row_prefers_embedded_names() {
        let booking = Booking {
            id: "b1".into(),
            user: Some(Ref::Embedded(User {
                id: "u1".into(),
                name: "Ada".into(),
                ..Default::default()
            })),
            tour: Some(Ref::Id("t1".into())),
            date: "2024-06-01".into(),
            status: BookingStatus::Confirmed,
            amount: 120.0,
            ..Default::default()
        };
        let row = booking_row(&booking);
        assert_eq!(row[2], "t1");
        assert_eq!(row[3], "Ada");
        assert_eq!(row[4], "confirmed");
        assert_eq!(row[5], "120.00");
    }

    #[test]
    fn test_table_renders_rows_and_error() {
        let mut state = TableState::default();
        let text = screen(ResourceTable {
            title: "Users".into(),
            headers: USER_HEADERS,
            widths: USER_WIDTHS,
            rows: vec![user_row(&User {
                id: "u1".into(),
                name: "Grace".into(),
                email: "grace@x.io".into(),
                ..Default::default()
            })],
            state: &mut state,
            loading: false,
            error: Some("Forbidden".into()),
            footer: None,
        });
        assert!(text.contains("Grace"));
        assert!(text.contains("Error: Forbidden"));
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_empty_table_shows_loading() {
        let mut state = TableState::default();
        let text = screen(ResourceTable {
            title: "Tours".into(),
            headers: TOUR_HEADERS,
            widths: TOUR_WIDTHS,
            rows: Vec::new(),
            state: &mut state,
            loading: true,
            error: None,
            footer: Some("Page 1 of 1".into()),
        });
        assert!(text.contains("Loading…"));
        assert!(text.contains("Page 1 of 1"));
    }
}
