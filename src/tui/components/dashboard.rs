//! Dashboard: headline figures plus the most recent bookings.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::api::types::Booking;
use crate::core::metrics::DashboardMetrics;
use crate::tui::component::Component;
use crate::tui::components::resource_table::{BOOKING_HEADERS, BOOKING_WIDTHS, booking_row};

pub struct Dashboard<'a> {
    pub metrics: DashboardMetrics,
    pub recent: &'a [Booking],
}

fn card(title: &str, value: String, color: Color) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {title} ")),
    )
}

impl Component for Dashboard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [cards_area, reviews_area, recent_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(cards_area);
        let m = &self.metrics;
        frame.render_widget(card("Users", m.total_users.to_string(), Color::Cyan), cards[0]);
        frame.render_widget(card("Tours", m.total_tours.to_string(), Color::Green), cards[1]);
        frame.render_widget(
            card("Bookings", m.total_bookings.to_string(), Color::Yellow),
            cards[2],
        );
        frame.render_widget(
            card("Revenue", format!("{:.2}", m.revenue), Color::Magenta),
            cards[3],
        );

        frame.render_widget(
            Line::styled(
                format!(
                    " Reviews: {} visible, {} hidden | Pending bookings on this page: {}",
                    m.visible_reviews, m.hidden_reviews, m.pending_bookings
                ),
                Style::default().fg(Color::DarkGray),
            ),
            reviews_area,
        );

        let header = Row::new(BOOKING_HEADERS.iter().copied())
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.recent.iter().map(|b| Row::new(booking_row(b)));
        let table = Table::new(rows, BOOKING_WIDTHS.iter().copied())
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Recent bookings "),
            );
        frame.render_widget(table, recent_area);
    }
}
