//! # TitleBar Component
//!
//! Top status bar: view title, signed-in user, status message, and a spinner
//! while any container has a request in flight.
//!
//! The title text changes based on state:
//!
//! 1. **Loading**: `"Tourdesk | Tours | admin@x.io | ⠋ Tours"`
//! 2. **Status message**: `"Tourdesk | Tours | admin@x.io | Tour deleted"`
//! 3. **Default**: `"Tourdesk | Tours"`
//!
//! Stateless: all data arrives as props.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    pub view_title: String,
    pub user: Option<String>,
    pub status_message: String,
    pub loading: bool,
    pub spinner_frame: usize,
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Tourdesk",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" | {}", self.view_title)),
        ];
        if let Some(user) = &self.user {
            spans.push(Span::styled(
                format!(" | {user}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.loading {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!(" | {glyph} {}", self.status_message),
                Style::default().fg(Color::Yellow),
            ));
        } else if !self.status_message.is_empty() {
            let style = if self.status_message.starts_with("Error") {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" | {}", self.status_message), style));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
