//! Confirmation overlay for destructive actions.
//!
//! `y` confirms; `n` or Esc declines. Declining drops the pending operation
//! without touching any container.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::operation::Operation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmState {
    pub prompt: String,
    pub operation: Operation,
}

#[derive(Debug, PartialEq)]
pub enum ConfirmEvent {
    Confirm,
    Decline,
}

impl ConfirmState {
    pub fn new(prompt: impl Into<String>, operation: Operation) -> Self {
        Self {
            prompt: prompt.into(),
            operation,
        }
    }
}

impl EventHandler for ConfirmState {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ConfirmEvent> {
        match event {
            TuiEvent::Char('y') | TuiEvent::Char('Y') => Some(ConfirmEvent::Confirm),
            TuiEvent::Char('n') | TuiEvent::Char('N') | TuiEvent::Escape => {
                Some(ConfirmEvent::Decline)
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the overlay.
pub struct ConfirmDialog<'a> {
    pub state: &'a ConfirmState,
}

impl Component for ConfirmDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm ")
            .title_bottom(Line::from(" y Yes  n No ").centered())
            .padding(Padding::uniform(1));
        let body = Paragraph::new(self.state.prompt.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
