//! Left-hand navigation. Digits 1–5 jump to the listed views.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Padding};

use crate::core::route::{NAV_ROUTES, Route};
use crate::tui::component::Component;

pub struct Sidebar<'a> {
    pub active: &'a Route,
}

impl Sidebar<'_> {
    /// The nav entry that owns a route, so detail and form views keep their
    /// parent highlighted.
    fn section(route: &Route) -> Option<usize> {
        let parent = match route {
            Route::TourDetails(_) | Route::AddTour | Route::UpdateTour(_) => &Route::Tours,
            other => other,
        };
        NAV_ROUTES.iter().position(|r| r == parent)
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let active = Self::section(self.active);
        let items: Vec<ListItem> = NAV_ROUTES
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let style = if Some(i) == active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(format!(" {} {}", i + 1, route.title()), style))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::vertical(1));
        frame.render_widget(List::new(items).block(block), area);
    }
}
