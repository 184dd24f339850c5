//! Single tour: descriptive fields, the full price grid, and its reviews.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};

use crate::api::types::{PriceCategory, PriceTier, Review, Tour};
use crate::tui::component::Component;
use crate::tui::components::resource_table::{
    REVIEW_HEADERS, REVIEW_WIDTHS, ResourceTable, review_row,
};

pub struct TourDetails<'a> {
    pub tour: Option<&'a Tour>,
    pub reviews: &'a [Review],
    pub review_state: &'a mut TableState,
    pub loading: bool,
    pub error: Option<String>,
    pub reviews_error: Option<String>,
}

fn field<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:>14}  "), Style::default().fg(Color::Cyan)),
        Span::raw(value),
    ])
}

fn price_table(tour: &Tour) -> Table<'static> {
    let header = Row::new(
        std::iter::once("".to_string()).chain(PriceTier::ALL.iter().map(|t| t.label().to_string())),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = PriceCategory::ALL.iter().map(|&category| {
        Row::new(
            std::iter::once(category.label().to_string()).chain(
                PriceTier::ALL
                    .iter()
                    .map(|&tier| format!("{:.2}", tour.prices.get(category, tier))),
            ),
        )
    });
    let widths = std::iter::once(Constraint::Length(28))
        .chain(std::iter::repeat_n(Constraint::Length(13), PriceTier::ALL.len()));
    Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::TOP)
            .title(" Prices "),
    )
}

impl Component for TourDetails<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(tour) = self.tour else {
            let text = match &self.error {
                Some(error) => format!("Error: {error}"),
                None if self.loading => "Loading…".to_string(),
                None => "Tour not found.".to_string(),
            };
            frame.render_widget(
                Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Tour ")),
                area,
            );
            return;
        };

        let [info_area, prices_area, reviews_area] = Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Length(6),
            Constraint::Min(4),
        ])
        .areas(area);

        let languages = tour.languages.join(", ");
        let media = tour.media.len().to_string();
        let lines = vec![
            field("City", &tour.city),
            field("Duration", &tour.duration),
            field("Type", &tour.kind),
            field("Availability", &tour.availability),
            field("Full day", &tour.full_day),
            field("Pick-up", &tour.pick_up_and_drop_off),
            field("Languages", &languages),
            field("Media files", &media),
            field("Description", &tour.description),
            field("Details", &tour.details),
            field("Note", &tour.note),
        ];
        let info = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", tour.title)),
        );
        frame.render_widget(info, info_area);
        frame.render_widget(price_table(tour), prices_area);

        ResourceTable {
            title: format!("Reviews ({})", self.reviews.len()),
            headers: REVIEW_HEADERS,
            widths: REVIEW_WIDTHS,
            rows: self.reviews.iter().map(review_row).collect(),
            state: &mut *self.review_state,
            loading: self.loading,
            error: self.reviews_error.clone(),
            footer: None,
        }
        .render(frame, reviews_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{PriceTable, PriceTiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(mut details: TourDetails<'_>) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| details.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_prices_and_reviews() {
        let tour = Tour {
            id: "t1".into(),
            title: "Nile Cruise".into(),
            city: "Luxor".into(),
            prices: PriceTable {
                private_tour_guide: PriceTiers {
                    two_people: 80.0,
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let reviews = vec![Review {
            id: "r1".into(),
            comment: "Wonderful".into(),
            rating: 5.0,
            ..Default::default()
        }];
        let mut state = TableState::default();
        let text = screen(TourDetails {
            tour: Some(&tour),
            reviews: &reviews,
            review_state: &mut state,
            loading: false,
            error: None,
            reviews_error: None,
        });
        assert!(text.contains("Nile Cruise"));
        assert!(text.contains("Luxor"));
        assert!(text.contains("80.00"));
        assert!(text.contains("Wonderful"));
    }

    #[test]
    fn test_missing_tour_shows_error() {
        let mut state = TableState::default();
        let text = screen(TourDetails {
            tour: None,
            reviews: &[],
            review_state: &mut state,
            loading: false,
            error: Some("Tour not found".into()),
            reviews_error: None,
        });
        assert!(text.contains("Error: Tour not found"));
    }
}
