//! # Form View
//!
//! Renders any `core::form::Form` and edits it in place. What happens on
//! submit is decided by the caller from `FormPurpose`.
//!
//! Keys: Up/Down or Tab/Shift+Tab move between fields, typing edits the
//! focused field, Space or Left/Right cycle a choice field, Enter submits,
//! Esc cancels.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::form::{FieldKind, Form, FormSchema};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// What a submitted form turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPurpose {
    Login,
    AddTour,
    UpdateTour(String),
    AddUser,
    EditUser(String),
    EditBooking(String),
}

#[derive(Debug, PartialEq)]
pub enum FormEvent {
    Submit,
    Cancel,
}

pub struct FormEditor {
    pub purpose: FormPurpose,
    pub form: Form,
    pub focus: usize,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
    list_state: ListState,
}

impl FormEditor {
    pub fn new(purpose: FormPurpose, schema: FormSchema) -> Self {
        Self::from_form(purpose, Form::new(schema))
    }

    pub fn from_form(purpose: FormPurpose, form: Form) -> Self {
        Self {
            purpose,
            form,
            focus: 0,
            error: None,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn focused_kind(&self) -> Option<&FieldKind> {
        self.form.field(self.focus).map(|f| &f.kind)
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.form.len();
        if len == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        self.list_state.select(Some(self.focus));
    }
}

impl EventHandler for FormEditor {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        let is_choice = matches!(self.focused_kind(), Some(FieldKind::Choice(_)));
        match event {
            TuiEvent::Enter => return Some(FormEvent::Submit),
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            TuiEvent::Down | TuiEvent::Tab => self.move_focus(true),
            TuiEvent::Up | TuiEvent::BackTab => self.move_focus(false),
            TuiEvent::Char(' ') | TuiEvent::Left | TuiEvent::Right if is_choice => {
                self.form.cycle_choice(self.focus);
            }
            TuiEvent::Char(c) if !is_choice => {
                if let Some(value) = self.form.value_at_mut(self.focus) {
                    value.push(*c);
                }
            }
            TuiEvent::Backspace if !is_choice => {
                if let Some(value) = self.form.value_at_mut(self.focus) {
                    value.pop();
                }
            }
            _ => {}
        }
        None
    }
}

impl Component for FormEditor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.form.title()))
            .title_bottom(Line::from(" Enter Save  Esc Cancel  Tab Next ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let error_height = u16::from(self.error.is_some());
        let [error_area, list_area] =
            Layout::vertical([Constraint::Length(error_height), Constraint::Min(0)]).areas(inner);

        if let Some(error) = &self.error {
            frame.render_widget(
                Line::styled(error.as_str(), Style::default().fg(Color::Red)),
                error_area,
            );
        }

        let label_width = self
            .form
            .fields()
            .map(|(f, _)| f.label.width() + usize::from(f.required))
            .max()
            .unwrap_or(0);

        // label, two spaces, cursor
        let value_width = (list_area.width as usize).saturating_sub(label_width + 3);
        let items: Vec<ListItem> = self
            .form
            .fields()
            .enumerate()
            .map(|(i, (field, value))| {
                let marker = if field.required { "*" } else { "" };
                let label = format!("{:>width$}", format!("{}{marker}", field.label), width = label_width);
                let shown = match &field.kind {
                    FieldKind::Secret => "•".repeat(value.chars().count()),
                    FieldKind::Choice(_) => format!("< {value} >"),
                    _ => value.to_string(),
                };
                let shown = visible_tail(&shown, value_width);
                let focused = i == self.focus;
                let value_style = if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                let cursor = if focused && !matches!(field.kind, FieldKind::Choice(_)) {
                    "▏"
                } else {
                    ""
                };
                ListItem::new(Line::from(vec![
                    Span::styled(label, Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::styled(format!("{shown}{cursor}"), value_style),
                ]))
            })
            .collect();

        frame.render_stateful_widget(List::new(items), list_area, &mut self.list_state);
    }
}

/// Keeps the end of `text` (where typing happens) within `max_width` columns.
fn visible_tail(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut used = 1;
    let mut kept = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        kept.push(c);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{booking_schema, login_schema};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_visible_tail_keeps_end_of_long_values() {
        assert_eq!(visible_tail("short", 10), "short");
        assert_eq!(visible_tail("abcdefghij", 5), "…ghij");
        // Wide characters count as two columns.
        assert_eq!(visible_tail("日本語です", 5), "…です");
    }

    fn type_text(editor: &mut FormEditor, text: &str) {
        for c in text.chars() {
            editor.handle_event(&TuiEvent::Char(c));
        }
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut editor = FormEditor::new(FormPurpose::Login, login_schema());
        type_text(&mut editor, "ab");
        editor.handle_event(&TuiEvent::Backspace);
        editor.handle_event(&TuiEvent::Tab);
        type_text(&mut editor, "pw");
        assert_eq!(editor.form.value("email"), Some("a"));
        assert_eq!(editor.form.value("password"), Some("pw"));
    }

    #[test]
    fn test_focus_wraps() {
        let mut editor = FormEditor::new(FormPurpose::Login, login_schema());
        editor.handle_event(&TuiEvent::Up);
        assert_eq!(editor.focus, 1);
        editor.handle_event(&TuiEvent::Down);
        assert_eq!(editor.focus, 0);
    }

    #[test]
    fn test_choice_field_cycles_instead_of_typing() {
        let mut editor = FormEditor::new(FormPurpose::EditBooking("b1".into()), booking_schema());
        editor.focus = 3;
        editor.handle_event(&TuiEvent::Char('x'));
        assert_eq!(editor.form.value("status"), Some("pending"));
        editor.handle_event(&TuiEvent::Char(' '));
        assert_eq!(editor.form.value("status"), Some("confirmed"));
    }

    #[test]
    fn test_enter_and_escape() {
        let mut editor = FormEditor::new(FormPurpose::Login, login_schema());
        assert_eq!(editor.handle_event(&TuiEvent::Enter), Some(FormEvent::Submit));
        assert_eq!(editor.handle_event(&TuiEvent::Escape), Some(FormEvent::Cancel));
    }

    #[test]
    fn test_secret_is_masked() {
        let mut editor = FormEditor::new(FormPurpose::Login, login_schema());
        editor.form.set("password", "hunter2");
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| editor.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Sign in"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("•••••••"));
    }
}
