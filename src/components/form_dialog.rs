//! Form dialog component
//!
//! Renders one of the login, registration or quiz forms and edits its fields.
//! Submitting only emits `Action::SubmitForm`; reading the values and talking
//! to the backend is the App's job.

use crate::action::Action;
use crate::component::Component;
use crate::model::{FormKind, QuizQuestion};
use crate::services::FormValues;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const DIALOG_WIDTH: u16 = 64;

/// How a field takes input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text { value: String, secret: bool },
    Choice { options: Vec<String>, selected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub input: FieldInput,
}

impl FormField {
    pub fn text(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            input: FieldInput::Text {
                value: String::new(),
                secret: false,
            },
        }
    }

    pub fn secret(key: &str, label: &str) -> Self {
        Self {
            input: FieldInput::Text {
                value: String::new(),
                secret: true,
            },
            ..Self::text(key, label)
        }
    }

    pub fn choice(key: &str, label: &str, options: Vec<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            input: FieldInput::Choice {
                options,
                selected: 0,
            },
        }
    }

    pub fn value(&self) -> String {
        match &self.input {
            FieldInput::Text { value, .. } => value.clone(),
            FieldInput::Choice { options, selected } => {
                options.get(*selected).cloned().unwrap_or_default()
            }
        }
    }

    /// What the user sees; secrets are masked
    pub fn display_value(&self) -> String {
        match &self.input {
            FieldInput::Text {
                value,
                secret: true,
            } => "•".repeat(value.chars().count()),
            FieldInput::Text { value, .. } => value.clone(),
            FieldInput::Choice { .. } => format!("◀ {} ▶", self.value()),
        }
    }

    fn clear(&mut self) {
        match &mut self.input {
            FieldInput::Text { value, .. } => value.clear(),
            FieldInput::Choice { selected, .. } => *selected = 0,
        }
    }
}

pub struct FormDialog {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormDialog {
    pub fn new(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn login() -> Self {
        Self::new(
            FormKind::Login,
            vec![
                FormField::text("email", "Email"),
                FormField::secret("password", "Password"),
            ],
        )
    }

    pub fn register() -> Self {
        Self::new(
            FormKind::Register,
            vec![
                FormField::text("name", "Full name"),
                FormField::text("email", "Email"),
                FormField::text("year", "Graduation year"),
                FormField::secret("password", "Password"),
            ],
        )
    }

    pub fn quiz(questions: &[QuizQuestion]) -> Self {
        Self::new(
            FormKind::Quiz,
            questions
                .iter()
                .map(|q| FormField::choice(&q.id, &q.prompt, q.options.clone()))
                .collect(),
        )
    }

    /// Current field values keyed by field id
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.key.clone(), f.value()))
            .collect()
    }

    /// Reset every field and focus the first one
    pub fn clear(&mut self) {
        self.fields.iter_mut().for_each(FormField::clear);
        self.focus = 0;
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Dialog size in cells: two lines per field plus borders, spacing and help line
    pub fn size(&self) -> (u16, u16) {
        (DIALOG_WIDTH, self.fields.len() as u16 * 2 + 5)
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    fn input_char(&mut self, c: char) {
        if let Some(FieldInput::Text { value, .. }) = self.focused_mut().map(|f| &mut f.input) {
            value.push(c);
        }
    }

    fn backspace(&mut self) {
        if let Some(FieldInput::Text { value, .. }) = self.focused_mut().map(|f| &mut f.input) {
            value.pop();
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        if let Some(FieldInput::Choice { options, selected }) =
            self.focused_mut().map(|f| &mut f.input)
        {
            if options.is_empty() {
                return;
            }
            *selected = if forward {
                (*selected + 1) % options.len()
            } else {
                (*selected + options.len() - 1) % options.len()
            };
        }
    }
}

impl Component for FormDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitForm(self.kind)),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::Right => {
                self.cycle_choice(true);
                None
            }
            KeyCode::Left => {
                self.cycle_choice(false);
                None
            }
            KeyCode::Backspace => {
                self.backspace();
                None
            }
            KeyCode::Char(c) => {
                self.input_char(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let mut lines = vec![Line::from("")];
        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(format!(" {}", field.label), label_style)));

            let cursor = if focused && matches!(field.input, FieldInput::Text { .. }) {
                "_"
            } else {
                ""
            };
            lines.push(Line::from(vec![
                Span::styled(
                    if focused { " > " } else { "   " },
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{}{}", field.display_value(), cursor),
                    Style::default().fg(Color::White),
                ),
            ]));
        }
        lines.push(Line::from(""));

        let submit_label = match self.kind {
            FormKind::Login => "Log in",
            FormKind::Register => "Create account",
            FormKind::Quiz => "Get my roadmap",
        };
        let mut help = vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}  ", submit_label)),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Next field  "),
        ];
        if self.kind == FormKind::Quiz {
            help.push(Span::styled(
                " ←/→ ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            help.push(Span::raw("Choose  "));
        }
        help.push(Span::styled(
            " Esc ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        help.push(Span::raw("Cancel"));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(self.kind.title())
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, area);

        // Help sits on the last inner line
        if area.height > 2 {
            let help_area = Rect::new(area.x + 1, area.y + area.height - 2, area.width.saturating_sub(2), 1);
            frame.render_widget(
                Paragraph::new(Line::from(help)).alignment(Alignment::Center),
                help_area,
            );
        }
        Ok(())
    }
}
