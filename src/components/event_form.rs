use chrono::{NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::{EventDraft, ValidationError};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Start,
    End,
    StartTime,
    EndTime,
    Color,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Start,
            FormField::Start => FormField::End,
            FormField::End => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Color,
            FormField::Color => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Color,
            FormField::Start => FormField::Title,
            FormField::End => FormField::Start,
            FormField::StartTime => FormField::End,
            FormField::EndTime => FormField::StartTime,
            FormField::Color => FormField::EndTime,
        }
    }
}

/// Keystrokes the form understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Char(char),
    Backspace,
    NextField,
    PrevField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFormState {
    pub title: String,
    pub start: String,
    pub end: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
    pub active_field: FormField,
}

impl EventFormState {
    pub fn new(date: NaiveDate) -> Self {
        let iso = date.format("%Y-%m-%d").to_string();
        Self {
            title: String::new(),
            start: iso.clone(),
            end: iso,
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            color: String::new(),
            active_field: FormField::Title,
        }
    }

    pub fn apply(&mut self, key: FormKey) {
        match key {
            FormKey::Char(c) => self.active_value().push(c),
            FormKey::Backspace => {
                self.active_value().pop();
            }
            FormKey::NextField => self.active_field = self.active_field.next(),
            FormKey::PrevField => self.active_field = self.active_field.prev(),
        }
    }

    fn active_value(&mut self) -> &mut String {
        match self.active_field {
            FormField::Title => &mut self.title,
            FormField::Start => &mut self.start,
            FormField::End => &mut self.end,
            FormField::StartTime => &mut self.start_time,
            FormField::EndTime => &mut self.end_time,
            FormField::Color => &mut self.color,
        }
    }

    /// Parses the text fields and validates the resulting draft.
    pub fn to_draft(&self) -> Result<EventDraft, ValidationError> {
        let draft = EventDraft {
            title: self.title.clone(),
            start: parse_date(&self.start, "start")?,
            end: parse_date(&self.end, "end")?,
            hstart: parse_time(&self.start_time, "start")?,
            hend: parse_time(&self.end_time, "end")?,
            color: Some(self.color.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::MalformedDate(field))
}

fn parse_time(value: &str, field: &'static str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ValidationError::MalformedTime(field))
}

pub struct EventForm;

impl EventForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: &EventFormState,
        error: Option<&ValidationError>,
    ) {
        let theme = theme::current();

        // Center the form popup
        let form_w = area.width.clamp(30, 54).min(area.width);
        let form_h = area.height.clamp(11, 13).min(area.height);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" New Event ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // start date
            Constraint::Length(1), // end date
            Constraint::Length(1), // start time
            Constraint::Length(1), // end time
            Constraint::Length(1), // color
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let fields = [
            (FormField::Title, "Title:", &state.title),
            (FormField::Start, "Start:", &state.start),
            (FormField::End, "End:", &state.end),
            (FormField::StartTime, "From:", &state.start_time),
            (FormField::EndTime, "To:", &state.end_time),
            (FormField::Color, "Color:", &state.color),
        ];
        for (i, (field, label, value)) in fields.iter().enumerate() {
            render_field(frame, rows[i], label, value, state.active_field == *field);
        }

        if let Some(err) = error {
            let msg = Paragraph::new(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(msg, rows[7]);
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[8]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };

    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
