use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::span_grid;
use crate::calendar::{EventSpan, Grid, WeekStart};
use crate::theme;

pub struct WeekView;

impl WeekView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &Grid,
        spans: &[EventSpan],
        selected: NaiveDate,
        week_start: WeekStart,
    ) {
        let theme = theme::current();
        let Some(week) = grid.weeks.first() else {
            return;
        };

        let block = Block::default()
            .title(format!(" Week of {} ", week.first_date().format("%b %d, %Y")))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 14 || inner.height < 3 {
            return;
        }

        let col_w = (inner.width / 7) as usize;
        let header: Vec<Span> = week_start
            .day_names()
            .iter()
            .zip(week.days.iter())
            .map(|(name, cell)| {
                let label = if col_w >= 15 {
                    format!("{} {}", name, cell.iso)
                } else if col_w >= 10 {
                    format!("{} {}", name, cell.date.format("%b"))
                } else {
                    name.to_string()
                };
                Span::styled(format!("{:<width$}", label, width = col_w), theme.header)
            })
            .collect();

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);
        frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);
        span_grid::render_week(frame, rows[1], week, 0, spans, selected);
    }
}
