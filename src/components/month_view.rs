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

pub struct MonthView;

impl MonthView {
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        label: &str,
        grid: &Grid,
        spans: &[EventSpan],
        selected: NaiveDate,
        week_start: WeekStart,
        max_rows: usize,
    ) {
        let theme = theme::current();
        let block = Block::default()
            .title(format!(" {} ", label))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 14 || inner.height < 3 || grid.weeks.is_empty() {
            return;
        }

        let col_w = (inner.width / 7) as usize;
        let header: Vec<Span> = week_start
            .day_names()
            .iter()
            .map(|d| Span::styled(format!("{:<width$}", d, width = col_w), theme.header))
            .collect();

        // Day number line + visible rows + the overflow row
        let wanted = u16::try_from(max_rows).unwrap_or(u16::MAX).saturating_add(2);
        let available = inner.height.saturating_sub(1) / grid.weeks.len() as u16;
        let week_h = wanted.min(available).max(1);

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(grid.weeks.iter().map(|_| Constraint::Length(week_h)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);
        for (wi, week) in grid.weeks.iter().enumerate() {
            span_grid::render_week(frame, rows[wi + 1], week, wi, spans, selected);
        }
    }
}
