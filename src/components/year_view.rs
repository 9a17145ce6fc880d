use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{Grid, WeekStart};
use crate::theme;

pub struct YearView;

impl YearView {
    /// Renders the twelve `grids` of the anchor year as mini months; days
    /// for which `has_events` holds get a `*`.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grids: &[Grid],
        selected: NaiveDate,
        week_start: WeekStart,
        has_events: impl Fn(NaiveDate) -> bool,
    ) {
        let theme = theme::current();
        let block = Block::default()
            .title(format!(" {} ", selected.year()))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // 4 columns of months on wide terminals, 3 otherwise
        let per_row = if inner.width >= 4 * 24 { 4 } else { 3 };
        let month_rows = grids.len().div_ceil(per_row);
        if month_rows == 0 {
            return;
        }

        let row_areas = Layout::vertical(
            (0..month_rows).map(|_| Constraint::Ratio(1, month_rows as u32)),
        )
        .split(inner);

        for (r, row_area) in row_areas.iter().enumerate() {
            let cols = Layout::horizontal(
                (0..per_row).map(|_| Constraint::Ratio(1, per_row as u32)),
            )
            .split(*row_area);
            for (c, cell_area) in cols.iter().enumerate() {
                let index = r * per_row + c;
                if let Some(grid) = grids.get(index) {
                    render_month(
                        frame,
                        *cell_area,
                        grid,
                        index as u32 + 1,
                        selected,
                        week_start,
                        &has_events,
                    );
                }
            }
        }
    }
}

fn render_month(
    frame: &mut Frame,
    area: Rect,
    grid: &Grid,
    month: u32,
    selected: NaiveDate,
    week_start: WeekStart,
    has_events: &impl Fn(NaiveDate) -> bool,
) {
    let theme = theme::current();
    let is_selected_month = selected.month() == month;

    let block = Block::default()
        .title(format!(" {} ", month_name(month)))
        .title_style(if is_selected_month { theme.selected } else { theme.header })
        .borders(Borders::ALL)
        .border_style(if is_selected_month { theme.selected } else { theme.border });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header: Vec<Span> = week_start
        .day_names()
        .iter()
        .map(|d| Span::styled(format!("{:<3}", &d[..2]), theme.header))
        .collect();

    let mut lines = vec![Line::from(header)];
    for week in &grid.weeks {
        let cells: Vec<Span> = week
            .days
            .iter()
            .map(|cell| {
                if !cell.in_current_month {
                    return Span::raw("   ");
                }
                let marker = if has_events(cell.date) { "*" } else { " " };
                let style = if cell.date == selected {
                    theme.selected
                } else if cell.is_today {
                    theme.today
                } else {
                    Style::default()
                };
                Span::styled(format!("{:>2}{}", cell.date.day(), marker), style)
            })
            .collect();
        lines.push(Line::from(cells));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
