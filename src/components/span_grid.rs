use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::calendar::{spans_in_week, EventSpan, SpanKind, Week};
use crate::theme;

/// Draws one week: a line of day numbers followed by the event bars placed
/// by the layout engine. Bars whose row does not fit in `area` are skipped.
pub fn render_week(
    frame: &mut Frame,
    area: Rect,
    week: &Week,
    week_index: usize,
    spans: &[EventSpan],
    selected: NaiveDate,
) {
    if area.width < 7 || area.height == 0 {
        return;
    }
    let theme = theme::current();
    let col_w = area.width / 7;

    for (col, cell) in week.days.iter().enumerate() {
        let style = if cell.is_today && cell.date == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if cell.date == selected {
            theme.selected
        } else if cell.is_today {
            theme.today
        } else if !cell.in_current_month {
            theme.dim
        } else {
            Style::default()
        };

        let label = format!("{:>2}", cell.date.day());
        let rect = Rect::new(area.x + col as u16 * col_w, area.y, col_w, 1);
        frame.render_widget(Paragraph::new(Span::styled(label, style)), rect);
    }

    let selected_col = week.days.iter().position(|cell| cell.date == selected);

    for span in spans_in_week(spans, week_index) {
        let Ok(row) = u16::try_from(span.row) else {
            continue;
        };
        let y = area.y.saturating_add(1).saturating_add(row);
        if y >= area.y.saturating_add(area.height) {
            continue;
        }
        let x = area.x + span.col_start as u16 * col_w;
        let width = ((span.col_end - span.col_start + 1) as u16 * col_w).saturating_sub(1).max(1);

        let mut style = if span.is_overflow() {
            theme.overflow
        } else {
            theme.event_style(&span.event)
        };
        if selected_col.is_some_and(|col| span.covers(week_index, col)) {
            style = style.add_modifier(Modifier::BOLD);
        }
        let text = bar_text(span, width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(text, style)),
            Rect::new(x, y, width, 1),
        );
    }
}

fn bar_text(span: &EventSpan, width: usize) -> String {
    let label = if let SpanKind::Overflow { hidden } = span.kind {
        if span.event.title.chars().count() > width {
            format!("+{hidden}")
        } else {
            span.event.title.clone()
        }
    } else if !span.event.is_single_day() {
        span.event.title.clone()
    } else {
        format!("{} {}", span.event.hstart.format("%H:%M"), span.event.title)
    };
    let title: String = label.chars().take(width).collect();
    format!("{:<width$}", title, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Event;

    fn overflow_span(hidden: usize) -> EventSpan {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        EventSpan {
            event: Event::overflow_marker(date, hidden),
            kind: SpanKind::Overflow { hidden },
            week_index: 0,
            row: 3,
            col_start: 1,
            col_end: 1,
        }
    }

    #[test]
    fn test_overflow_label_shrinks_in_narrow_cells() {
        assert_eq!(bar_text(&overflow_span(2), 20).trim_end(), "+ View more (2)");
        assert_eq!(bar_text(&overflow_span(2), 5), "+2   ");
    }
}
