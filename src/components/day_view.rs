use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::calendar::Event;
use crate::theme;

pub struct DayView;

impl DayView {
    /// Lists the selected day's events; `cursor` marks the one `d` deletes.
    pub fn render(frame: &mut Frame, area: Rect, label: &str, events: &[&Event], cursor: usize) {
        let theme = theme::current();
        let w = area.width as usize;

        let title = if w >= label.len() + 4 {
            format!(" {} ", label)
        } else {
            " Day ".to_string()
        };

        let n = events.len();
        let count_str = if n == 0 {
            String::new()
        } else {
            format!(" {} event{} ", n, if n == 1 { "" } else { "s" })
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No events. Press n to add one.").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let items: Vec<ListItem> = events.iter().map(|ev| format_event(ev)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(theme.highlight)
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(cursor.min(n - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn format_event(ev: &Event) -> ListItem<'static> {
    let theme = theme::current();
    let indicator = Span::styled("  ", Style::default().bg(theme.event_color(ev)));
    let time_span = Span::styled(
        format!(" {} ", ev.time_display()),
        Style::default().add_modifier(Modifier::DIM),
    );
    let title_span = Span::styled(ev.title.clone(), Style::default());

    let mut spans = vec![indicator, time_span, title_span];
    if !ev.is_single_day() {
        spans.push(Span::styled(
            format!(" ({} days)", ev.duration_days() + 1),
            theme.dim,
        ));
    }

    ListItem::new(Line::from(spans))
}
