use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::calendar::ViewMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        mode: ViewMode,
        form_open: bool,
        message: Option<&str>,
    ) {
        let status = theme::current().status;
        let w = area.width as usize;

        let mode_str = match mode {
            ViewMode::Month => "[1]Month",
            ViewMode::Week => "[2]Week",
            ViewMode::Year => "[3]Year",
            ViewMode::Day => "[4]Day",
        };
        let focus_indicator = if form_open { " [New Event]" } else { "" };

        // Show status message if present, otherwise context-aware hints
        let right_text = match message {
            Some(msg) => format!(" {} ", msg),
            None => hints(mode, w).to_string(),
        };

        let left = format!(" {}{} ", mode_str, focus_indicator);
        let padding = " ".repeat(w.saturating_sub(left.len() + right_text.len()));

        let line = Line::from(vec![
            Span::styled(left, status),
            Span::styled(padding, status),
            Span::styled(right_text, status),
        ]);

        frame.render_widget(Paragraph::new(line).style(status), area);
    }
}

fn hints(mode: ViewMode, w: usize) -> &'static str {
    match mode {
        ViewMode::Month | ViewMode::Week if w >= 80 => {
            " hjkl:Nav [/]:Mon t:Today Enter:Day n:New ?:Help q:Quit"
        }
        ViewMode::Year if w >= 80 => " hl:Month [/]:Year Enter:Open t:Today ?:Help q:Quit",
        ViewMode::Day if w >= 80 => " hl:Day jk:Select n:New d:Delete ?:Help q:Quit",
        _ if w >= 40 => " arrows:Nav n:New q:Quit",
        _ => " ?:Help q:Quit",
    }
}
