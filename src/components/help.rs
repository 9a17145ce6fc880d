use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("h/l", "Previous/next day (month in year view)"),
            ("j/k", "Previous/next week, or select in day view"),
            ("[/]", "Previous/next month (year in year view)"),
            ("{/}", "Previous/next year"),
            ("t", "Jump to today"),
        ],
    ),
    (
        "Views",
        &[
            ("1/2/3/4", "Month / Week / Year / Day"),
            ("Enter", "Open day (or month from year view)"),
        ],
    ),
    (
        "Actions",
        &[
            ("n", "Create new event"),
            ("d", "Delete selected event"),
            ("Esc", "Close popup, or back to month from day view"),
            ("q", "Quit"),
        ],
    ),
];

pub struct Help;

fn title(theme_name: &str) -> String {
    format!(" Keybindings (theme: {theme_name}) ")
}

impl Help {
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_w = area.width.clamp(30, 56).min(area.width);
        let popup_h = area.height.clamp(12, 20).min(area.height);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(title(&theme::current().name))
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut lines = Vec::new();
        for (i, (section, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(*section, section_style)));
            for (key, desc) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<10}", key), key_style),
                    Span::styled(*desc, theme::current().dim),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_names_active_theme() {
        assert_eq!(title("nord"), " Keybindings (theme: nord) ");
        assert_eq!(title(&crate::theme::Theme::preset("gruvbox").name), " Keybindings (theme: gruvbox) ");
    }
}
