use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::calendar::Event;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Installs the theme chosen by the configuration. Only the first call wins.
pub fn init(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("theme already initialised");
    }
}

/// Get the active theme (the default one if `init` was never called).
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub overflow: Style,
    /// Bar colours for events without an explicit colour.
    pub palette: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            overflow: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            palette: vec![
                Color::Blue,
                Color::Green,
                Color::Magenta,
                Color::Red,
                Color::LightBlue,
                Color::LightGreen,
            ],
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    /// Bar colour for `event`: its own colour when it parses, otherwise a
    /// palette entry picked from the id so it stays stable across renders.
    pub fn event_color(&self, event: &Event) -> Color {
        if let Some(color) = event.color.as_deref().and_then(parse_color) {
            return color;
        }
        if self.palette.is_empty() {
            return Color::Blue;
        }
        let hash = event.id.bytes().fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        self.palette[hash % self.palette.len()]
    }

    pub fn event_style(&self, event: &Event) -> Style {
        Style::default().fg(Color::Black).bg(self.event_color(event))
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)), // purple
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            highlight: Style::default()
                .bg(Color::Rgb(68, 71, 90))
                .add_modifier(Modifier::BOLD),
            overflow: Style::default()
                .fg(Color::Rgb(98, 114, 164))
                .add_modifier(Modifier::ITALIC),
            palette: vec![
                Color::Rgb(255, 121, 198),
                Color::Rgb(80, 250, 123),
                Color::Rgb(255, 184, 108),
                Color::Rgb(189, 147, 249),
                Color::Rgb(241, 250, 140),
            ],
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)), // yellow
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)), // aqua
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            highlight: Style::default()
                .bg(Color::Rgb(80, 73, 69))
                .add_modifier(Modifier::BOLD),
            overflow: Style::default()
                .fg(Color::Rgb(146, 131, 116))
                .add_modifier(Modifier::ITALIC),
            palette: vec![
                Color::Rgb(251, 73, 52),
                Color::Rgb(184, 187, 38),
                Color::Rgb(131, 165, 152),
                Color::Rgb(211, 134, 155),
                Color::Rgb(254, 128, 25),
            ],
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)), // yellow
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)), // frost
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            highlight: Style::default()
                .bg(Color::Rgb(67, 76, 94))
                .add_modifier(Modifier::BOLD),
            overflow: Style::default()
                .fg(Color::Rgb(76, 86, 106))
                .add_modifier(Modifier::ITALIC),
            palette: vec![
                Color::Rgb(191, 97, 106),
                Color::Rgb(163, 190, 140),
                Color::Rgb(129, 161, 193),
                Color::Rgb(180, 142, 173),
                Color::Rgb(208, 135, 112),
            ],
        }
    }
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub palette: Option<Vec<String>>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let fg = |style: Style, value: &Option<String>| match value.as_deref().and_then(parse_color) {
            Some(c) => style.fg(c),
            None => style,
        };
        let bg = |style: Style, value: &Option<String>| match value.as_deref().and_then(parse_color) {
            Some(c) => style.bg(c),
            None => style,
        };

        theme.today = bg(fg(theme.today, &self.today_fg), &self.today_bg);
        theme.selected = bg(fg(theme.selected, &self.selected_fg), &self.selected_bg);
        theme.header = fg(theme.header, &self.header_fg);
        theme.dim = fg(theme.dim, &self.dim_fg);
        theme.border = fg(theme.border, &self.border_fg);
        theme.status = bg(fg(theme.status, &self.status_fg), &self.status_bg);
        theme.highlight = bg(theme.highlight, &self.highlight_bg);

        if let Some(palette) = &self.palette {
            let colors: Vec<Color> = palette.iter().filter_map(|c| parse_color(c)).collect();
            if colors.is_empty() {
                tracing::warn!("theme palette has no valid colours, keeping preset palette");
            } else {
                theme.palette = colors;
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color(" Grey "), Some(Color::Gray));
        assert_eq!(parse_color("#ff80"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("teal-ish"), None);
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("nord".to_string()),
            today_bg: Some("red".to_string()),
            palette: Some(vec!["#000000".to_string(), "nope".to_string()]),
            ..ThemeConfig::default()
        };
        let theme = config.into_theme();

        assert_eq!(theme.name, "nord");
        assert_eq!(theme.today.bg, Some(Color::Red));
        assert_eq!(theme.palette, vec![Color::Rgb(0, 0, 0)]);
    }

    #[test]
    fn test_event_color_prefers_explicit_color() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut event = Event {
            id: "abc".to_string(),
            title: "Lunch".to_string(),
            start: date,
            end: date,
            hstart: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            hend: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            color: Some("cyan".to_string()),
        };
        let theme = Theme::default();
        assert_eq!(theme.event_color(&event), Color::Cyan);

        event.color = None;
        let first = theme.event_color(&event);
        assert_eq!(theme.event_color(&event), first);
        assert!(theme.palette.contains(&first));
    }
}
