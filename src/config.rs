use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::calendar::{ViewMode, WeekStart};
use crate::theme::ThemeConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "GRIDCAL_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub week_start: WeekStart,
    /// Terminal width below which the layout counts as narrow.
    pub narrow_width: u16,
    pub log_level: Option<String>,
    pub rows: RowLimits,
    pub theme: ThemeConfig,
}

/// Upper bound for any configured row limit.
pub const MAX_ROWS: usize = 32;

/// Rows available to real events per day, per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RowLimits {
    pub narrow: usize,
    pub wide: usize,
    pub week: usize,
}

impl Default for RowLimits {
    fn default() -> Self {
        Self {
            narrow: 2,
            wide: 3,
            week: 8,
        }
    }
}

impl RowLimits {
    fn clamped(self) -> Self {
        let clamp = |name: &str, value: usize| {
            if value > MAX_ROWS {
                tracing::warn!(name, value, max = MAX_ROWS, "row limit too large, clamping");
                MAX_ROWS
            } else {
                value
            }
        };
        Self {
            narrow: clamp("narrow", self.narrow),
            wide: clamp("wide", self.wide),
            week: clamp("week", self.week),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Sunday,
            narrow_width: 80,
            log_level: None,
            rows: RowLimits::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.rows = config.rows.clamped();
        Ok(config)
    }

    /// `maxVisibleRows` for the layout engine in `view`.
    pub fn max_visible_rows(&self, view: ViewMode, is_narrow: bool) -> usize {
        match view {
            ViewMode::Week => self.rows.week,
            _ if is_narrow => self.rows.narrow,
            _ => self.rows.wide,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("gridcal").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            week_start = "monday"
            narrow_width = 100

            [rows]
            wide = 4

            [theme]
            preset = "gruvbox"
            "#,
        )
        .unwrap();

        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.narrow_width, 100);
        assert_eq!(config.rows, RowLimits { narrow: 2, wide: 4, week: 8 });
        assert_eq!(config.theme.preset.as_deref(), Some("gruvbox"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(Config::parse("week_start = \"friday\"").is_err());
        assert!(Config::parse("narrow_width = \"wide\"").is_err());
    }

    #[test]
    fn test_huge_row_limits_are_clamped() {
        let config = Config::parse(
            r#"
            [rows]
            narrow = 1
            wide = 70000
            week = 4096
            "#,
        )
        .unwrap();

        assert_eq!(config.rows, RowLimits { narrow: 1, wide: MAX_ROWS, week: MAX_ROWS });
    }

    #[test]
    fn test_max_visible_rows_per_view() {
        let config = Config::default();
        assert_eq!(config.max_visible_rows(ViewMode::Month, true), 2);
        assert_eq!(config.max_visible_rows(ViewMode::Month, false), 3);
        assert_eq!(config.max_visible_rows(ViewMode::Week, true), 8);
    }
}
