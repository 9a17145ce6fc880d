//! Month and week calendar grid with an occupancy-based layout engine for
//! multi-day events, plus the terminal front end that drives it.

pub mod app;
pub mod calendar;
pub mod clock;
pub mod components;
pub mod config;
pub mod input;
pub mod logging;
pub mod theme;
pub mod tui;
