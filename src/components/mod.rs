pub mod day_view;
pub mod event_form;
pub mod help;
pub mod month_view;
pub mod span_grid;
pub mod status_bar;
pub mod week_view;
pub mod year_view;

pub use day_view::DayView;
pub use event_form::EventForm;
pub use help::Help;
pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use week_view::WeekView;
pub use year_view::YearView;
