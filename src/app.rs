use chrono::{Datelike, NaiveDate};

use crate::calendar::{
    compute_spans, parse_iso, Event, EventSpan, EventStore, Grid, ValidationError, ViewMode,
    ViewSelector,
};
use crate::clock::Clock;
use crate::components::event_form::{EventFormState, FormKey};
use crate::config::Config;

/// Navigation granularity for next/prev commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Day,
    Week,
    Month,
    Year,
}

/// Every state change goes through [`App::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    SetView(ViewMode),
    Next(Step),
    Prev(Step),
    GoToday,
    SelectDay(NaiveDate),
    JumpToDay(NaiveDate),
    /// Month index, 0 = January.
    SwitchToMonth(u32),
    OpenEventForm,
    CloseEventForm,
    Form(FormKey),
    SaveEvent,
    DeleteEvent(String),
    CursorUp,
    CursorDown,
    ToggleHelp,
    Resize { width: u16 },
}

pub struct App {
    pub running: bool,
    pub selector: ViewSelector,
    pub store: EventStore,
    pub config: Config,
    pub today: NaiveDate,
    pub is_narrow: bool,
    /// Grid of the active view: the month grid, or one week in week view.
    pub grid: Grid,
    pub spans: Vec<EventSpan>,
    /// Month grids of the anchor year, filled in year view only.
    pub year_grids: Vec<Grid>,
    pub form: Option<EventFormState>,
    pub form_error: Option<ValidationError>,
    pub day_cursor: usize,
    pub show_help: bool,
    pub status_message: Option<String>,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(config: Config, clock: Box<dyn Clock>) -> Self {
        let today = clock.today();
        let mut app = Self {
            running: true,
            selector: ViewSelector::new(today),
            store: EventStore::new(),
            config,
            today,
            is_narrow: false,
            grid: Grid::default(),
            spans: Vec::new(),
            year_grids: Vec::new(),
            form: None,
            form_error: None,
            day_cursor: 0,
            show_help: false,
            status_message: None,
            clock,
        };
        app.recompute();
        app
    }

    pub fn view(&self) -> ViewMode {
        self.selector.view
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selector.selected
    }

    pub fn dispatch(&mut self, command: Command) {
        tracing::trace!(?command, "dispatch");
        let previous = self.selector.selected;
        if !matches!(command, Command::Resize { .. }) {
            self.status_message = None;
        }

        match command {
            Command::Quit => self.running = false,
            Command::SetView(view) => self.selector.set_view(view),
            Command::Next(step) => match step {
                Step::Day => self.selector.next_day(),
                Step::Week => self.selector.next_week(),
                Step::Month => self.selector.next_month(),
                Step::Year => self.selector.next_year(),
            },
            Command::Prev(step) => match step {
                Step::Day => self.selector.prev_day(),
                Step::Week => self.selector.prev_week(),
                Step::Month => self.selector.prev_month(),
                Step::Year => self.selector.prev_year(),
            },
            Command::GoToday => {
                let today = self.clock.today();
                self.selector.go_today(today);
            }
            Command::SelectDay(date) => self.selector.select_day(date),
            Command::JumpToDay(date) => self.selector.jump_to_day(date),
            Command::SwitchToMonth(index) => self.selector.switch_to_month(index),
            Command::OpenEventForm => {
                self.form = Some(EventFormState::new(self.selector.selected));
                self.form_error = None;
            }
            Command::CloseEventForm => {
                self.form = None;
                self.form_error = None;
            }
            Command::Form(key) => {
                if let Some(form) = self.form.as_mut() {
                    form.apply(key);
                }
            }
            Command::SaveEvent => self.save_event(),
            Command::DeleteEvent(id) => self.delete_event(&id),
            Command::CursorUp => self.day_cursor = self.day_cursor.saturating_sub(1),
            Command::CursorDown => self.day_cursor += 1,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::Resize { width } => {
                self.is_narrow = width < self.config.narrow_width;
            }
        }

        if self.selector.selected != previous {
            self.day_cursor = 0;
        }
        self.recompute();
    }

    /// Parses `iso` and selects that day; unparsable input is ignored.
    pub fn select_day(&mut self, iso: &str) {
        if let Some(date) = parse_iso(iso) {
            self.dispatch(Command::SelectDay(date));
        }
    }

    /// Parses `iso` and opens it in the day view; unparsable input is ignored.
    pub fn jump_to_day(&mut self, iso: &str) {
        if let Some(date) = parse_iso(iso) {
            self.dispatch(Command::JumpToDay(date));
        }
    }

    pub fn month_label(&self) -> String {
        self.selector.month_label()
    }

    pub fn day_label(&self) -> String {
        self.selector.day_label()
    }

    pub fn events_for_day(&self, iso: &str) -> Vec<&Event> {
        parse_iso(iso)
            .map(|date| self.store.events_on_day(date))
            .unwrap_or_default()
    }

    pub fn single_day_events_for_day(&self, iso: &str) -> Vec<&Event> {
        parse_iso(iso)
            .map(|date| self.store.single_day_events_on_day(date))
            .unwrap_or_default()
    }

    pub fn selected_day_events(&self) -> Vec<&Event> {
        self.store.events_on_day(self.selector.selected)
    }

    /// Event under the day cursor, if the selected day has any.
    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_day_events().get(self.day_cursor).copied()
    }

    pub fn has_events_on(&self, date: NaiveDate) -> bool {
        self.store.events().iter().any(|e| e.occurs_on(date))
    }

    pub fn max_visible_rows(&self) -> usize {
        self.config.max_visible_rows(self.selector.view, self.is_narrow)
    }

    fn save_event(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let result = form
            .to_draft()
            .and_then(|draft| self.store.add(draft).map(|e| e.title.clone()));

        match result {
            Ok(title) => {
                self.form = None;
                self.form_error = None;
                self.status_message = Some(format!("Saved \"{title}\""));
            }
            Err(err) => {
                tracing::debug!(%err, "event draft rejected");
                self.form_error = Some(err);
            }
        }
    }

    fn delete_event(&mut self, id: &str) {
        self.status_message = Some(match self.store.remove(id) {
            Some(event) => format!("Deleted \"{}\"", event.title),
            None => "No such event".to_string(),
        });
    }

    /// Rebuilds the derived grid and spans from the current state.
    fn recompute(&mut self) {
        self.today = self.clock.today();
        let week_start = self.config.week_start;
        let selected = self.selector.selected;

        self.grid = match self.selector.view {
            ViewMode::Week => Grid::week_containing(selected, self.today, week_start),
            _ => {
                let (year, month) = self.selector.visible_month();
                Grid::build(year, month, self.today, week_start)
            }
        };

        self.year_grids = if self.selector.view == ViewMode::Year {
            (1..=12)
                .map(|month| Grid::build(selected.year(), month, self.today, week_start))
                .collect()
        } else {
            Vec::new()
        };

        self.spans = compute_spans(&self.grid, self.store.events(), self.max_visible_rows());

        let count = self.selected_day_events().len();
        self.day_cursor = self.day_cursor.min(count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::calendar::SpanKind;
    use crate::clock::FixedClock;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn app_at(date: NaiveDate) -> (App, Rc<FixedClock>) {
        let clock = Rc::new(FixedClock::new(date));
        let app = App::new(Config::default(), Box::new(clock.clone()));
        (app, clock)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Command::Form(FormKey::Char(c)));
        }
    }

    fn add_event(app: &mut App, title: &str, start: &str, end: &str) {
        app.dispatch(Command::OpenEventForm);
        let form = app.form.as_mut().unwrap();
        form.title = title.to_string();
        form.start = start.to_string();
        form.end = end.to_string();
        app.dispatch(Command::SaveEvent);
        assert!(app.form.is_none(), "save failed: {:?}", app.form_error);
    }

    #[test]
    fn test_initial_state_builds_month_grid() {
        let (app, _) = app_at(make_date(2024, 2, 14));

        assert_eq!(app.view(), ViewMode::Month);
        assert_eq!(app.grid.weeks.len(), 5);
        assert_eq!(app.month_label(), "February 2024");
        assert!(app.spans.is_empty());
    }

    #[test]
    fn test_save_event_via_form() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        app.dispatch(Command::OpenEventForm);
        type_text(&mut app, "Standup");
        app.dispatch(Command::SaveEvent);

        assert!(app.form.is_none());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.events_for_day("2024-06-10")[0].title, "Standup");
        assert_eq!(app.single_day_events_for_day("2024-06-10").len(), 1);
        assert_eq!(app.spans.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Saved \"Standup\""));
    }

    #[test]
    fn test_invalid_form_keeps_form_open_with_error() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        app.dispatch(Command::OpenEventForm);
        app.dispatch(Command::SaveEvent);

        assert!(app.form.is_some());
        assert_eq!(app.form_error, Some(ValidationError::EmptyTitle));
        assert!(app.store.is_empty());

        app.dispatch(Command::CloseEventForm);
        app.dispatch(Command::OpenEventForm);
        assert_eq!(app.form_error, None);
    }

    #[test]
    fn test_crowded_day_gets_overflow_marker() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        for i in 0..4 {
            add_event(&mut app, &format!("Event {i}"), "2024-06-10", "2024-06-10");
        }

        let overflow: Vec<_> = app.spans.iter().filter(|s| s.is_overflow()).collect();
        assert_eq!(overflow.len(), 1);
        assert_eq!(overflow[0].kind, SpanKind::Overflow { hidden: 1 });
        assert_eq!(overflow[0].row, 3);
    }

    #[test]
    fn test_narrow_terminal_lowers_row_limit() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        for i in 0..3 {
            add_event(&mut app, &format!("Event {i}"), "2024-06-10", "2024-06-10");
        }
        assert!(app.spans.iter().all(|s| !s.is_overflow()));

        app.dispatch(Command::Resize { width: 60 });
        assert!(app.is_narrow);
        assert_eq!(app.max_visible_rows(), 2);
        let overflow = app.spans.iter().find(|s| s.is_overflow()).unwrap();
        assert_eq!(overflow.kind, SpanKind::Overflow { hidden: 1 });
    }

    #[test]
    fn test_week_view_uses_single_week_grid() {
        let (mut app, _) = app_at(make_date(2024, 6, 12));
        add_event(&mut app, "Trip", "2024-06-13", "2024-06-18");
        app.dispatch(Command::SetView(ViewMode::Week));

        assert_eq!(app.grid.weeks.len(), 1);
        assert_eq!(app.max_visible_rows(), 8);
        assert_eq!(app.spans.len(), 1);
        assert_eq!((app.spans[0].col_start, app.spans[0].col_end), (4, 6));

        app.dispatch(Command::Next(Step::Week));
        assert_eq!((app.spans[0].col_start, app.spans[0].col_end), (0, 2));
    }

    #[test]
    fn test_delete_recomputes_spans() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        add_event(&mut app, "First", "2024-06-10", "2024-06-10");
        add_event(&mut app, "Second", "2024-06-10", "2024-06-10");
        let first_id = app.store.events()[0].id.clone();

        app.dispatch(Command::DeleteEvent(first_id.clone()));

        assert!(app.spans.iter().all(|s| s.event.id != first_id));
        assert_eq!(app.spans.len(), 1);
        assert_eq!(app.spans[0].row, 0);

        app.dispatch(Command::DeleteEvent("missing".to_string()));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("No such event"));
    }

    #[test]
    fn test_delete_event_under_day_cursor() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        add_event(&mut app, "First", "2024-06-10", "2024-06-10");
        add_event(&mut app, "Second", "2024-06-10", "2024-06-10");
        app.jump_to_day("2024-06-10");

        app.dispatch(Command::CursorDown);
        app.dispatch(Command::CursorDown);
        assert_eq!(app.day_cursor, 1);

        let id = app.selected_event().map(|e| e.id.clone()).unwrap();
        app.dispatch(Command::DeleteEvent(id));
        let titles: Vec<_> = app.events_for_day("2024-06-10").iter().map(|e| e.title.clone()).collect();
        assert_eq!(titles, vec!["First".to_string()]);
        assert_eq!(app.day_cursor, 0);
        assert_eq!(app.status_message.as_deref(), Some("Deleted \"Second\""));
    }

    #[test]
    fn test_selected_event_empty_day() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        add_event(&mut app, "Elsewhere", "2024-06-11", "2024-06-11");
        assert!(app.selected_event().is_none());

        app.select_day("2024-06-11");
        assert_eq!(app.selected_event().map(|e| e.title.as_str()), Some("Elsewhere"));
    }

    #[test]
    fn test_year_view_and_month_switch() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        app.dispatch(Command::SetView(ViewMode::Year));
        assert_eq!(app.year_grids.len(), 12);

        app.dispatch(Command::SwitchToMonth(1));
        assert_eq!(app.view(), ViewMode::Month);
        assert_eq!(app.selected_date(), make_date(2024, 2, 10));
        assert!(app.year_grids.is_empty());
    }

    #[test]
    fn test_go_today_reads_clock_each_time() {
        let (mut app, clock) = app_at(make_date(2024, 6, 10));
        app.dispatch(Command::Next(Step::Month));
        clock.set(make_date(2024, 6, 11));

        app.dispatch(Command::GoToday);
        assert_eq!(app.selected_date(), make_date(2024, 6, 11));
        assert_eq!(app.today, make_date(2024, 6, 11));
        let today_cells: Vec<_> = app.grid.days().filter(|c| c.is_today).collect();
        assert_eq!(today_cells[0].iso, "2024-06-11");
    }

    #[test]
    fn test_unparsable_iso_is_ignored() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        app.select_day("not-a-date");
        app.jump_to_day("2024-02-30");

        assert_eq!(app.selected_date(), make_date(2024, 6, 10));
        assert_eq!(app.view(), ViewMode::Month);
        assert!(app.events_for_day("garbage").is_empty());
    }

    #[test]
    fn test_day_label_follows_selection() {
        let (mut app, _) = app_at(make_date(2024, 6, 10));
        app.select_day("2024-06-09");
        assert_eq!(app.day_label(), "Sunday, June 9, 2024");
        assert_eq!(app.view(), ViewMode::Month);
    }
}
