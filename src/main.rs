use std::time::Duration;

use chrono::Datelike;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gridcal::app::{App, Command, Step};
use gridcal::calendar::ViewMode;
use gridcal::components::{self, event_form::FormKey};
use gridcal::input::{self, Input};
use gridcal::{clock, config, logging, theme, tui};
use ratatui::layout::{Constraint, Layout, Rect};

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::Config::load()?;
    let _log_guard = logging::init(config.log_level.as_deref())?;
    theme::init(config.theme.clone().into_theme());
    tracing::info!(
        config = ?config::config_path(),
        log_dir = %logging::log_dir().display(),
        "starting gridcal"
    );

    let mut app = App::new(config, Box::new(clock::SystemClock));

    let mut terminal = tui::init()?;
    let size = terminal.size()?;
    app.dispatch(Command::Resize { width: size.width });

    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    tracing::info!(events = app.store.len(), "exiting gridcal");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        let command = match input::next_input(Duration::from_millis(100))? {
            Some(Input::Key(key)) => map_key(app, key),
            Some(Input::Resize { width, height }) => {
                tracing::debug!(width, height, "terminal resized");
                Some(Command::Resize { width })
            }
            None => None,
        };
        if let Some(command) = command {
            app.dispatch(command);
        }
    }

    Ok(())
}

fn map_key(app: &App, key: KeyEvent) -> Option<Command> {
    // Help overlay takes priority
    if app.show_help {
        return matches!(key.code, KeyCode::Esc | KeyCode::Char('?')).then_some(Command::ToggleHelp);
    }
    if app.form.is_some() {
        return map_form_key(key.code);
    }

    let view = app.view();
    let selected = app.selected_date();
    let command = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Command::Quit,
        (KeyCode::Esc, _) if view == ViewMode::Day => Command::SetView(ViewMode::Month),
        (KeyCode::Char('1'), _) => Command::SetView(ViewMode::Month),
        (KeyCode::Char('2'), _) => Command::SetView(ViewMode::Week),
        (KeyCode::Char('3'), _) => Command::SetView(ViewMode::Year),
        (KeyCode::Char('4'), _) => Command::SetView(ViewMode::Day),
        (KeyCode::Char('t'), _) => Command::GoToday,
        (KeyCode::Char('n'), _) => Command::OpenEventForm,
        (KeyCode::Char('d'), _) => {
            return app.selected_event().map(|e| Command::DeleteEvent(e.id.clone()));
        }
        (KeyCode::Char('?'), _) => Command::ToggleHelp,
        (KeyCode::Enter, _) if view == ViewMode::Year => Command::SwitchToMonth(selected.month0()),
        (KeyCode::Enter, _) => Command::JumpToDay(selected),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) if view == ViewMode::Year => {
            Command::Prev(Step::Month)
        }
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) if view == ViewMode::Year => {
            Command::Next(Step::Month)
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Command::Prev(Step::Day),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Command::Next(Step::Day),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) if view == ViewMode::Day => Command::CursorUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) if view == ViewMode::Day => Command::CursorDown,
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Command::Prev(Step::Week),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Command::Next(Step::Week),
        (KeyCode::Char('['), _) if view == ViewMode::Year => Command::Prev(Step::Year),
        (KeyCode::Char(']'), _) if view == ViewMode::Year => Command::Next(Step::Year),
        (KeyCode::Char('['), _) => Command::Prev(Step::Month),
        (KeyCode::Char(']'), _) => Command::Next(Step::Month),
        (KeyCode::Char('{'), _) => Command::Prev(Step::Year),
        (KeyCode::Char('}'), _) => Command::Next(Step::Year),
        _ => return None,
    };
    Some(command)
}

fn map_form_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Esc => Command::CloseEventForm,
        KeyCode::Enter => Command::SaveEvent,
        KeyCode::Tab => Command::Form(FormKey::NextField),
        KeyCode::BackTab => Command::Form(FormKey::PrevField),
        KeyCode::Backspace => Command::Form(FormKey::Backspace),
        KeyCode::Char(c) => Command::Form(FormKey::Char(c)),
        _ => return None,
    };
    Some(command)
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let content_area = layout[0];
    let week_start = app.config.week_start;
    let selected = app.selected_date();

    match app.view() {
        ViewMode::Month => render_month_layout(frame, content_area, app),
        ViewMode::Week => components::WeekView::render(
            frame,
            content_area,
            &app.grid,
            &app.spans,
            selected,
            week_start,
        ),
        ViewMode::Year => components::YearView::render(
            frame,
            content_area,
            &app.year_grids,
            selected,
            week_start,
            |date| app.has_events_on(date),
        ),
        ViewMode::Day => components::DayView::render(
            frame,
            content_area,
            &app.day_label(),
            &app.selected_day_events(),
            app.day_cursor,
        ),
    }

    if let Some(form) = &app.form {
        components::EventForm::render(frame, area, form, app.form_error.as_ref());
    }
    if app.show_help {
        components::Help::render(frame, area);
    }

    components::StatusBar::render(
        frame,
        layout[1],
        app.view(),
        app.form.is_some(),
        app.status_message.as_deref(),
    );
}

/// Month grid, with the selected day's agenda beside it on wide terminals.
fn render_month_layout(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let month_area = if app.is_narrow || area.width < 100 {
        area
    } else {
        let content = Layout::horizontal([Constraint::Percentage(72), Constraint::Min(24)]).split(area);
        components::DayView::render(
            frame,
            content[1],
            &app.day_label(),
            &app.selected_day_events(),
            app.day_cursor,
        );
        content[0]
    };

    components::MonthView::render(
        frame,
        month_area,
        &app.month_label(),
        &app.grid,
        &app.spans,
        app.selected_date(),
        app.config.week_start,
        app.max_visible_rows(),
    );
}
