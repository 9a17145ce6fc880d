use chrono::{Datelike, Days, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Week,
    Year,
    Day,
}

/// Active granularity plus the anchor date that drives what is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSelector {
    pub view: ViewMode,
    pub selected: NaiveDate,
}

impl ViewSelector {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: ViewMode::Month,
            selected: today,
        }
    }

    /// (year, month) shown by the month grid.
    pub fn visible_month(&self) -> (i32, u32) {
        (self.selected.year(), self.selected.month())
    }

    pub fn next_month(&mut self) {
        self.shift_months(1);
    }

    pub fn prev_month(&mut self) {
        self.shift_months(-1);
    }

    pub fn next_year(&mut self) {
        self.shift_months(12);
    }

    pub fn prev_year(&mut self) {
        self.shift_months(-12);
    }

    pub fn next_week(&mut self) {
        self.shift_days(7);
    }

    pub fn prev_week(&mut self) {
        self.shift_days(-7);
    }

    pub fn next_day(&mut self) {
        self.shift_days(1);
    }

    pub fn prev_day(&mut self) {
        self.shift_days(-1);
    }

    pub fn go_today(&mut self, today: NaiveDate) {
        self.selected = today;
    }

    /// Moves the anchor without changing the view.
    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    /// Selects `date` and opens the day view.
    pub fn jump_to_day(&mut self, date: NaiveDate) {
        self.selected = date;
        self.view = ViewMode::Day;
    }

    /// Switches to month `index` (0 = January) of the anchor year, keeping the
    /// day of month where possible.
    pub fn switch_to_month(&mut self, index: u32) {
        if index > 11 {
            tracing::warn!(index, "ignoring out-of-range month index");
            return;
        }
        let current = self.selected.month0() as i32;
        self.shift_months(index as i32 - current);
        self.view = ViewMode::Month;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn month_label(&self) -> String {
        self.selected.format("%B %Y").to_string()
    }

    pub fn day_label(&self) -> String {
        self.selected.format("%A, %B %-d, %Y").to_string()
    }

    fn shift_months(&mut self, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.selected.checked_add_months(months)
        } else {
            self.selected.checked_sub_months(months)
        };
        if let Some(date) = shifted {
            self.selected = date;
        }
    }

    fn shift_days(&mut self, delta: i64) {
        let days = Days::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.selected.checked_add_days(days)
        } else {
            self.selected.checked_sub_days(days)
        };
        if let Some(date) = shifted {
            self.selected = date;
        }
    }
}

/// Parses a `YYYY-MM-DD` day identifier.
pub fn parse_iso(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d").ok()
}
