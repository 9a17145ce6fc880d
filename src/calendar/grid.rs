use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Deserialize;

/// First day of each rendered week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Column (0..7) of `date` in a week starting on this weekday.
    pub fn column_of(self, date: NaiveDate) -> u64 {
        let day = date.weekday().num_days_from_monday();
        let start = self.weekday().num_days_from_monday();
        ((7 + day - start) % 7) as u64
    }

    /// Short day names in column order.
    pub fn day_names(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub iso: String,
    pub in_current_month: bool,
    pub is_today: bool,
}

impl DayCell {
    fn new(date: NaiveDate, in_current_month: bool, today_iso: &str) -> Self {
        let iso = date.format("%Y-%m-%d").to_string();
        let is_today = iso == today_iso;
        Self {
            date,
            iso,
            in_current_month,
            is_today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub days: [DayCell; 7],
}

impl Week {
    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.days[6].date
    }

    /// Clips an inclusive date range to this week, returning the column range.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<(usize, usize)> {
        let (first, last) = (self.first_date(), self.last_date());
        if end < start || end < first || start > last {
            return None;
        }
        let col_start = (start.max(first) - first).num_days() as usize;
        let col_end = (end.min(last) - first).num_days() as usize;
        Some((col_start, col_end))
    }
}

/// Whole weeks covering one month (or a single week for the week view).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub weeks: Vec<Week>,
}

impl Grid {
    /// Builds the month grid for `year`/`month` (1-based month).
    ///
    /// Leading cells come from the previous month and trailing cells from the
    /// next one, so the cell count is always a multiple of 7. An invalid
    /// month yields an empty grid.
    pub fn build(year: i32, month: u32, today: NaiveDate, week_start: WeekStart) -> Self {
        match Self::try_build(year, month, today, week_start) {
            Some(grid) => grid,
            None => {
                tracing::warn!(year, month, "cannot build grid for invalid month");
                Self::default()
            }
        }
    }

    fn try_build(year: i32, month: u32, today: NaiveDate, week_start: WeekStart) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = first.checked_add_months(chrono::Months::new(1))?;
        let days_in_month = (next_first - first).num_days() as u64;

        let leading = week_start.column_of(first);
        let total = leading + days_in_month;
        let trailing = (7 - total % 7) % 7;

        let grid_start = first.checked_sub_days(Days::new(leading))?;
        let today_iso = today.format("%Y-%m-%d").to_string();

        let cells = (0..total + trailing)
            .map(|offset| {
                let date = grid_start.checked_add_days(Days::new(offset))?;
                let in_month = date.year() == year && date.month() == month;
                Some(DayCell::new(date, in_month, &today_iso))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            weeks: chunk_weeks(cells),
        })
    }

    /// One-week grid containing `date`; `in_current_month` is relative to
    /// `date`'s month.
    pub fn week_containing(date: NaiveDate, today: NaiveDate, week_start: WeekStart) -> Self {
        let today_iso = today.format("%Y-%m-%d").to_string();
        let cells = date
            .checked_sub_days(Days::new(week_start.column_of(date)))
            .and_then(|start| {
                (0..7)
                    .map(|offset| {
                        let d = start.checked_add_days(Days::new(offset))?;
                        let in_month = d.year() == date.year() && d.month() == date.month();
                        Some(DayCell::new(d, in_month, &today_iso))
                    })
                    .collect::<Option<Vec<_>>>()
            });

        match cells {
            Some(cells) => Self {
                weeks: chunk_weeks(cells),
            },
            None => Self::default(),
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }
}

fn chunk_weeks(cells: Vec<DayCell>) -> Vec<Week> {
    cells
        .chunks_exact(7)
        .map(|chunk| Week {
            days: std::array::from_fn(|i| chunk[i].clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_leap_february_has_five_weeks() {
        let grid = Grid::build(2024, 2, make_date(2024, 2, 14), WeekStart::Sunday);

        assert_eq!(grid.weeks.len(), 5);
        // Feb 1st 2024 is a Thursday
        assert_eq!(grid.weeks[0].days[4].iso, "2024-02-01");
        assert!(!grid.weeks[0].days[3].in_current_month);
        assert_eq!(grid.weeks[0].days[0].iso, "2024-01-28");
        assert_eq!(grid.weeks[4].days[6].iso, "2024-03-02");
        assert_eq!(grid.days().filter(|c| c.in_current_month).count(), 29);
    }

    #[test]
    fn test_month_starting_on_week_start_has_no_leading_days() {
        // September 2024 starts on a Sunday
        let grid = Grid::build(2024, 9, make_date(2024, 1, 1), WeekStart::Sunday);
        assert_eq!(grid.weeks[0].days[0].iso, "2024-09-01");
        assert!(grid.weeks[0].days[0].in_current_month);
    }

    #[test]
    fn test_four_week_february() {
        // February 2015 starts on Sunday and has 28 days
        let grid = Grid::build(2015, 2, make_date(2015, 2, 1), WeekStart::Sunday);
        assert_eq!(grid.weeks.len(), 4);
        assert!(grid.days().all(|c| c.in_current_month));
    }

    #[test]
    fn test_monday_week_start() {
        let grid = Grid::build(2024, 6, make_date(2024, 6, 1), WeekStart::Monday);
        assert_eq!(grid.weeks[0].first_date().weekday(), Weekday::Mon);
        assert_eq!(grid.weeks[0].days[0].iso, "2024-05-27");
    }

    #[test]
    fn test_is_today_marks_single_cell() {
        let today = make_date(2024, 6, 10);
        let grid = Grid::build(2024, 6, today, WeekStart::Sunday);
        let marked: Vec<_> = grid.days().filter(|c| c.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].iso, "2024-06-10");
    }

    #[test]
    fn test_invalid_month_yields_empty_grid() {
        let grid = Grid::build(2024, 13, make_date(2024, 1, 1), WeekStart::Sunday);
        assert!(grid.weeks.is_empty());
    }

    #[test]
    fn test_week_containing() {
        let grid = Grid::week_containing(make_date(2024, 6, 12), make_date(2024, 6, 12), WeekStart::Sunday);
        assert_eq!(grid.weeks.len(), 1);
        assert_eq!(grid.weeks[0].days[0].iso, "2024-06-09");
        assert_eq!(grid.weeks[0].days[6].iso, "2024-06-15");
        assert!(grid.weeks[0].days[3].is_today);
    }

    #[test]
    fn test_week_clip() {
        let grid = Grid::build(2024, 6, make_date(2024, 6, 1), WeekStart::Sunday);
        // Week of June 9th..15th
        let week = &grid.weeks[2];
        assert_eq!(week.clip(make_date(2024, 6, 10), make_date(2024, 6, 14)), Some((1, 5)));
        assert_eq!(week.clip(make_date(2024, 6, 1), make_date(2024, 6, 30)), Some((0, 6)));
        assert_eq!(week.clip(make_date(2024, 6, 16), make_date(2024, 6, 20)), None);
        assert_eq!(week.clip(make_date(2024, 6, 14), make_date(2024, 6, 10)), None);
    }

    proptest! {
        #[test]
        fn prop_grid_covers_month_in_whole_weeks(
            year in 1900i32..2200,
            month in 1u32..=12,
            monday in any::<bool>(),
        ) {
            let week_start = if monday { WeekStart::Monday } else { WeekStart::Sunday };
            let grid = Grid::build(year, month, make_date(2000, 1, 1), week_start);

            prop_assert!((4..=6).contains(&grid.weeks.len()));
            prop_assert_eq!(grid.days().count() % 7, 0);
            prop_assert_eq!(grid.weeks[0].first_date().weekday(), week_start.weekday());

            let in_month: Vec<_> = grid.days().filter(|c| c.in_current_month).collect();
            let expected = make_date(year, month, 1)
                .checked_add_months(chrono::Months::new(1))
                .unwrap()
                .pred_opt()
                .unwrap()
                .day() as usize;
            prop_assert_eq!(in_month.len(), expected);
            for (i, cell) in in_month.iter().enumerate() {
                prop_assert_eq!(cell.date, make_date(year, month, i as u32 + 1));
            }

            let dates: Vec<_> = grid.days().map(|c| c.date).collect();
            prop_assert!(dates.windows(2).all(|w| w[0].succ_opt() == Some(w[1])));
        }
    }
}
