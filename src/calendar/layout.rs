//! Places events into the (week, row, column) slots of a grid.
//!
//! Events are packed greedily into an occupancy grid: each event claims the
//! lowest free row at its first unplaced day and extends rightward as far as
//! that row stays free, so multi-day events render as few contiguous bars as
//! possible. Days with more events than `max_visible_rows` get one overflow
//! marker on the row just below the visible ones.

use std::collections::HashSet;

use super::event::Event;
use super::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Event,
    /// Summarises `hidden` events that did not fit on this day.
    Overflow { hidden: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSpan {
    pub event: Event,
    pub kind: SpanKind,
    pub week_index: usize,
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl EventSpan {
    pub fn is_overflow(&self) -> bool {
        matches!(self.kind, SpanKind::Overflow { .. })
    }

    pub fn covers(&self, week_index: usize, col: usize) -> bool {
        self.week_index == week_index && self.col_start <= col && col <= self.col_end
    }
}

/// Row occupancy per (week, column).
struct Occupancy {
    rows: usize,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(weeks: usize, rows: usize) -> Self {
        Self {
            rows,
            cells: vec![false; weeks * 7 * rows],
        }
    }

    fn index(&self, week: usize, col: usize, row: usize) -> usize {
        (week * 7 + col) * self.rows + row
    }

    fn is_free(&self, week: usize, col: usize, row: usize) -> bool {
        !self.cells[self.index(week, col, row)]
    }

    fn occupy(&mut self, week: usize, col: usize, row: usize) {
        let i = self.index(week, col, row);
        self.cells[i] = true;
    }

    fn first_free_row(&self, week: usize, col: usize) -> Option<usize> {
        (0..self.rows).find(|&row| self.is_free(week, col, row))
    }
}

/// Computes the spans for `events` over `grid`.
///
/// Never fails: events whose end precedes their start, or that fall outside
/// the grid, produce no spans.
pub fn compute_spans(grid: &Grid, events: &[Event], max_visible_rows: usize) -> Vec<EventSpan> {
    let mut order: Vec<&Event> = Vec::with_capacity(events.len());
    for event in events {
        if event.end < event.start {
            tracing::warn!(id = %event.id, "skipping event that ends before it starts");
        } else {
            order.push(event);
        }
    }
    order.sort_by_key(|e| (e.start, e.duration_days()));

    let mut occupancy = Occupancy::new(grid.weeks.len(), max_visible_rows);
    // (position in `order`, week, column) cells already given a span
    let mut placed: HashSet<(usize, usize, usize)> = HashSet::new();
    let mut spans = Vec::new();

    // Contiguous runs.
    for (ei, event) in order.iter().enumerate() {
        for (wi, week) in grid.weeks.iter().enumerate() {
            let Some((col_start, col_end)) = week.clip(event.start, event.end) else {
                continue;
            };

            let mut col = col_start;
            while col <= col_end {
                let Some(row) = occupancy.first_free_row(wi, col) else {
                    col += 1;
                    continue;
                };

                let mut end = col;
                while end < col_end && occupancy.is_free(wi, end + 1, row) {
                    end += 1;
                }
                for c in col..=end {
                    occupancy.occupy(wi, c, row);
                    placed.insert((ei, wi, c));
                }
                spans.push(EventSpan {
                    event: (*event).clone(),
                    kind: SpanKind::Event,
                    week_index: wi,
                    row,
                    col_start: col,
                    col_end: end,
                });
                col = end + 1;
            }
        }
    }

    // Per-day fallback for days the contiguous pass skipped.
    for (ei, event) in order.iter().enumerate() {
        for (wi, week) in grid.weeks.iter().enumerate() {
            let Some((col_start, col_end)) = week.clip(event.start, event.end) else {
                continue;
            };

            for col in col_start..=col_end {
                if placed.contains(&(ei, wi, col)) {
                    continue;
                }
                if let Some(row) = occupancy.first_free_row(wi, col) {
                    occupancy.occupy(wi, col, row);
                    placed.insert((ei, wi, col));
                    spans.push(EventSpan {
                        event: (*event).clone(),
                        kind: SpanKind::Event,
                        week_index: wi,
                        row,
                        col_start: col,
                        col_end: col,
                    });
                }
            }
        }
    }

    // Overflow markers, counted from the events themselves.
    let mut marked: HashSet<(usize, usize)> = HashSet::new();
    let mut overflow_days = 0usize;
    for (wi, week) in grid.weeks.iter().enumerate() {
        for (col, cell) in week.days.iter().enumerate() {
            let count = events.iter().filter(|e| e.occurs_on(cell.date)).count();
            if count <= max_visible_rows || !marked.insert((wi, col)) {
                continue;
            }
            let hidden = count - max_visible_rows;
            overflow_days += 1;
            spans.push(EventSpan {
                event: Event::overflow_marker(cell.date, hidden),
                kind: SpanKind::Overflow { hidden },
                week_index: wi,
                row: max_visible_rows,
                col_start: col,
                col_end: col,
            });
        }
    }

    tracing::debug!(
        events = events.len(),
        weeks = grid.weeks.len(),
        spans = spans.len(),
        overflow_days,
        max_visible_rows,
        "computed event spans"
    );

    spans
}

/// Spans belonging to week `week_index`.
pub fn spans_in_week(spans: &[EventSpan], week_index: usize) -> impl Iterator<Item = &EventSpan> {
    spans.iter().filter(move |s| s.week_index == week_index)
}
