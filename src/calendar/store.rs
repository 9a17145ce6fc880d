use chrono::NaiveDate;
use uuid::Uuid;

use super::error::ValidationError;
use super::event::{Event, EventDraft};

/// In-memory, insertion-ordered event collection.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `draft`, assigns it a fresh id and appends it.
    pub fn add(&mut self, draft: EventDraft) -> Result<&Event, ValidationError> {
        draft.validate()?;

        let event = draft.into_event(Uuid::new_v4().to_string());
        tracing::info!(id = %event.id, start = %event.start, end = %event.end, "event added");
        self.events.push(event);

        let index = self.events.len() - 1;
        Ok(&self.events[index])
    }

    /// Removes the event with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(index);
        tracing::info!(id, "event removed");
        Some(removed)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events covering `date`, ordered by start date (stable for equal starts).
    pub fn events_on_day(&self, date: NaiveDate) -> Vec<&Event> {
        let mut found: Vec<&Event> = self.events.iter().filter(|e| e.occurs_on(date)).collect();
        found.sort_by_key(|e| e.start);
        found
    }

    /// Events that start and end on `date`.
    pub fn single_day_events_on_day(&self, date: NaiveDate) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.start == date && e.end == date)
            .collect()
    }
}
