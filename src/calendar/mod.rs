pub mod error;
pub mod event;
pub mod grid;
pub mod layout;
pub mod store;
pub mod view;

pub use error::ValidationError;
pub use event::{Event, EventDraft};
pub use grid::{Grid, Week, WeekStart};
pub use layout::{compute_spans, spans_in_week, EventSpan, SpanKind};
pub use store::EventStore;
pub use view::{parse_iso, ViewMode, ViewSelector};
