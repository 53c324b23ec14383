//! SQLite storage implementation for recurrences.

mod model;
mod repository;

pub use model::RecurrenceDB;
pub(crate) use repository::find_recurrence;
pub use repository::RecurrenceRepository;
