//! Recurrences module - recurring and installment transaction templates.

mod recurrences_engine;
mod recurrences_model;
mod recurrences_schedule;
mod recurrences_service;
mod recurrences_traits;


pub use recurrences_engine::{create_next_pending_transaction, installment_description};
pub use recurrences_model::{
    Frequency, NewRecurrence, Recurrence, RecurrenceCreated, RecurrenceDetails, RecurrenceUpdate,
    RecurrenceUpdated,
};
pub use recurrences_schedule::{advance, advance_anchored, occurrence_date};
pub use recurrences_service::RecurrenceService;
pub use recurrences_traits::{RecurrenceRepositoryTrait, RecurrenceServiceTrait};
