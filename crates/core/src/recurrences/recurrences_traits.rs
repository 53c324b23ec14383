use async_trait::async_trait;

use super::recurrences_model::{
    NewRecurrence, Recurrence, RecurrenceCreated, RecurrenceDetails, RecurrenceUpdate,
    RecurrenceUpdated,
};
use crate::errors::Result;

/// Read side of recurrence persistence. Writes go through the ledger unit of
/// work because they always touch transactions too.
pub trait RecurrenceRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, recurrence_id: &str) -> Result<Recurrence>;
    fn list_active(&self, user_id: &str) -> Result<Vec<Recurrence>>;
}

#[async_trait]
pub trait RecurrenceServiceTrait: Send + Sync {
    async fn create_recurrence(
        &self,
        user_id: &str,
        new_recurrence: NewRecurrence,
    ) -> Result<RecurrenceCreated>;

    async fn update_recurrence(
        &self,
        user_id: &str,
        recurrence_id: &str,
        update: RecurrenceUpdate,
    ) -> Result<RecurrenceUpdated>;

    /// Removes the recurrence and all its transactions; returns how many
    /// transactions went with it.
    async fn delete_recurrence(&self, user_id: &str, recurrence_id: &str) -> Result<usize>;

    fn list_active_recurrences(&self, user_id: &str) -> Result<Vec<Recurrence>>;

    fn get_recurrence_details(
        &self,
        user_id: &str,
        recurrence_id: &str,
    ) -> Result<RecurrenceDetails>;
}
