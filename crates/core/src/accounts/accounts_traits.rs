//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Every method is scoped to the owning user; ids belonging to other users
/// behave exactly like missing ids.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account for the user.
    async fn create(&self, user_id: &str, new_account: NewAccount) -> Result<Account>;

    /// Updates name, type and active flag of an existing account.
    async fn update(&self, user_id: &str, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes an account by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, user_id: &str, account_id: &str) -> Result<usize>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Account>;

    /// Lists the user's accounts, optionally filtered by active status.
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account>;

    async fn update_account(&self, user_id: &str, account_update: AccountUpdate)
        -> Result<Account>;

    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<()>;

    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account>;

    fn list_accounts(&self, user_id: &str, is_active_filter: Option<bool>)
        -> Result<Vec<Account>>;

    fn get_active_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
}
