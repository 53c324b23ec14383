use async_trait::async_trait;

use super::users_model::{NewUser, RegisterUser, User};
use crate::errors::Result;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_by_id(&self, user_id: &str) -> Result<User>;
}

/// One-way password hashing, provided by the HTTP layer.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterUser) -> Result<User>;

    /// Returns the user when the credentials match, `Unauthorized` otherwise.
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;

    fn get_user(&self, user_id: &str) -> Result<User>;
}
