use log::info;
use std::sync::Arc;

use super::users_model::{NewUser, RegisterUser, User};
use super::users_traits::{PasswordHasher, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }
}

fn invalid_credentials() -> Error {
    Error::Unauthorized("Invalid email or password".to_string())
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, request: RegisterUser) -> Result<User> {
        request.validate()?;
        let email = request.normalized_email();
        if self.repository.find_by_email(&email)?.is_some() {
            return Err(Error::Conflict("Email is already registered".to_string()));
        }
        let password_hash = self.hasher.hash(&request.password)?;
        let user = self
            .repository
            .create(NewUser {
                email,
                name: request.name.trim().to_string(),
                password_hash,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim().to_lowercase();
        let user = self
            .repository
            .find_by_email(&email)?
            .ok_or_else(invalid_credentials)?;
        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(invalid_credentials());
        }
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }
}
