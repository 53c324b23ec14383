use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use crate::errors::Result;

#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn create(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;
    /// Fails with `ConstraintViolation` while transactions or recurrences
    /// still reference the category.
    async fn delete(&self, user_id: &str, category_id: &str) -> Result<usize>;
    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category>;
    fn list(&self, user_id: &str) -> Result<Vec<Category>>;
}

#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn create_category(&self, user_id: &str, new_category: NewCategory)
        -> Result<Category>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;
}
