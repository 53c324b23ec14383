use log::debug;
use std::sync::Arc;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(
        &self,
        user_id: &str,
        new_category: NewCategory,
    ) -> Result<Category> {
        new_category.validate()?;
        debug!("Creating {} category '{}'", new_category.kind, new_category.name);
        self.repository.create(user_id, new_category).await
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        // Ownership first so other users' ids read as missing.
        self.repository.get_by_id(user_id, category_id)?;
        if self.repository.delete(user_id, category_id).await? == 0 {
            return Err(Error::not_found("Category"));
        }
        Ok(())
    }

    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.repository.list(user_id)
    }
}
