use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_enum;
use pocketledger_core::categories::Category;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: String,
    pub budget_group: Option<String>,
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<CategoryDB> for Category {
    type Error = StorageError;

    fn try_from(db: CategoryDB) -> Result<Self, Self::Error> {
        let budget_group = db
            .budget_group
            .as_deref()
            .map(|group| parse_enum(group, "categories.budget_group"))
            .transpose()?;
        Ok(Self {
            kind: parse_enum(&db.kind, "categories.kind")?,
            budget_group,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            color: db.color,
            created_at: db.created_at,
        })
    }
}

impl From<&Category> for CategoryDB {
    fn from(domain: &Category) -> Self {
        Self {
            id: domain.id.clone(),
            user_id: domain.user_id.clone(),
            name: domain.name.clone(),
            kind: domain.kind.as_str().to_string(),
            budget_group: domain.budget_group.map(|g| g.as_str().to_string()),
            color: domain.color.clone(),
            created_at: domain.created_at,
        }
    }
}
