//! SQLite storage implementation for categories.

mod model;
mod repository;

pub use model::CategoryDB;
pub(crate) use repository::find_category;
pub use repository::CategoryRepository;
