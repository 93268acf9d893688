//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables, one repository per
//! entity.

pub mod dining_table;
pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod user;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use food::FoodRepository;
pub use invoice::InvoiceRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

// =============================================================================
// ID Convention: API 接受裸 key 和完整 "table:key" 两种形式，
// 内部统一转换为 RecordId。
// =============================================================================

/// Normalize a path/body id into a [`RecordId`] for `table`
///
/// Accepts both `"abc"` and `"table:abc"`; rejects ids that name a
/// different table.
pub fn parse_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.is_empty() {
        return Err(RepoError::Validation(format!("Invalid {table} id: empty")));
    }
    match id.split_once(':') {
        Some((tb, key)) => {
            if tb != table || key.is_empty() {
                return Err(RepoError::Validation(format!("Invalid {table} id: {id}")));
            }
            Ok(RecordId::from_table_key(table, key))
        }
        None => Ok(RecordId::from_table_key(table, id)),
    }
}

/// Serialize an update payload and stamp `updated_at`
///
/// Update structs skip absent fields, so the resulting object carries
/// exactly the fields the caller supplied.
pub(crate) fn merge_patch<T: serde::Serialize>(data: &T) -> RepoResult<serde_json::Value> {
    let mut patch = serde_json::to_value(data)
        .map_err(|e| RepoError::Database(format!("Failed to serialize update: {e}")))?;
    if let serde_json::Value::Object(map) = &mut patch {
        map.insert(
            "updated_at".to_string(),
            serde_json::json!(chrono::Utc::now()),
        );
    }
    Ok(patch)
}

/// Row shape of `SELECT count() ... GROUP ALL`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_bare_key() {
        let id = parse_id("menu", "abc123").unwrap();
        assert_eq!(id.to_string(), "menu:abc123");
    }

    #[test]
    fn parse_id_accepts_full_record_id() {
        let id = parse_id("menu", "menu:abc123").unwrap();
        assert_eq!(id.to_string(), "menu:abc123");
    }

    #[test]
    fn parse_id_rejects_foreign_table() {
        assert!(parse_id("menu", "food:abc123").is_err());
    }

    #[test]
    fn parse_id_rejects_empty() {
        assert!(parse_id("menu", "").is_err());
        assert!(parse_id("menu", "menu:").is_err());
    }

    #[test]
    fn merge_patch_carries_only_present_fields() {
        let update = crate::db::models::MenuUpdate {
            name: Some("Lunch".to_string()),
            category: None,
            start_date: None,
            end_date: None,
        };
        let patch = merge_patch(&update).unwrap();
        let obj = patch.as_object().unwrap();
        assert_eq!(obj.get("name").unwrap(), "Lunch");
        assert!(!obj.contains_key("category"));
        assert!(obj.contains_key("updated_at"));
    }
}
