//! Dining Table Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, merge_patch, parse_id};
use crate::db::models::{DiningTable, DiningTableUpdate};

pub const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all dining tables ordered by table number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find dining table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let rid = parse_id(TABLE, id)?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        Ok(table)
    }

    /// Create a new dining table
    pub async fn create(&self, table: DiningTable) -> RepoResult<DiningTable> {
        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Merge present fields into the dining table record
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<DiningTable> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Table {id} not found")));
        }

        let patch = merge_patch(&data)?;
        let updated: Option<DiningTable> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
    }
}
