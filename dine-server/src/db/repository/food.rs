//! Food Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, merge_patch, parse_id};
use crate::db::models::{Food, FoodUpdate};

pub const TABLE: &str = "food";

#[derive(Clone)]
pub struct FoodRepository {
    base: BaseRepository,
}

impl FoodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find food by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Food>> {
        let rid = parse_id(TABLE, id)?;
        let food: Option<Food> = self.base.db().select(rid).await?;
        Ok(food)
    }

    /// Create a new food
    pub async fn create(&self, food: Food) -> RepoResult<Food> {
        let created: Option<Food> = self.base.db().create(TABLE).content(food).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food".to_string()))
    }

    /// Paginated listing, oldest first
    ///
    /// Returns `(total_count, slice)`.
    pub async fn list(&self, start: i64, limit: i64) -> RepoResult<(u64, Vec<Food>)> {
        let query = format!(
            "SELECT count() FROM food GROUP ALL;
             SELECT * FROM food ORDER BY created_at LIMIT {limit} START {start}"
        );
        let mut result = self.base.db().query(query).await?;
        let counts: Vec<CountRow> = result.take(0)?;
        let foods: Vec<Food> = result.take(1)?;
        Ok((counts.first().map(|c| c.count).unwrap_or(0), foods))
    }

    /// Merge present fields into the food record
    pub async fn update(&self, id: &str, data: FoodUpdate) -> RepoResult<Food> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<Food> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Food {id} not found")));
        }

        let patch = merge_patch(&data)?;
        let updated: Option<Food> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Food {id} not found")))
    }
}
