//! Menu Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, merge_patch, parse_id};
use crate::db::models::{Menu, MenuUpdate};

pub const TABLE: &str = "menu";

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menus, newest last
    pub async fn find_all(&self) -> RepoResult<Vec<Menu>> {
        let menus: Vec<Menu> = self
            .base
            .db()
            .query("SELECT * FROM menu ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(menus)
    }

    /// Find menu by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Menu>> {
        let rid = parse_id(TABLE, id)?;
        let menu: Option<Menu> = self.base.db().select(rid).await?;
        Ok(menu)
    }

    /// Create a new menu
    pub async fn create(&self, menu: Menu) -> RepoResult<Menu> {
        let created: Option<Menu> = self.base.db().create(TABLE).content(menu).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu".to_string()))
    }

    /// Merge present fields into the menu record
    pub async fn update(&self, id: &str, data: MenuUpdate) -> RepoResult<Menu> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<Menu> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Menu {id} not found")));
        }

        let patch = merge_patch(&data)?;
        let updated: Option<Menu> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))
    }
}
