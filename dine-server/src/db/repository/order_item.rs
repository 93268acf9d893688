//! Order Item Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, merge_patch, parse_id};
use crate::db::models::{OrderItem, OrderItemUpdate};

pub const TABLE: &str = "order_item";

#[derive(Clone)]
pub struct OrderItemRepository {
    base: BaseRepository,
}

impl OrderItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all order items, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find order item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderItem>> {
        let rid = parse_id(TABLE, id)?;
        let item: Option<OrderItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    /// Find every item of one order
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let order_rid = parse_id(super::order::TABLE, order_id)?;
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order_id ORDER BY created_at")
            .bind(("order_id", order_rid.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Create a new order item
    pub async fn create(&self, item: OrderItem) -> RepoResult<OrderItem> {
        let created: Option<OrderItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order item".to_string()))
    }

    /// Merge present fields into the order item record
    pub async fn update(&self, id: &str, data: OrderItemUpdate) -> RepoResult<OrderItem> {
        let rid = parse_id(TABLE, id)?;
        let existing: Option<OrderItem> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Order item {id} not found")));
        }

        let patch = merge_patch(&data)?;
        let updated: Option<OrderItem> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order item {id} not found")))
    }
}
