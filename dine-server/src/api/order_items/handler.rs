//! Order Item API Handlers
//!
//! `POST /order-items` 接收一个订单项包：为桌台创建一个新订单，
//! 并把所有条目挂到该订单下，单价取自菜品记录。

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Order, OrderItem, OrderItemPack, OrderItemUpdate};
use crate::db::repository::{
    DiningTableRepository, FoodRepository, OrderItemRepository, OrderRepository,
};
use crate::utils::{AppError, AppResult};

/// GET /order-items - 获取所有订单项
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderItem>>> {
    let repo = OrderItemRepository::new(state.get_db());
    let items = repo.find_all().await?;
    Ok(Json(items))
}

/// GET /order-items/{id} - 获取单个订单项
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderItem>> {
    let repo = OrderItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order item {id} not found")))?;
    Ok(Json(item))
}

/// GET /order-items/order/{order_id} - 获取订单的所有条目
pub async fn list_by_order(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let repo = OrderItemRepository::new(state.get_db());
    let items = repo.find_by_order(&order_id).await?;
    Ok(Json(items))
}

/// POST /order-items - 创建订单项包
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderItemPack>,
) -> AppResult<Json<Vec<OrderItem>>> {
    payload.validate()?;
    if payload.order_items.is_empty() {
        return Err(AppError::validation("order_items must not be empty"));
    }
    for item in &payload.order_items {
        item.validate()?;
    }

    let table = DiningTableRepository::new(state.get_db())
        .find_by_id(&payload.table_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Table {} not found", payload.table_id)))?;
    let table_id = table
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Table record has no id"))?;

    // 先解析所有菜品，再写库；无效条目不会留下半成品订单
    let food_repo = FoodRepository::new(state.get_db());
    let mut lines = Vec::with_capacity(payload.order_items.len());
    for item in &payload.order_items {
        let food = food_repo
            .find_by_id(&item.food_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Food {} not found", item.food_id)))?;
        let food_id = food
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("Food record has no id"))?;
        lines.push((food_id, food.price.round_dp(2), item.quantity));
    }

    let now = Utc::now();
    let order = OrderRepository::new(state.get_db())
        .create(Order {
            id: None,
            order_date: now,
            table_id: Some(table_id),
            created_at: now,
            updated_at: now,
        })
        .await?;
    let order_id = order
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Order record has no id"))?;

    let item_repo = OrderItemRepository::new(state.get_db());
    let mut created = Vec::with_capacity(lines.len());
    for (food_id, unit_price, quantity) in lines {
        let order_item = OrderItem {
            id: None,
            quantity,
            unit_price,
            food_id,
            order_id: order_id.clone(),
            created_at: now,
            updated_at: now,
        };
        created.push(item_repo.create(order_item).await?);
    }

    tracing::info!(order_id = %order_id, items = created.len(), "Order item pack created");

    Ok(Json(created))
}

/// PATCH /order-items/{id} - 合并更新订单项
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut payload): Json<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    payload.validate()?;

    if let Some(unit_price) = payload.unit_price {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation("unit_price must not be negative"));
        }
        payload.unit_price = Some(unit_price.round_dp(2));
    }

    if let Some(food_id) = &payload.food_id {
        let food = FoodRepository::new(state.get_db())
            .find_by_id(food_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Food {food_id} not found")))?;
        payload.food_id = food.id.as_ref().map(|id| id.to_string());
    }

    let repo = OrderItemRepository::new(state.get_db());
    Ok(Json(repo.update(&id, payload).await?))
}
