//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderUpdate};
use crate::db::repository::{DiningTableRepository, OrderRepository};
use crate::utils::{AppError, AppResult};

/// GET /orders - 获取所有订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

/// GET /orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(order))
}

/// POST /orders - 创建订单
///
/// 给出桌台时必须指向已存在的桌台。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload.validate()?;

    let table_id = match &payload.table_id {
        Some(table_id) => Some(resolve_table_id(&state, table_id).await?),
        None => None,
    };

    let now = Utc::now();
    let order = Order {
        id: None,
        order_date: payload.order_date,
        table_id,
        created_at: now,
        updated_at: now,
    };

    let repo = OrderRepository::new(state.get_db());
    Ok(Json(repo.create(order).await?))
}

/// PATCH /orders/{id} - 合并更新订单
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    payload.validate()?;

    if let Some(table_id) = &payload.table_id {
        payload.table_id = Some(resolve_table_id(&state, table_id).await?);
    }

    let repo = OrderRepository::new(state.get_db());
    Ok(Json(repo.update(&id, payload).await?))
}

/// Resolve a client-supplied table reference to its canonical id string
async fn resolve_table_id(state: &ServerState, table_id: &str) -> AppResult<String> {
    let table = DiningTableRepository::new(state.get_db())
        .find_by_id(table_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Table {table_id} not found")))?;
    table
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Table record has no id"))
}
