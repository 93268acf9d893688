//! Food API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::api::PageQuery;
use crate::core::ServerState;
use crate::db::models::{Food, FoodCreate, FoodListResponse, FoodUpdate};
use crate::db::repository::{FoodRepository, MenuRepository};
use crate::utils::{AppError, AppResult};

/// GET /foods - 分页列出菜品
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<FoodListResponse>> {
    let (start, limit) = query.resolve();

    let repo = FoodRepository::new(state.get_db());
    let (total_count, food_items) = repo.list(start, limit).await?;

    Ok(Json(FoodListResponse {
        total_count,
        food_items,
    }))
}

/// GET /foods/{id} - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Food>> {
    let repo = FoodRepository::new(state.get_db());
    let food = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food {id} not found")))?;
    Ok(Json(food))
}

/// POST /foods - 创建菜品
///
/// 菜品必须挂在已存在的菜单上；价格保留两位小数。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FoodCreate>,
) -> AppResult<Json<Food>> {
    payload.validate()?;

    if payload.price < Decimal::ZERO {
        return Err(AppError::validation("price must not be negative"));
    }

    let menu_id = resolve_menu_id(&state, &payload.menu_id).await?;

    let now = Utc::now();
    let food = Food {
        id: None,
        name: payload.name,
        price: payload.price.round_dp(2),
        food_image: payload.food_image,
        menu_id,
        created_at: now,
        updated_at: now,
    };

    let repo = FoodRepository::new(state.get_db());
    Ok(Json(repo.create(food).await?))
}

/// PATCH /foods/{id} - 合并更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut payload): Json<FoodUpdate>,
) -> AppResult<Json<Food>> {
    payload.validate()?;

    if let Some(price) = payload.price {
        if price < Decimal::ZERO {
            return Err(AppError::validation("price must not be negative"));
        }
        payload.price = Some(price.round_dp(2));
    }

    if let Some(menu_id) = &payload.menu_id {
        payload.menu_id = Some(resolve_menu_id(&state, menu_id).await?);
    }

    let repo = FoodRepository::new(state.get_db());
    Ok(Json(repo.update(&id, payload).await?))
}

/// Resolve a client-supplied menu reference to its canonical id string
async fn resolve_menu_id(state: &ServerState, menu_id: &str) -> AppResult<String> {
    let menu = MenuRepository::new(state.get_db())
        .find_by_id(menu_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Menu {menu_id} not found")))?;
    menu.id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Menu record has no id"))
}
