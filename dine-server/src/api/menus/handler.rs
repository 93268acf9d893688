//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Menu, MenuCreate, MenuUpdate};
use crate::db::repository::MenuRepository;
use crate::utils::time::valid_availability_window;
use crate::utils::{AppError, AppResult};

/// GET /menus - 获取所有菜单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Menu>>> {
    let repo = MenuRepository::new(state.get_db());
    let menus = repo.find_all().await?;
    Ok(Json(menus))
}

/// GET /menus/{id} - 获取单个菜单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Menu>> {
    let repo = MenuRepository::new(state.get_db());
    let menu = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu {id} not found")))?;
    Ok(Json(menu))
}

/// POST /menus - 创建菜单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuCreate>,
) -> AppResult<Json<Menu>> {
    payload.validate()?;

    let now = Utc::now();
    let menu = Menu {
        id: None,
        name: payload.name,
        category: payload.category,
        start_date: payload.start_date,
        end_date: payload.end_date,
        created_at: now,
        updated_at: now,
    };

    let repo = MenuRepository::new(state.get_db());
    Ok(Json(repo.create(menu).await?))
}

/// PATCH /menus/{id} - 合并更新菜单
///
/// 可用窗口只按对更新：两个日期都给出时校验 `now < start < end`，
/// 只给出其中一个时忽略。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    payload.validate()?;

    match (payload.start_date, payload.end_date) {
        (Some(start), Some(end)) => {
            if !valid_availability_window(start, end, Utc::now()) {
                return Err(AppError::validation(
                    "start_date must lie in the future and precede end_date",
                ));
            }
        }
        (None, None) => {}
        _ => {
            // 单边日期不更新窗口
            payload.start_date = None;
            payload.end_date = None;
        }
    }

    let repo = MenuRepository::new(state.get_db());
    Ok(Json(repo.update(&id, payload).await?))
}
