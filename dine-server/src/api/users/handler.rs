//! User API Handlers
//!
//! Signup, login, and user queries

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use validator::Validate;

use crate::api::PageQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{LoginRequest, SignupRequest, User, UserListResponse, UserResponse};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// POST /users/signup - 注册新用户并签发令牌对
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let repo = UserRepository::new(state.get_db());

    if repo
        .email_or_phone_exists(&payload.email, &payload.phone)
        .await?
    {
        return Err(AppError::conflict("this email or phone already exists"));
    }

    let hash_pass = User::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let now = Utc::now();
    let user = User {
        id: None,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        phone: payload.phone,
        hash_pass,
        role: payload.role.unwrap_or_default(),
        avatar: payload.avatar,
        token: None,
        refresh_token: None,
        created_at: now,
        updated_at: now,
    };

    let mut created = repo.create(user).await?;
    let user_id = created
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Created user has no id"))?;

    let pair = state
        .get_jwt_service()
        .generate_token_pair(
            &user_id.to_string(),
            &created.email,
            &created.first_name,
            &created.last_name,
            created.role.as_str(),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    repo.store_tokens(&user_id, &pair.access_token, &pair.refresh_token)
        .await?;

    tracing::info!(user_id = %user_id, email = %created.email, "User signed up");

    created.token = Some(pair.access_token);
    created.refresh_token = Some(pair.refresh_token);
    Ok(Json(UserResponse::from(created)))
}

/// POST /users/login - 验证凭据并重新签发令牌对
///
/// 登录会重新生成访问/刷新令牌对并覆盖用户记录中存储的旧对。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let repo = UserRepository::new(state.get_db());

    let Some(mut user) = repo.find_by_email(&payload.email).await? else {
        security_log!("WARN", "login_unknown_email", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    };

    let password_valid = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

    if !password_valid {
        security_log!("WARN", "login_bad_password", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record has no id"))?;

    let pair = state
        .get_jwt_service()
        .generate_token_pair(
            &user_id.to_string(),
            &user.email,
            &user.first_name,
            &user.last_name,
            user.role.as_str(),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    repo.store_tokens(&user_id, &pair.access_token, &pair.refresh_token)
        .await?;

    tracing::info!(user_id = %user_id, email = %user.email, "User logged in");

    user.token = Some(pair.access_token);
    user.refresh_token = Some(pair.refresh_token);
    Ok(Json(UserResponse::from(user)))
}

/// GET /users - 分页列出用户
pub async fn list(
    user: CurrentUser,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<UserListResponse>> {
    let (start, limit) = query.resolve();

    let repo = UserRepository::new(state.get_db());
    let (total_count, users) = repo.list(start, limit).await?;

    tracing::debug!(requested_by = %user.email, start, limit, "Listing users");

    Ok(Json(UserListResponse {
        total_count,
        user_items: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /users/{id} - 获取单个用户
pub async fn get_by_id(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let repo = UserRepository::new(state.get_db());
    let found = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

    tracing::debug!(requested_by = %user.email, target = %id, "Fetched user");

    Ok(Json(UserResponse::from(found)))
}
