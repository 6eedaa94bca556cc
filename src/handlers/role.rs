//! 角色注册表的 HTTP 处理器

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::AppError, middleware::AppState, models::role::RoleListResponse};

/// 列出注册表中的全部角色
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoleListResponse>, AppError> {
    let roles = state.role_sync.list_roles().await?;
    Ok(Json(RoleListResponse::from(roles)))
}
