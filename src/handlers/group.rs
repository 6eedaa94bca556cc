//! 权限分组的 HTTP 处理器

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::AppState,
    models::group::{CreateGroupRequest, Group, UpdateGroupRequest},
};

/// 分组所属店铺；缺省表示全局分组
#[derive(Debug, Deserialize)]
pub struct ShopScope {
    pub shop_id: Option<Uuid>,
}

/// 创建分组
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    let group = state.group_service.create_group(req).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// 获取分组详情
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Group>, AppError> {
    let group = state.group_service.get_group(id).await?;
    Ok(Json(group))
}

/// 更新分组
pub async fn update_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScope>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, AppError> {
    let group = state.group_service.update_group(id, scope.shop_id, req).await?;
    Ok(Json(group))
}
