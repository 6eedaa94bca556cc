//! Group repository (权限分组数据访问)

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::group::{CreateGroupRequest, Group, UpdateGroupRequest},
    repository::store::GroupStore,
};

const GROUP_COLUMNS: &str =
    "id, name, slug, description, shop_id, permissions, created_at, updated_at";

/// slug 唯一索引冲突返回 400，其余写入错误视为分组存储不可用
fn write_error(e: sqlx::Error, slug: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::BadRequest(format!("Group with slug '{}' already exists", slug))
        }
        _ => AppError::group_store(e),
    }
}

pub struct GroupRepository {
    db: PgPool,
}

impl GroupRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupStore for GroupRepository {
    async fn find_group(&self, id: Uuid) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {} FROM groups WHERE id = $1",
            GROUP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(AppError::group_store)?;

        Ok(group)
    }

    async fn find_group_by_slug(
        &self,
        shop_id: Option<Uuid>,
        slug: &str,
    ) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {} FROM groups WHERE shop_id IS NOT DISTINCT FROM $1 AND slug = $2",
            GROUP_COLUMNS
        ))
        .bind(shop_id)
        .bind(slug)
        .fetch_optional(&self.db)
        .await
        .map_err(AppError::group_store)?;

        Ok(group)
    }

    /// 创建分组
    async fn insert_group(&self, req: &CreateGroupRequest) -> Result<Group> {
        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO groups (name, slug, description, shop_id, permissions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            GROUP_COLUMNS
        ))
        .bind(&req.name)
        .bind(&req.slug)
        .bind(&req.description)
        .bind(req.shop_id)
        .bind(&req.permissions)
        .fetch_one(&self.db)
        .await
        .map_err(|e| write_error(e, &req.slug))?;

        Ok(group)
    }

    /// 更新分组，只覆盖请求中提供的字段
    async fn update_group(
        &self,
        id: Uuid,
        shop_id: Option<Uuid>,
        req: &UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            UPDATE groups
            SET
                name = COALESCE($3, name),
                slug = COALESCE($4, slug),
                description = COALESCE($5, description),
                permissions = COALESCE($6, permissions),
                updated_at = NOW()
            WHERE id = $1 AND shop_id IS NOT DISTINCT FROM $2
            RETURNING {}
            "#,
            GROUP_COLUMNS
        ))
        .bind(id)
        .bind(shop_id)
        .bind(&req.name)
        .bind(&req.slug)
        .bind(&req.description)
        .bind(&req.permissions)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| write_error(e, req.slug.as_deref().unwrap_or_default()))?;

        Ok(group)
    }
}
