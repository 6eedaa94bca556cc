//! Role repository (角色注册表数据访问)

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::{AppError, Result},
    models::role::Role,
    repository::store::RoleStore,
};

pub struct RoleRepository {
    db: PgPool,
}

impl RoleRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    /// 根据名称查找角色
    async fn find_role(&self, name: &str) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>("SELECT name, created_at FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.db)
            .await
            .map_err(AppError::registry)?;

        Ok(role)
    }

    /// 创建角色；主键冲突时不做任何事
    async fn insert_role_if_absent(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&self.db)
            .await
            .map_err(AppError::registry)?;

        Ok(result.rows_affected() > 0)
    }

    /// 列出所有角色
    async fn list_roles(&self) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>("SELECT name, created_at FROM roles ORDER BY name")
            .fetch_all(&self.db)
            .await
            .map_err(AppError::registry)?;

        Ok(roles)
    }
}
