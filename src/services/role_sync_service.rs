//! 角色注册表同步服务

use std::collections::HashSet;
use std::sync::Arc;

use crate::{error::Result, models::role::Role, repository::store::RoleStore};

pub struct RoleSyncService {
    roles: Arc<dyn RoleStore>,
}

impl RoleSyncService {
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// 确保每个权限标识都存在于注册表中，返回新注册的条目数。
    ///
    /// 重复调用结果相同；并发调用依赖存储的条件插入保证不产生重复条目。
    /// 注册表不可用时错误直接返回给调用方。
    pub async fn ensure_roles<I>(&self, ids: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let pending = dedup(ids);
        if pending.is_empty() {
            return Ok(0);
        }

        let mut inserted = 0;
        for name in &pending {
            if self.roles.find_role(name).await?.is_some() {
                continue;
            }
            if self.roles.insert_role_if_absent(name).await? {
                tracing::debug!(role = %name, "Role registered");
                inserted += 1;
            }
        }

        if inserted > 0 {
            metrics::counter!("roles.registered").increment(inserted as u64);
            tracing::info!(
                requested = pending.len(),
                inserted = inserted,
                "Role registry updated"
            );
        }

        Ok(inserted)
    }

    /// 列出注册表
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.roles.list_roles().await
    }
}

/// 去重并保留首次出现的顺序
fn dedup<I>(ids: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .map(|id| id.as_ref().to_string())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
