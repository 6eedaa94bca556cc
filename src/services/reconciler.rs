//! 分组协调器
//!
//! 分组创建时补齐初始权限；分组权限变更时把权限同步进角色注册表。

use std::sync::Arc;

use crate::{
    catalog::BundleKind,
    error::Result,
    models::group::{Group, GroupField},
    services::{
        group_service::GroupMutations, inheritance_service::TenantInheritanceResolver,
        role_sync_service::RoleSyncService,
    },
};

/// 创建协调结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationOutcome {
    /// 创建时已显式提供权限，未做改动
    Kept,
    /// 写入了计算出的初始权限（可能为空）
    Assigned(Vec<String>),
}

/// 更新协调结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// permissions 未变更
    Ignored,
    /// 已同步注册表，携带新注册条目数
    Synced(usize),
}

pub struct GroupCreationReconciler {
    resolver: Arc<TenantInheritanceResolver>,
    mutations: Arc<dyn GroupMutations>,
    role_sync: Arc<RoleSyncService>,
}

impl GroupCreationReconciler {
    pub fn new(
        resolver: Arc<TenantInheritanceResolver>,
        mutations: Arc<dyn GroupMutations>,
        role_sync: Arc<RoleSyncService>,
    ) -> Self {
        Self {
            resolver,
            mutations,
            role_sync,
        }
    }

    /// 处理 "group created"
    ///
    /// 显式提供权限的分组不会被改写，但其权限仍会登记到注册表，
    /// 因此注册表不可用时这种情况也返回 RegistryUnavailable。
    pub async fn handle(&self, group: &Group) -> Result<CreationOutcome> {
        if !group.permissions.is_empty() {
            // 显式提供的权限不覆盖，但仍需登记到注册表
            tracing::debug!(group_id = %group.id, "Permissions supplied on create, keeping them");
            self.role_sync.ensure_roles(&group.permissions).await?;
            return Ok(CreationOutcome::Kept);
        }

        let permissions = self.initial_permissions(group).await?;

        // 空列表也写入，保证决策对外可见
        self.mutations
            .update_group_permissions(group.id, group.shop_id, permissions.clone())
            .await?;

        // 更新事件也会触发同步；这里直接同步，不依赖事件往返
        self.role_sync.ensure_roles(&permissions).await?;

        tracing::info!(
            group_id = %group.id,
            slug = %group.slug,
            shop_id = ?group.shop_id,
            count = permissions.len(),
            "Initial group permissions assigned"
        );

        Ok(CreationOutcome::Assigned(permissions))
    }

    /// 初始权限：系统分组用默认目录，店铺分组走主店铺继承，其余为空
    async fn initial_permissions(&self, group: &Group) -> Result<Vec<String>> {
        let permissions = match group.bundle_kind() {
            Some(kind @ (BundleKind::AccountsManager | BundleKind::SystemManager)) => {
                kind.default_permissions().to_vec()
            }
            Some(kind) if group.shop_id.is_some() => self
                .resolver
                .resolve_inherited(kind.slug())
                .await?
                .unwrap_or_else(|| kind.default_permissions().to_vec()),
            _ => Vec::new(),
        };

        Ok(permissions)
    }
}

pub struct GroupUpdateReconciler {
    role_sync: Arc<RoleSyncService>,
}

impl GroupUpdateReconciler {
    pub fn new(role_sync: Arc<RoleSyncService>) -> Self {
        Self { role_sync }
    }

    /// 处理 "group updated"；只关心 permissions 字段
    pub async fn handle(&self, group: &Group, updated_fields: &[GroupField]) -> Result<UpdateOutcome> {
        if !updated_fields.contains(&GroupField::Permissions) {
            return Ok(UpdateOutcome::Ignored);
        }

        let inserted = self.role_sync.ensure_roles(&group.permissions).await?;

        Ok(UpdateOutcome::Synced(inserted))
    }
}
