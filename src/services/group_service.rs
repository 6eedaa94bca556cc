//! 分组变更服务
//! 所有分组写入都经过这里，写入成功后发布对应事件

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    events::{EventBus, GroupEvent},
    models::group::{CreateGroupRequest, Group, UpdateGroupRequest},
    repository::store::GroupStore,
};

/// 分组权限更新入口。
/// 实现方必须在写入后发布 "group updated" 事件，且 updated_fields 包含 permissions。
#[async_trait]
pub trait GroupMutations: Send + Sync {
    async fn update_group_permissions(
        &self,
        group_id: Uuid,
        shop_id: Option<Uuid>,
        permissions: Vec<String>,
    ) -> Result<Group>;
}

pub struct GroupService {
    groups: Arc<dyn GroupStore>,
    event_bus: Arc<EventBus>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupStore>, event_bus: Arc<EventBus>) -> Self {
        Self { groups, event_bus }
    }

    /// 创建分组
    pub async fn create_group(&self, req: CreateGroupRequest) -> Result<Group> {
        req.validate()?;

        let group = self.groups.insert_group(&req).await?;

        tracing::info!(
            group_id = %group.id,
            slug = %group.slug,
            shop_id = ?group.shop_id,
            "Group created"
        );

        self.event_bus.publish(GroupEvent::Created {
            group: group.clone(),
        });

        Ok(group)
    }

    /// 获取分组
    pub async fn get_group(&self, id: Uuid) -> Result<Group> {
        self.groups
            .find_group(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {}", id)))
    }

    /// 更新分组；没有实际改动时不写入也不发布事件
    pub async fn update_group(
        &self,
        id: Uuid,
        shop_id: Option<Uuid>,
        req: UpdateGroupRequest,
    ) -> Result<Group> {
        req.validate()?;

        let existing = self
            .groups
            .find_group(id)
            .await?
            .filter(|g| g.shop_id == shop_id)
            .ok_or_else(|| AppError::NotFound(format!("Group {}", id)))?;

        let updated_fields = existing.changed_fields(&req);
        if updated_fields.is_empty() {
            return Ok(existing);
        }

        let group = self
            .groups
            .update_group(id, shop_id, &req)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {}", id)))?;

        tracing::info!(
            group_id = %group.id,
            fields = ?updated_fields,
            "Group updated"
        );

        self.event_bus.publish(GroupEvent::Updated {
            group: group.clone(),
            updated_fields,
        });

        Ok(group)
    }
}

#[async_trait]
impl GroupMutations for GroupService {
    async fn update_group_permissions(
        &self,
        group_id: Uuid,
        shop_id: Option<Uuid>,
        permissions: Vec<String>,
    ) -> Result<Group> {
        self.update_group(group_id, shop_id, UpdateGroupRequest::permissions(permissions))
            .await
    }
}
