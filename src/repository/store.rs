//! 存储接口
//!
//! 协调逻辑只依赖这些 trait；PostgreSQL 仓库和内存存储各自实现。

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        group::{CreateGroupRequest, Group, UpdateGroupRequest},
        role::Role,
    },
};

/// 角色注册表
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// 按权限标识查找注册表条目
    async fn find_role(&self, name: &str) -> Result<Option<Role>>;

    /// 条目不存在时插入。返回是否真正写入了新条目；
    /// 并发调用同一标识时只有一个返回 true。
    async fn insert_role_if_absent(&self, name: &str) -> Result<bool>;

    /// 列出全部条目，按名称排序
    async fn list_roles(&self) -> Result<Vec<Role>>;
}

/// 分组存储
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn find_group(&self, id: Uuid) -> Result<Option<Group>>;

    /// 按 (shop_id, slug) 查找；shop_id 为 None 时查找全局分组
    async fn find_group_by_slug(&self, shop_id: Option<Uuid>, slug: &str)
        -> Result<Option<Group>>;

    async fn insert_group(&self, req: &CreateGroupRequest) -> Result<Group>;

    /// 以 (id, shop_id) 定位分组并应用更新；分组不存在时返回 None
    async fn update_group(
        &self,
        id: Uuid,
        shop_id: Option<Uuid>,
        req: &UpdateGroupRequest,
    ) -> Result<Option<Group>>;
}

/// 店铺查询
#[async_trait]
pub trait ShopStore: Send + Sync {
    /// 当前主店铺 id；没有主店铺不是错误
    async fn primary_shop_id(&self) -> Result<Option<Uuid>>;
}
