//! 内存存储
//!
//! 实现全部存储接口，用于测试和无数据库的嵌入场景。
//! 可以注入故障来模拟注册表、分组存储或店铺查询不可用。

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        group::{CreateGroupRequest, Group, UpdateGroupRequest},
        role::Role,
        shop::Shop,
    },
    repository::store::{GroupStore, RoleStore, ShopStore},
};

#[derive(Default)]
pub struct MemoryStore {
    roles: RwLock<Vec<Role>>,
    groups: RwLock<HashMap<Uuid, Group>>,
    shops: RwLock<Vec<Shop>>,
    role_inserts: AtomicUsize,
    fail_registry: AtomicBool,
    fail_groups: AtomicBool,
    fail_shops: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加店铺；is_primary 为 true 时取消原主店铺
    pub async fn add_shop(&self, name: &str, is_primary: bool) -> Shop {
        let shop = Shop {
            id: Uuid::new_v4(),
            name: name.to_string(),
            is_primary,
            created_at: Utc::now(),
        };

        let mut shops = self.shops.write().await;
        if is_primary {
            shops.iter_mut().for_each(|s| s.is_primary = false);
        }
        shops.push(shop.clone());

        shop
    }

    /// 所有注册表条目名称，按插入顺序，包含可能的重复项
    pub async fn role_names(&self) -> Vec<String> {
        self.roles.read().await.iter().map(|r| r.name.clone()).collect()
    }

    /// insert_role_if_absent 被调用的次数
    pub fn role_insert_calls(&self) -> usize {
        self.role_inserts.load(Ordering::SeqCst)
    }

    pub fn fail_registry(&self, fail: bool) {
        self.fail_registry.store(fail, Ordering::SeqCst);
    }

    pub fn fail_groups(&self, fail: bool) {
        self.fail_groups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_shops(&self, fail: bool) {
        self.fail_shops.store(fail, Ordering::SeqCst);
    }

    fn check_registry(&self) -> Result<()> {
        if self.fail_registry.load(Ordering::SeqCst) {
            return Err(AppError::registry("memory registry offline"));
        }
        Ok(())
    }

    fn check_groups(&self) -> Result<()> {
        if self.fail_groups.load(Ordering::SeqCst) {
            return Err(AppError::group_store("memory group store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_role(&self, name: &str) -> Result<Option<Role>> {
        self.check_registry()?;
        let roles = self.roles.read().await;
        Ok(roles.iter().find(|r| r.name == name).cloned())
    }

    async fn insert_role_if_absent(&self, name: &str) -> Result<bool> {
        self.check_registry()?;
        self.role_inserts.fetch_add(1, Ordering::SeqCst);

        // 检查与插入在同一把写锁内完成
        let mut roles = self.roles.write().await;
        if roles.iter().any(|r| r.name == name) {
            return Ok(false);
        }
        roles.push(Role::new(name));
        Ok(true)
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.check_registry()?;
        let mut roles = self.roles.read().await.clone();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn find_group(&self, id: Uuid) -> Result<Option<Group>> {
        self.check_groups()?;
        Ok(self.groups.read().await.get(&id).cloned())
    }

    async fn find_group_by_slug(
        &self,
        shop_id: Option<Uuid>,
        slug: &str,
    ) -> Result<Option<Group>> {
        self.check_groups()?;
        let groups = self.groups.read().await;
        Ok(groups
            .values()
            .find(|g| g.shop_id == shop_id && g.slug == slug)
            .cloned())
    }

    async fn insert_group(&self, req: &CreateGroupRequest) -> Result<Group> {
        self.check_groups()?;
        let mut groups = self.groups.write().await;

        if groups
            .values()
            .any(|g| g.shop_id == req.shop_id && g.slug == req.slug)
        {
            return Err(AppError::BadRequest(format!(
                "Group with slug '{}' already exists",
                req.slug
            )));
        }

        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            slug: req.slug.clone(),
            description: req.description.clone(),
            shop_id: req.shop_id,
            permissions: req.permissions.clone(),
            created_at: now,
            updated_at: now,
        };
        groups.insert(group.id, group.clone());

        Ok(group)
    }

    async fn update_group(
        &self,
        id: Uuid,
        shop_id: Option<Uuid>,
        req: &UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        self.check_groups()?;
        let mut groups = self.groups.write().await;

        if let Some(slug) = &req.slug {
            if groups
                .values()
                .any(|g| g.id != id && g.shop_id == shop_id && &g.slug == slug)
            {
                return Err(AppError::BadRequest(format!(
                    "Group with slug '{}' already exists",
                    slug
                )));
            }
        }

        match groups.get_mut(&id) {
            Some(group) if group.shop_id == shop_id => {
                group.apply(req);
                Ok(Some(group.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl ShopStore for MemoryStore {
    async fn primary_shop_id(&self) -> Result<Option<Uuid>> {
        if self.fail_shops.load(Ordering::SeqCst) {
            return Err(AppError::tenant("memory shop store offline"));
        }
        let shops = self.shops.read().await;
        Ok(shops.iter().find(|s| s.is_primary).map(|s| s.id))
    }
}
