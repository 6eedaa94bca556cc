//! Group domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::catalog::BundleKind;

/// 权限分组；shop_id 为空表示全局分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub shop_id: Option<Uuid>,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// 按 slug 识别的分组类型
    pub fn bundle_kind(&self) -> Option<BundleKind> {
        BundleKind::from_slug(&self.slug)
    }

    /// 计算更新请求实际改动的字段。
    /// 只要请求携带了 permissions 就视为改动，保证权限写入总会触发注册表同步。
    pub fn changed_fields(&self, req: &UpdateGroupRequest) -> Vec<GroupField> {
        let mut fields = Vec::new();

        if req.name.as_ref().is_some_and(|n| *n != self.name) {
            fields.push(GroupField::Name);
        }
        if req.slug.as_ref().is_some_and(|s| *s != self.slug) {
            fields.push(GroupField::Slug);
        }
        if req.description.is_some() && req.description != self.description {
            fields.push(GroupField::Description);
        }
        if req.permissions.is_some() {
            fields.push(GroupField::Permissions);
        }

        fields
    }

    /// 应用更新请求中提供的字段
    pub fn apply(&mut self, req: &UpdateGroupRequest) {
        if let Some(name) = &req.name {
            self.name = name.clone();
        }
        if let Some(slug) = &req.slug {
            self.slug = slug.clone();
        }
        if let Some(description) = &req.description {
            self.description = Some(description.clone());
        }
        if let Some(permissions) = &req.permissions {
            self.permissions = permissions.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// 分组字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupField {
    Name,
    Slug,
    Description,
    Permissions,
}

impl GroupField {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupField::Name => "name",
            GroupField::Slug => "slug",
            GroupField::Description => "description",
            GroupField::Permissions => "permissions",
        }
    }
}

/// 创建分组请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    pub description: Option<String>,
    pub shop_id: Option<Uuid>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// 更新分组请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl UpdateGroupRequest {
    pub fn permissions(permissions: Vec<String>) -> Self {
        Self {
            permissions: Some(permissions),
            ..Default::default()
        }
    }
}
