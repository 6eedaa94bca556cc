//! 主店铺权限继承

use std::sync::Arc;

use crate::{
    catalog::BundleKind,
    error::Result,
    repository::store::{GroupStore, ShopStore},
};

/// 新店铺分组优先继承主店铺上同 slug 分组的权限，其次使用默认目录
pub struct TenantInheritanceResolver {
    shops: Arc<dyn ShopStore>,
    groups: Arc<dyn GroupStore>,
}

impl TenantInheritanceResolver {
    pub fn new(shops: Arc<dyn ShopStore>, groups: Arc<dyn GroupStore>) -> Self {
        Self { shops, groups }
    }

    /// 解析店铺分组应得的权限。
    ///
    /// 非店铺分组的 slug 或没有主店铺时返回 None，由调用方使用默认目录。
    /// 有主店铺时返回其同 slug 分组的非空权限列表，否则返回默认目录，不会返回空列表。
    pub async fn resolve_inherited(&self, slug: &str) -> Result<Option<Vec<String>>> {
        let kind = match BundleKind::from_slug(slug) {
            Some(kind) if kind.is_shop_group() => kind,
            _ => return Ok(None),
        };

        let Some(primary_shop_id) = self.shops.primary_shop_id().await? else {
            tracing::debug!(slug = %slug, "No primary shop designated");
            return Ok(None);
        };

        let inherited = self
            .groups
            .find_group_by_slug(Some(primary_shop_id), kind.slug())
            .await?
            .map(|g| g.permissions)
            .filter(|permissions| !permissions.is_empty());

        let permissions = match inherited {
            Some(permissions) => {
                tracing::debug!(
                    primary_shop_id = %primary_shop_id,
                    slug = %kind,
                    count = permissions.len(),
                    "Inheriting permissions from primary shop"
                );
                permissions
            }
            None => {
                tracing::debug!(slug = %slug, "Primary shop group empty, using default permissions");
                kind.default_permissions().to_vec()
            }
        };

        Ok(Some(permissions))
    }
}
