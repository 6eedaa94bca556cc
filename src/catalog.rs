//! 默认权限目录
//!
//! 四类内置分组（bundle kind）各自的默认权限列表。列表在进程启动时构建一次，
//! 之后只读。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 可识别的分组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleKind {
    AccountsManager,
    SystemManager,
    ShopManager,
    ShopOwner,
}

impl BundleKind {
    pub const ALL: [BundleKind; 4] = [
        BundleKind::AccountsManager,
        BundleKind::ShopManager,
        BundleKind::ShopOwner,
        BundleKind::SystemManager,
    ];

    /// 分组 slug
    pub fn slug(self) -> &'static str {
        match self {
            BundleKind::AccountsManager => "accounts-manager",
            BundleKind::SystemManager => "system-manager",
            BundleKind::ShopManager => "shop manager",
            BundleKind::ShopOwner => "owner",
        }
    }

    /// 按 slug 查找分组类型（大小写敏感）
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "accounts-manager" => Some(BundleKind::AccountsManager),
            "system-manager" => Some(BundleKind::SystemManager),
            "shop manager" => Some(BundleKind::ShopManager),
            "owner" => Some(BundleKind::ShopOwner),
            _ => None,
        }
    }

    /// 店铺级分组，可以从主店铺继承权限
    pub fn is_shop_group(self) -> bool {
        matches!(self, BundleKind::ShopManager | BundleKind::ShopOwner)
    }

    pub fn default_permissions(self) -> &'static [String] {
        default_permissions(self)
    }
}

impl std::fmt::Display for BundleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

const ACCOUNTS_MANAGER: &[&str] = &[
    "accounts:create",
    "accounts:read",
    "accounts:update",
    "accounts:update:emails",
    "accounts:update:address-books",
    "accounts:delete:address-books",
    "accounts:invite:group",
    "groups:read",
    "groups:manage:accounts",
];

const SYSTEM_MANAGER: &[&str] = &[
    "accounts:read",
    "email-templates:read",
    "email-templates:update",
    "navigation:read",
    "navigation:update",
    "shops:create",
    "shops:read",
    "shops:update",
    "system:manage",
    "tags:read",
    "tags:update",
];

const SHOP_MANAGER: &[&str] = &[
    "accounts:read",
    "carts:read",
    "carts:update",
    "discounts:create",
    "discounts:read",
    "discounts:update",
    "discounts:delete",
    "fulfillment:read",
    "fulfillment:update",
    "inventory:read",
    "inventory:update",
    "orders:read",
    "orders:update",
    "orders:approve:payment",
    "orders:capture:payment",
    "orders:refund:payment",
    "orders:cancel:item",
    "products:create",
    "products:read",
    "products:update",
    "products:archive",
    "products:publish",
    "shipping:read",
    "shipping:update",
    "tags:read",
    "tags:create",
    "tags:update",
    "taxes:read",
];

/// 店主在店铺经理的基础上额外拥有店铺与分组管理权限
const SHOP_OWNER_EXTRA: &[&str] = &[
    "groups:create",
    "groups:update",
    "groups:delete",
    "groups:manage:accounts",
    "shops:read:settings",
    "shops:update:settings",
    "payments:read",
    "payments:update",
    "taxes:update",
];

static CATALOG: Lazy<HashMap<BundleKind, Vec<String>>> = Lazy::new(|| {
    let owned = |list: &[&str]| list.iter().map(|p| p.to_string()).collect::<Vec<_>>();

    let mut owner = owned(SHOP_MANAGER);
    owner.extend(owned(SHOP_OWNER_EXTRA));

    HashMap::from([
        (BundleKind::AccountsManager, owned(ACCOUNTS_MANAGER)),
        (BundleKind::SystemManager, owned(SYSTEM_MANAGER)),
        (BundleKind::ShopManager, owned(SHOP_MANAGER)),
        (BundleKind::ShopOwner, owner),
    ])
});

/// 分组类型的默认权限
pub fn default_permissions(kind: BundleKind) -> &'static [String] {
    // CATALOG 覆盖 BundleKind 的所有变体
    CATALOG.get(&kind).map(Vec::as_slice).unwrap_or(&[])
}

/// 按 slug 查找默认权限，不可识别的 slug 返回 None
pub fn catalog_for(slug: &str) -> Option<&'static [String]> {
    BundleKind::from_slug(slug).map(default_permissions)
}
