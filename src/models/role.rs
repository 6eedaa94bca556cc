//! Role registry domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 角色注册表条目，以权限标识为主键
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// 角色列表响应
#[derive(Debug, Serialize)]
pub struct RoleListResponse {
    pub roles: Vec<String>,
    pub count: usize,
}

impl From<Vec<Role>> for RoleListResponse {
    fn from(roles: Vec<Role>) -> Self {
        let roles: Vec<String> = roles.into_iter().map(|r| r.name).collect();
        Self {
            count: roles.len(),
            roles,
        }
    }
}
