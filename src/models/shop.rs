//! Shop (tenant) domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 店铺；同一时刻最多一个主店铺
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}
