//! Shop repository (店铺数据访问)

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    repository::store::ShopStore,
};

pub struct ShopRepository {
    db: PgPool,
}

impl ShopRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ShopStore for ShopRepository {
    async fn primary_shop_id(&self) -> Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM shops WHERE is_primary LIMIT 1")
            .fetch_optional(&self.db)
            .await
            .map_err(AppError::tenant)?;

        Ok(id)
    }
}
