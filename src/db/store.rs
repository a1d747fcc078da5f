use super::queries;
use crate::models::{PantryItem, Recipe};
use async_trait::async_trait;
use sqlx::PgPool;

/// 数据访问接口
///
/// 按用户过滤在这里完成，建议引擎信任传入的数据。
#[async_trait]
pub trait PantryStore: Send + Sync {
    async fn get_recipes(&self, user_id: i64) -> Result<Vec<Recipe>, sqlx::Error>;

    async fn get_pantry_items(&self, user_id: i64) -> Result<Vec<PantryItem>, sqlx::Error>;

    /// 同一户主下的成员数，用户无成员记录时为 0
    async fn get_household_size(&self, user_id: i64) -> Result<i64, sqlx::Error>;
}

/// PostgreSQL 实现
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PantryStore for PgStore {
    async fn get_recipes(&self, user_id: i64) -> Result<Vec<Recipe>, sqlx::Error> {
        queries::list_recipes(&self.pool, user_id).await
    }

    async fn get_pantry_items(&self, user_id: i64) -> Result<Vec<PantryItem>, sqlx::Error> {
        queries::list_pantry_items(&self.pool, user_id).await
    }

    async fn get_household_size(&self, user_id: i64) -> Result<i64, sqlx::Error> {
        queries::count_household(&self.pool, user_id).await
    }
}
