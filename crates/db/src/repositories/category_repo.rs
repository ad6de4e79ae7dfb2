//! Category procedures: `spCategoryCreate`, `spCategoryList`,
//! `spCategoryGet`, `spCategoryUpdate`, `spCategoryDelete`.

use async_trait::async_trait;
use taskhub_core::types::DbId;

use crate::error::StoreResult;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::scope::Scope;
use crate::procedures::{self, call};
use crate::store::CategoryStore;
use crate::DbPool;

/// Column list for category result rows.
const CATEGORY_COLUMNS: &str = "\
    id, account_id, user_id, name, color, icon, parent_id, level, \
    task_count, is_default, deleted, created_at, updated_at";

pub struct CategoryRepo {
    pool: DbPool,
}

impl CategoryRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepo {
    async fn create(&self, scope: Scope, input: &CreateCategory) -> StoreResult<Category> {
        let query = call(procedures::CATEGORY_CREATE, CATEGORY_COLUMNS, 6);
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(input.name.trim())
            .bind(&input.color)
            .bind(input.icon.as_deref())
            .bind(input.parent_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, scope: Scope) -> StoreResult<Vec<Category>> {
        let query = call(procedures::CATEGORY_LIST, CATEGORY_COLUMNS, 2);
        let rows = sqlx::query_as::<_, Category>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, scope: Scope, id: DbId) -> StoreResult<Option<Category>> {
        let query = call(procedures::CATEGORY_GET, CATEGORY_COLUMNS, 3);
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        scope: Scope,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        // `$7` says whether the parent changes at all; `$8` is the new parent
        // (NULL for the root) and is ignored when `$7` is false.
        let query = call(procedures::CATEGORY_UPDATE, CATEGORY_COLUMNS, 8);
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(id)
            .bind(input.name.trim())
            .bind(&input.color)
            .bind(input.icon.as_deref())
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, scope: Scope, id: DbId) -> StoreResult<bool> {
        let query = call(procedures::CATEGORY_DELETE, "id", 3);
        let deleted = sqlx::query_scalar::<_, DbId>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }
}
