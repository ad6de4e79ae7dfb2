//! Association procedures: `spTaskCategoryList`, `spTaskCategoryCreate`,
//! `spTaskCategoryDelete`.

use async_trait::async_trait;
use taskhub_core::types::DbId;

use crate::error::StoreResult;
use crate::models::scope::Scope;
use crate::models::task_category::{CreateTaskCategory, TaskCategory, TaskCategoryDetail};
use crate::procedures::{self, call};
use crate::store::TaskCategoryStore;
use crate::DbPool;

const LINK_COLUMNS: &str = "account_id, task_id, category_id, created_at";

const DETAIL_COLUMNS: &str = "task_id, category_id, name, color, icon, level, created_at";

pub struct TaskCategoryRepo {
    pool: DbPool,
}

impl TaskCategoryRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskCategoryStore for TaskCategoryRepo {
    async fn list(&self, scope: Scope, task_id: DbId) -> StoreResult<Vec<TaskCategoryDetail>> {
        let query = call(procedures::TASK_CATEGORY_LIST, DETAIL_COLUMNS, 3);
        let rows = sqlx::query_as::<_, TaskCategoryDetail>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(task_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, scope: Scope, input: &CreateTaskCategory) -> StoreResult<TaskCategory> {
        let query = call(procedures::TASK_CATEGORY_CREATE, LINK_COLUMNS, 4);
        let row = sqlx::query_as::<_, TaskCategory>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(input.task_id)
            .bind(input.category_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, scope: Scope, task_id: DbId, category_id: DbId) -> StoreResult<bool> {
        let query = call(procedures::TASK_CATEGORY_DELETE, "task_id", 4);
        let deleted = sqlx::query_scalar::<_, DbId>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(task_id)
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }
}
