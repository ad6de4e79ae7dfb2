//! Task procedures: `spTaskCreate`, `spTaskList`, `spTaskGet`,
//! `spTaskUpdate`, `spTaskDelete`.

use async_trait::async_trait;
use sqlx::types::Json;
use taskhub_core::types::DbId;

use crate::error::StoreResult;
use crate::models::scope::Scope;
use crate::models::task::{CreateTask, Task, TaskListParams, UpdateTask};
use crate::procedures::{self, call};
use crate::store::TaskStore;
use crate::DbPool;

/// Column list for task result rows.
const TASK_COLUMNS: &str = "\
    id, account_id, user_id, title, description, due_date, priority, \
    estimated_minutes, recurrence, status, deleted, created_at, updated_at";

pub struct TaskRepo {
    pool: DbPool,
}

impl TaskRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepo {
    async fn create(&self, scope: Scope, input: &CreateTask) -> StoreResult<Task> {
        let query = call(procedures::TASK_CREATE, TASK_COLUMNS, 8);
        let row = sqlx::query_as::<_, Task>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(input.title.trim())
            .bind(input.description.as_deref())
            .bind(input.due_date)
            .bind(input.priority.as_i16())
            .bind(input.estimated_minutes)
            .bind(input.recurrence.as_ref().map(Json))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, scope: Scope, params: &TaskListParams) -> StoreResult<Vec<Task>> {
        let query = call(procedures::TASK_LIST, TASK_COLUMNS, 5);
        let rows = sqlx::query_as::<_, Task>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(params.status.map(|s| s.as_i16()))
            .bind(params.priority.map(|p| p.as_i16()))
            .bind(params.category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, scope: Scope, id: DbId) -> StoreResult<Option<Task>> {
        let query = call(procedures::TASK_GET, TASK_COLUMNS, 3);
        let row = sqlx::query_as::<_, Task>(&query)
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
        input: &UpdateTask,
    ) -> StoreResult<Option<Task>> {
        let query = call(procedures::TASK_UPDATE, TASK_COLUMNS, 10);
        let row = sqlx::query_as::<_, Task>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(id)
            .bind(input.title.trim())
            .bind(input.description.as_deref())
            .bind(input.due_date)
            .bind(input.priority.as_i16())
            .bind(input.estimated_minutes)
            .bind(input.recurrence.as_ref().map(Json))
            .bind(input.status.as_i16())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, scope: Scope, id: DbId) -> StoreResult<bool> {
        let query = call(procedures::TASK_DELETE, "id", 3);
        let deleted = sqlx::query_scalar::<_, DbId>(&query)
            .bind(scope.account_id)
            .bind(scope.user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }
}
