//! Service layer: one trait per resource, one method per procedure.
//!
//! Handlers depend on these traits rather than on a concrete backend so
//! the same router can run against the Postgres procedure store or the
//! in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use taskhub_core::types::DbId;

use crate::error::StoreResult;
use crate::memory::MemoryStore;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::scope::Scope;
use crate::models::task::{CreateTask, Task, TaskListParams, UpdateTask};
use crate::models::task_category::{CreateTaskCategory, TaskCategory, TaskCategoryDetail};
use crate::repositories::{CategoryRepo, TaskCategoryRepo, TaskRepo};
use crate::DbPool;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// `spCategoryCreate`
    async fn create(&self, scope: Scope, input: &CreateCategory) -> StoreResult<Category>;
    /// `spCategoryList`: every live category in the account.
    async fn list(&self, scope: Scope) -> StoreResult<Vec<Category>>;
    /// `spCategoryGet`
    async fn get(&self, scope: Scope, id: DbId) -> StoreResult<Option<Category>>;
    /// `spCategoryUpdate`. `None` when the category does not exist.
    async fn update(
        &self,
        scope: Scope,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>>;
    /// `spCategoryDelete`. Soft-deletes and drops its task associations.
    /// Returns `false` when the category does not exist.
    async fn delete(&self, scope: Scope, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// `spTaskCreate`
    async fn create(&self, scope: Scope, input: &CreateTask) -> StoreResult<Task>;
    /// `spTaskList`
    async fn list(&self, scope: Scope, params: &TaskListParams) -> StoreResult<Vec<Task>>;
    /// `spTaskGet`
    async fn get(&self, scope: Scope, id: DbId) -> StoreResult<Option<Task>>;
    /// `spTaskUpdate`
    async fn update(&self, scope: Scope, id: DbId, input: &UpdateTask)
        -> StoreResult<Option<Task>>;
    /// `spTaskDelete`
    async fn delete(&self, scope: Scope, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait TaskCategoryStore: Send + Sync {
    /// `spTaskCategoryList`: categories linked to a task.
    async fn list(&self, scope: Scope, task_id: DbId) -> StoreResult<Vec<TaskCategoryDetail>>;
    /// `spTaskCategoryCreate`
    async fn create(&self, scope: Scope, input: &CreateTaskCategory) -> StoreResult<TaskCategory>;
    /// `spTaskCategoryDelete`. Returns `false` when no such link exists.
    async fn delete(&self, scope: Scope, task_id: DbId, category_id: DbId) -> StoreResult<bool>;
}

/// Which backend a [`Stores`] bundle talks to.
#[derive(Clone)]
enum Backend {
    Postgres(DbPool),
    Memory,
}

/// Handles to every store, cheaply cloneable into application state.
#[derive(Clone)]
pub struct Stores {
    pub categories: Arc<dyn CategoryStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub task_categories: Arc<dyn TaskCategoryStore>,
    backend: Backend,
}

impl Stores {
    /// Stores backed by the Postgres procedure store.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            categories: Arc::new(CategoryRepo::new(pool.clone())),
            tasks: Arc::new(TaskRepo::new(pool.clone())),
            task_categories: Arc::new(TaskCategoryRepo::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// Stores backed by a single shared [`MemoryStore`].
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            categories: store.clone(),
            tasks: store.clone(),
            task_categories: store,
            backend: Backend::Memory,
        }
    }

    /// Short backend name for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Whether the backing store is reachable.
    pub async fn health_check(&self) -> bool {
        match &self.backend {
            Backend::Postgres(pool) => crate::health_check(pool).await.is_ok(),
            Backend::Memory => true,
        }
    }
}
