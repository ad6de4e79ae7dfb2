//! Process-local implementation of the procedure-store contract.
//!
//! Mirrors the rules the procedure store enforces so the HTTP layer can be
//! exercised without a database and so the server can run locally with
//! `STORE_BACKEND=memory`. Rule violations surface as
//! [`StoreError::BusinessRule`], exactly as SQLSTATE `51000` does from
//! Postgres.
//!
//! Rules:
//! - category names are unique per account among live categories,
//!   compared case-insensitively after trimming;
//! - a child sits one level below its parent and no deeper than
//!   [`MAX_CATEGORY_LEVEL`]; moving a subtree must keep every descendant
//!   within the cap;
//! - an account holds at most [`MAX_CATEGORIES_PER_ACCOUNT`] live categories;
//! - a category cannot become its own ancestor;
//! - default categories and categories with live children cannot be deleted;
//! - deleting a category or task soft-deletes the row and removes its
//!   associations;
//! - a task may be linked to a category at most once.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use taskhub_core::category::{
    child_level, normalize_name, MAX_CATEGORIES_PER_ACCOUNT, MAX_CATEGORY_LEVEL,
};
use taskhub_core::error::CoreError;
use taskhub_core::types::DbId;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::scope::Scope;
use crate::models::task::{CreateTask, Task, TaskListParams, UpdateTask};
use crate::models::task_category::{CreateTaskCategory, TaskCategory, TaskCategoryDetail};
use crate::store::{CategoryStore, TaskCategoryStore, TaskStore};

#[derive(Default)]
struct Tables {
    last_id: DbId,
    categories: Vec<Category>,
    tasks: Vec<Task>,
    links: Vec<TaskCategory>,
}

/// In-memory procedure store. One instance serves all three store traits.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a protected default category for an account.
    ///
    /// Default categories are provisioned with the account rather than
    /// through the API, so this bypasses the create rules except
    /// uniqueness.
    pub async fn insert_default_category(
        &self,
        scope: Scope,
        name: &str,
        color: &str,
    ) -> StoreResult<Category> {
        let mut t = self.tables.lock().await;
        t.ensure_unique_name(scope.account_id, name, None)?;

        let now = Utc::now();
        let id = t.next_id();
        let category = Category {
            id,
            account_id: scope.account_id,
            user_id: scope.user_id,
            name: name.trim().to_string(),
            color: color.to_string(),
            icon: None,
            parent_id: None,
            level: 0,
            task_count: 0,
            is_default: true,
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        t.categories.push(category.clone());
        Ok(category)
    }
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn live_category(&self, account_id: DbId, id: DbId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id && c.account_id == account_id && !c.deleted)
    }

    fn live_category_mut(&mut self, account_id: DbId, id: DbId) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id && c.account_id == account_id && !c.deleted)
    }

    fn live_task(&self, account_id: DbId, id: DbId) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id && t.account_id == account_id && !t.deleted)
    }

    fn live_task_mut(&mut self, account_id: DbId, id: DbId) -> Option<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id && t.account_id == account_id && !t.deleted)
    }

    fn ensure_unique_name(
        &self,
        account_id: DbId,
        name: &str,
        except: Option<DbId>,
    ) -> StoreResult<()> {
        let wanted = normalize_name(name);
        let taken = self.categories.iter().any(|c| {
            c.account_id == account_id
                && !c.deleted
                && Some(c.id) != except
                && normalize_name(&c.name) == wanted
        });
        if taken {
            return Err(StoreError::rule(format!(
                "A category named '{}' already exists",
                name.trim()
            )));
        }
        Ok(())
    }

    /// Level a category would take under `parent_id`.
    fn level_under(&self, account_id: DbId, parent_id: Option<DbId>) -> StoreResult<i16> {
        let Some(parent_id) = parent_id else {
            return Ok(0);
        };
        let parent = self
            .live_category(account_id, parent_id)
            .ok_or_else(|| StoreError::rule("Parent category not found"))?;
        child_level(parent.level).map_err(rule_from_core)
    }

    fn live_children(&self, account_id: DbId, id: DbId) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |c| c.account_id == account_id && !c.deleted && c.parent_id == Some(id))
    }

    /// Ids of every live descendant of `id`.
    fn descendants(&self, account_id: DbId, id: DbId) -> Vec<DbId> {
        let mut found = Vec::new();
        let mut frontier = vec![id];
        while let Some(current) = frontier.pop() {
            for child in self.live_children(account_id, current) {
                if !found.contains(&child.id) {
                    found.push(child.id);
                    frontier.push(child.id);
                }
            }
        }
        found
    }

    /// Height of the subtree rooted at `id` (0 for a leaf).
    fn subtree_height(&self, account_id: DbId, id: DbId) -> i16 {
        self.live_children(account_id, id)
            .map(|c| 1 + self.subtree_height(account_id, c.id))
            .max()
            .unwrap_or(0)
    }

    fn task_count(&self, category_id: DbId) -> i32 {
        let count = self
            .links
            .iter()
            .filter(|l| l.category_id == category_id)
            .filter(|l| {
                self.tasks
                    .iter()
                    .any(|t| t.id == l.task_id && !t.deleted)
            })
            .count();
        i32::try_from(count).unwrap_or(i32::MAX)
    }

    /// Copy of a category with its aggregate count filled in.
    fn hydrate(&self, category: &Category) -> Category {
        Category {
            task_count: self.task_count(category.id),
            ..category.clone()
        }
    }
}

fn rule_from_core(err: CoreError) -> StoreError {
    match err {
        CoreError::Validation(msg) | CoreError::BusinessRule(msg) => StoreError::BusinessRule(msg),
        other => StoreError::rule(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn create(&self, scope: Scope, input: &CreateCategory) -> StoreResult<Category> {
        let mut t = self.tables.lock().await;
        let live = t
            .categories
            .iter()
            .filter(|c| c.account_id == scope.account_id && !c.deleted)
            .count();
        if live >= MAX_CATEGORIES_PER_ACCOUNT {
            return Err(StoreError::rule(format!(
                "Maximum of {MAX_CATEGORIES_PER_ACCOUNT} categories reached"
            )));
        }
        t.ensure_unique_name(scope.account_id, &input.name, None)?;
        let level = t.level_under(scope.account_id, input.parent_id)?;

        let now = Utc::now();
        let id = t.next_id();
        let category = Category {
            id,
            account_id: scope.account_id,
            user_id: scope.user_id,
            name: input.name.trim().to_string(),
            color: input.color.clone(),
            icon: input.icon.clone(),
            parent_id: input.parent_id,
            level,
            task_count: 0,
            is_default: false,
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        t.categories.push(category.clone());
        Ok(category)
    }

    async fn list(&self, scope: Scope) -> StoreResult<Vec<Category>> {
        let t = self.tables.lock().await;
        let mut rows: Vec<Category> = t
            .categories
            .iter()
            .filter(|c| c.account_id == scope.account_id && !c.deleted)
            .map(|c| t.hydrate(c))
            .collect();
        rows.sort_by(|a, b| {
            a.level
                .cmp(&b.level)
                .then_with(|| normalize_name(&a.name).cmp(&normalize_name(&b.name)))
        });
        Ok(rows)
    }

    async fn get(&self, scope: Scope, id: DbId) -> StoreResult<Option<Category>> {
        let t = self.tables.lock().await;
        Ok(t.live_category(scope.account_id, id).map(|c| t.hydrate(c)))
    }

    async fn update(
        &self,
        scope: Scope,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        let mut t = self.tables.lock().await;
        let Some(current_parent) = t.live_category(scope.account_id, id).map(|c| c.parent_id)
        else {
            return Ok(None);
        };

        t.ensure_unique_name(scope.account_id, &input.name, Some(id))?;

        let target_parent = input.parent_id.unwrap_or(current_parent);
        let mut level_shift = None;
        if target_parent != current_parent {
            if let Some(parent_id) = target_parent {
                if parent_id == id || t.descendants(scope.account_id, id).contains(&parent_id) {
                    return Err(StoreError::rule(
                        "A category cannot be moved beneath itself or its subcategories",
                    ));
                }
            }
            let new_level = t.level_under(scope.account_id, target_parent)?;
            if new_level + t.subtree_height(scope.account_id, id) > MAX_CATEGORY_LEVEL {
                return Err(StoreError::rule(format!(
                    "Moving this category would nest subcategories deeper than {} levels",
                    MAX_CATEGORY_LEVEL + 1
                )));
            }
            level_shift = Some(new_level);
        }

        let descendants = t.descendants(scope.account_id, id);
        let now = Utc::now();
        let old_level = {
            let Some(category) = t.live_category_mut(scope.account_id, id) else {
                return Ok(None);
            };
            let old_level = category.level;
            category.name = input.name.trim().to_string();
            category.color = input.color.clone();
            category.icon = input.icon.clone();
            category.parent_id = target_parent;
            if let Some(level) = level_shift {
                category.level = level;
            }
            category.updated_at = now;
            old_level
        };

        if let Some(new_level) = level_shift {
            let delta = new_level - old_level;
            for c in t
                .categories
                .iter_mut()
                .filter(|c| descendants.contains(&c.id))
            {
                c.level += delta;
                c.updated_at = now;
            }
        }

        Ok(t.live_category(scope.account_id, id).map(|c| t.hydrate(c)))
    }

    async fn delete(&self, scope: Scope, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.lock().await;
        let Some(category) = t.live_category(scope.account_id, id) else {
            return Ok(false);
        };

        if category.is_default {
            return Err(StoreError::rule("Default categories cannot be deleted"));
        }
        if t.live_children(scope.account_id, id).next().is_some() {
            return Err(StoreError::rule(
                "Delete or move the subcategories of this category first",
            ));
        }

        let now = Utc::now();
        if let Some(category) = t.live_category_mut(scope.account_id, id) {
            category.deleted = true;
            category.updated_at = now;
        }
        t.links.retain(|l| l.category_id != id);
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create(&self, scope: Scope, input: &CreateTask) -> StoreResult<Task> {
        let mut t = self.tables.lock().await;
        let now = Utc::now();
        let id = t.next_id();
        let task = Task {
            id,
            account_id: scope.account_id,
            user_id: scope.user_id,
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            due_date: input.due_date,
            priority: input.priority,
            estimated_minutes: input.estimated_minutes,
            recurrence: input.recurrence.clone().map(Json),
            status: Default::default(),
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        t.tasks.push(task.clone());
        Ok(task)
    }

    async fn list(&self, scope: Scope, params: &TaskListParams) -> StoreResult<Vec<Task>> {
        let t = self.tables.lock().await;
        let rows = t
            .tasks
            .iter()
            .filter(|task| task.account_id == scope.account_id && !task.deleted)
            .filter(|task| params.status.map_or(true, |s| task.status == s))
            .filter(|task| params.priority.map_or(true, |p| task.priority == p))
            .filter(|task| {
                params.category_id.map_or(true, |cid| {
                    t.links
                        .iter()
                        .any(|l| l.task_id == task.id && l.category_id == cid)
                })
            })
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn get(&self, scope: Scope, id: DbId) -> StoreResult<Option<Task>> {
        let t = self.tables.lock().await;
        Ok(t.live_task(scope.account_id, id).cloned())
    }

    async fn update(
        &self,
        scope: Scope,
        id: DbId,
        input: &UpdateTask,
    ) -> StoreResult<Option<Task>> {
        let mut t = self.tables.lock().await;
        let Some(task) = t.live_task_mut(scope.account_id, id) else {
            return Ok(None);
        };
        task.title = input.title.trim().to_string();
        task.description = input.description.clone();
        task.due_date = input.due_date;
        task.priority = input.priority;
        task.estimated_minutes = input.estimated_minutes;
        task.recurrence = input.recurrence.clone().map(Json);
        task.status = input.status;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete(&self, scope: Scope, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.lock().await;
        let Some(task) = t.live_task_mut(scope.account_id, id) else {
            return Ok(false);
        };
        task.deleted = true;
        task.updated_at = Utc::now();
        t.links.retain(|l| l.task_id != id);
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Associations
// ---------------------------------------------------------------------------

#[async_trait]
impl TaskCategoryStore for MemoryStore {
    async fn list(&self, scope: Scope, task_id: DbId) -> StoreResult<Vec<TaskCategoryDetail>> {
        let t = self.tables.lock().await;
        let rows = t
            .links
            .iter()
            .filter(|l| l.account_id == scope.account_id && l.task_id == task_id)
            .filter_map(|l| {
                t.live_category(scope.account_id, l.category_id)
                    .map(|c| TaskCategoryDetail {
                        task_id: l.task_id,
                        category_id: c.id,
                        name: c.name.clone(),
                        color: c.color.clone(),
                        icon: c.icon.clone(),
                        level: c.level,
                        created_at: l.created_at,
                    })
            })
            .collect();
        Ok(rows)
    }

    async fn create(&self, scope: Scope, input: &CreateTaskCategory) -> StoreResult<TaskCategory> {
        let mut t = self.tables.lock().await;
        if t.live_task(scope.account_id, input.task_id).is_none() {
            return Err(StoreError::rule("Task not found"));
        }
        if t.live_category(scope.account_id, input.category_id).is_none() {
            return Err(StoreError::rule("Category not found"));
        }
        let exists = t
            .links
            .iter()
            .any(|l| l.task_id == input.task_id && l.category_id == input.category_id);
        if exists {
            return Err(StoreError::rule("Task is already assigned to this category"));
        }

        let link = TaskCategory {
            account_id: scope.account_id,
            task_id: input.task_id,
            category_id: input.category_id,
            created_at: Utc::now(),
        };
        t.links.push(link.clone());
        Ok(link)
    }

    async fn delete(&self, scope: Scope, task_id: DbId, category_id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.lock().await;
        let before = t.links.len();
        t.links.retain(|l| {
            !(l.account_id == scope.account_id
                && l.task_id == task_id
                && l.category_id == category_id)
        });
        Ok(t.links.len() < before)
    }
}
