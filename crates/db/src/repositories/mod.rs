//! Postgres implementations of the store traits.
//!
//! Each method issues exactly one stored-procedure call and returns its
//! first row (or row set). The procedures own every business rule.

pub mod category_repo;
pub mod task_category_repo;
pub mod task_repo;

pub use category_repo::CategoryRepo;
pub use task_category_repo::TaskCategoryRepo;
pub use task_repo::TaskRepo;
