pub mod category;
pub mod scope;
pub mod task;
pub mod task_category;
