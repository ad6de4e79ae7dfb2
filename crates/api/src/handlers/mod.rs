//! Request handlers.
//!
//! Each handler authenticates, checks the operation's permission, validates
//! the payload, forwards to one store call, and wraps the result in the
//! success envelope.

pub mod category;
pub mod task;
pub mod task_category;
