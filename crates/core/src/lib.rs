//! Domain types and rules shared by the database and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod category;
pub mod error;
pub mod permissions;
pub mod task;
pub mod types;
pub mod validation;
