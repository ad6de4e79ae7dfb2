//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::require_permission`] -- Per-operation permission check.

pub mod auth;
pub mod rbac;
