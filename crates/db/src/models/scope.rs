use taskhub_core::types::DbId;

/// The tenant and acting user every procedure call is made on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub account_id: DbId,
    pub user_id: DbId,
}
