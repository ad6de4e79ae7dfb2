//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "success": true, "data": ..., "metadata": {
//! "timestamp": ... } }`. Error responses are produced by
//! [`AppError`](crate::error::AppError).

use serde::Serialize;
use taskhub_core::types::Timestamp;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub timestamp: Timestamp,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            metadata: Metadata {
                timestamp: chrono::Utc::now(),
            },
        }
    }
}
