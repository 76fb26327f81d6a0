use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};

/// Liveness probe. Deliberately does not touch the database.
pub async fn health() -> ApiResult<Value> {
    Ok(ApiResponse::message_only("Server is running"))
}
