use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;

/// Success envelope: { success: true, message, data?, timestamp }.
///
/// Every handler emits its body through this wrapper; `data` is present
/// only when the operation produced a payload.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    message: String,
    data: Option<T>,
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status: StatusCode::OK,
        }
    }

    /// 201 Created with payload
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status: StatusCode::CREATED,
        }
    }

    /// 200 OK without payload (deletes, acknowledgements)
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match self.data.map(|d| serde_json::to_value(&d)).transpose() {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return ApiError::internal("Error interno del servidor")
                    .with_detail(e.to_string())
                    .into_response();
            }
        };

        let mut body = json!({
            "success": true,
            "message": self.message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        // Null payloads collapse to an envelope without `data`
        if let Some(value) = data_value {
            if !value.is_null() {
                body["data"] = value;
            }
        }

        (self.status, Json(body)).into_response()
    }
}

/// Handler result: success envelope or an error routed through the funnel.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json<T: Serialize>(resp: ApiResponse<T>) -> (StatusCode, serde_json::Value) {
        let response = resp.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn ok_envelope_carries_data() {
        let (status, body) = body_json(ApiResponse::ok("Operación exitosa", json!({"id": 7}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Operación exitosa");
        assert_eq!(body["data"]["id"], 7);
        assert!(body.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn created_envelope_uses_201() {
        let (status, _) = body_json(ApiResponse::created("creado", json!({"id": 1}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn message_only_envelope_omits_data() {
        let (status, body) =
            body_json(ApiResponse::<serde_json::Value>::message_only("eliminado")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn null_data_is_omitted() {
        let (_, body) = body_json(ApiResponse::ok("ok", serde_json::Value::Null)).await;
        assert!(body.get("data").is_none());
    }
}
