use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("pipeline failure: {0}")]
    Pipeline(#[from] PipelineError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            GatewayError::Pipeline(e) => {
                // Model failures must not leak internal detail to clients.
                error!(error = %e, "Request failed in the pipeline");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal processing error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
