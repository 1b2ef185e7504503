use axum::{Json, http::StatusCode, response::IntoResponse};
use droplet_core::AppError;
use serde::Serialize;

/// Wire shape of every error response. `code` is present only for
/// anticipated business failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

/// Errors a handler can surface.
#[derive(Debug)]
pub enum ApiError {
    /// The request body failed domain validation before any use case ran.
    Invalid(String),
    /// A use case failed.
    App(AppError),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Invalid(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    message,
                    code: None,
                }),
            )
                .into_response(),
            ApiError::App(err) if err.is_expected() => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    message: err.to_string(),
                    code: err.code(),
                }),
            )
                .into_response(),
            ApiError::App(err) => {
                // Internal details stay in the log, not in the response.
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: "something went wrong".to_string(),
                        code: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}
