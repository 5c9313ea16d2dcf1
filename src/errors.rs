use crate::date_key::ParseDateKeyError;
use crate::records::TrackerError;
use axum::http::StatusCode;
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        error!("request failed: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::BoxOutOfRange { .. } => Self::bad_request(err.to_string()),
            other => Self::internal(other),
        }
    }
}

impl From<ParseDateKeyError> for AppError {
    fn from(err: ParseDateKeyError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
