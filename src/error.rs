use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures at the storage seam. `SeatTaken` is the conflict outcome of a
/// create; the rest are real I/O or encoding problems.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("seat {0} already reserved")]
    SeatTaken(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Client-visible request failures. Display text is the wire contract: it is
/// serialized verbatim into the `error` field of the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("date and outlet required")]
    MissingDateOutlet,
    #[error("Missing fields or empty seats")]
    MissingFields,
    #[error("Seat {0} already reserved")]
    SeatConflict(String),
    #[error("Failed to save reservation")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SeatTaken(seat) => ApiError::SeatConflict(seat),
            other => ApiError::Storage(other),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingDateOutlet | ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::SeatConflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(ref err) = self {
            tracing::error!("storage failure: {:?}", err);
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
