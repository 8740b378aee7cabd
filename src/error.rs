use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Tower not found: {0}")]
    TowerNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl DashboardError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        DashboardError::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::MissingField(_) => StatusCode::BAD_REQUEST,
            DashboardError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
            DashboardError::TowerNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
