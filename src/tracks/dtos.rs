use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::{request::NormalizeError, scrape::ScrapeError};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures of a listing request, as seen by API clients.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed filters in the path.
    BadRequest(NormalizeError),
    NotFound,
    /// The catalog could not be fetched or its page was not recognised.
    Upstream(ScrapeError),
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::UnknownRoute(_) => ApiError::NotFound,
            other => ApiError::BadRequest(other),
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(err) => {
                debug!(error = %err, "rejected listing request");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Upstream(err) => {
                warn!(error = %err, "listing unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "Catalog unavailable or not understood".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;

    #[test]
    fn test_status_mapping() {
        let bad: ApiError = NormalizeError::OddSegments(3).into();
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        let unknown: ApiError = NormalizeError::UnknownRoute("garbage".to_string()).into();
        assert_eq!(unknown.into_response().status(), StatusCode::NOT_FOUND);

        let upstream: ApiError = ScrapeError::Fetch(FetchError::ConnectTimeout).into();
        assert_eq!(upstream.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
