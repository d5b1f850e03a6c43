use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::access_guard::Redirect;
use crate::services::errors::PortalError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<Redirect>,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    /// No identity; the client should go to sign-in.
    Unauthorized(&'static str),
    /// Identity without an admissible role; the client should go home.
    Forbidden(&'static str),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests(&'static str),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }

    /// Storage failure while serving the request; the raw cause travels with the message.
    pub(crate) fn unavailable(err: impl std::fmt::Display, context: &str) -> Self {
        Self::ServiceUnavailable(format!("{context}: {err}"))
    }

    pub(crate) fn denied(redirect: Redirect) -> Self {
        match redirect {
            Redirect::SignIn => Self::Unauthorized("Sign in to continue"),
            Redirect::Home => Self::Forbidden("Your role does not have access to this page"),
        }
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Validation(message) => Self::BadRequest(message),
            PortalError::Conflict(message) => Self::Conflict(message),
            PortalError::NotFound(message) => Self::NotFound(message),
            err @ PortalError::Transient { .. } => Self::ServiceUnavailable(err.to_string()),
        }
    }
}

fn json_error(status: StatusCode, detail: String, redirect: Option<Redirect>) -> Response {
    (status, Json(ErrorResponse { status: status.as_u16(), detail, redirect })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => {
                let mut response = json_error(
                    StatusCode::UNAUTHORIZED,
                    message.to_string(),
                    Some(Redirect::SignIn),
                );
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            ApiError::Forbidden(message) => {
                json_error(StatusCode::FORBIDDEN, message.to_string(), Some(Redirect::Home))
            }
            ApiError::BadRequest(message) => json_error(StatusCode::BAD_REQUEST, message, None),
            ApiError::NotFound(message) => json_error(StatusCode::NOT_FOUND, message, None),
            ApiError::Conflict(message) => json_error(StatusCode::CONFLICT, message, None),
            ApiError::TooManyRequests(message) => {
                json_error(StatusCode::TOO_MANY_REQUESTS, message.to_string(), None)
            }
            ApiError::ServiceUnavailable(message) => {
                tracing::error!(error = %message, "Service unavailable");
                json_error(StatusCode::SERVICE_UNAVAILABLE, message, None)
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stores::StoreError;
    use crate::test_support::read_json;

    #[tokio::test]
    async fn sign_in_denial_carries_redirect_and_challenge() {
        let response = ApiError::denied(Redirect::SignIn).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        let json = read_json(response).await;
        assert_eq!(json["redirect"], "sign_in");
    }

    #[tokio::test]
    async fn home_denial_is_forbidden() {
        let response = ApiError::denied(Redirect::Home).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(read_json(response).await["redirect"], "home");
    }

    #[tokio::test]
    async fn unavailable_storage_keeps_raw_cause() {
        let response =
            ApiError::unavailable("pool timed out", "Failed to load session").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(read_json(response).await["detail"], "Failed to load session: pool timed out");
    }

    #[tokio::test]
    async fn transient_failure_exposes_raw_message() {
        let err = PortalError::transient("Failed to assign role")(StoreError::Unavailable(
            "pool timed out".to_string(),
        ));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = read_json(response).await;
        assert_eq!(json["detail"], "Failed to assign role: pool timed out");
        assert!(json.get("redirect").is_none());
    }
}
