//! Error types for the console web layer
//!
//! [`PageError`] covers the custom page path and keeps each failure kind
//! distinct internally, even where the dispatcher reports several of them the
//! same way. [`ApiError`] is the JSON error surface of the REST endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::engine::{EngineError, TenantId};
use crate::login::LoginError;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("The name of the page is required.")]
    PageNameRequired,

    #[error("No active session")]
    NoSession,

    #[error("User not Authorized")]
    Forbidden,

    #[error("page '{page_name}' is not deployed for tenant {tenant_id}")]
    NotFound {
        page_name: String,
        tenant_id: TenantId,
    },

    #[error("Unauthorized access to the file {0}")]
    SecurityViolation(String),

    #[error("page '{0}' has no entry point")]
    EntryPointMissing(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PageNameRequired => StatusCode::BAD_REQUEST,
            Self::NoSession => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound { .. }
            | Self::SecurityViolation(_)
            | Self::EntryPointMissing(_)
            | Self::Engine(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("No active session")]
    Unauthenticated,

    #[error("{message}")]
    ContractViolation {
        message: String,
        explanations: Vec<String>,
    },

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ContractViolation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Login(e) => e.status_code(),
            Self::Engine(e) => e.status_code(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("API request failed: {}", self);
        }
        let body = match &self {
            Self::ContractViolation {
                message,
                explanations,
            } => json!({ "error": message, "explanations": explanations }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── PageError: status per kind ─────────────────────────────

    #[test]
    fn page_error_client_statuses() {
        assert_eq!(
            PageError::PageNameRequired.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(PageError::NoSession.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(PageError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn page_error_failures_coalesce_to_server_error() {
        let failures = [
            PageError::NotFound {
                page_name: "p".into(),
                tenant_id: 1,
            },
            PageError::SecurityViolation("/p/../x".into()),
            PageError::EntryPointMissing("p".into()),
            PageError::Engine(EngineError::Unavailable("down".into())),
        ];
        for failure in failures {
            assert_eq!(failure.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn page_error_messages() {
        assert!(PageError::PageNameRequired.to_string().contains("required"));
        assert_eq!(PageError::Forbidden.to_string(), "User not Authorized");
        assert_eq!(
            PageError::SecurityViolation("/p/../../etc/passwd".into()).to_string(),
            "Unauthorized access to the file /p/../../etc/passwd"
        );
        assert_eq!(
            PageError::Engine(EngineError::NotFound("application 1".into())).to_string(),
            "not found: application 1"
        );
    }

    // ── ApiError ────────────────────────────────────────────────

    #[test]
    fn api_error_statuses_follow_source() {
        assert_eq!(
            ApiError::from(LoginError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(EngineError::NotFound("process 9".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
