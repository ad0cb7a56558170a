//! POST /loginservice, POST /logoutservice, GET /API/system/session/unusedid

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::engine::TenantId;
use crate::error::ApiError;
use crate::login::Credentials;
use crate::router::AppState;
use crate::session::{expired_session_cookie, session_cookie, session_id_from_headers, Session};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub tenant: Option<TenantId>,
    pub locale: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if req.username.trim().is_empty() {
        return Err(ApiError::BadRequest("Attribute 'username' is mandatory".into()));
    }

    let tenant_id = req.tenant.unwrap_or(state.default_tenant);
    let credentials = Credentials {
        username: req.username,
        password: req.password,
    };
    let session = state.login.login(tenant_id, &credentials, req.locale).await?;

    let cookie = session_cookie(session.session_id);
    Ok(([(header::SET_COOKIE, cookie)], Json(session)).into_response())
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session_id) = session_id_from_headers(&headers) {
        state.login.logout(session_id).await;
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, expired_session_cookie())],
    )
        .into_response()
}

pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Session>, ApiError> {
    state
        .sessions
        .current_session(&headers)
        .await
        .map(Json)
        .ok_or(ApiError::Unauthenticated)
}
