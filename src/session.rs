//! Console sessions
//!
//! A [`Session`] is created by the login manager and read by everything else.
//! Browsers carry its id in the `console_session` cookie.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::engine::TenantId;

pub const SESSION_COOKIE: &str = "console_session";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: u64,
    pub user_name: String,
    pub locale: String,
    pub profiles: BTreeSet<String>,
    pub permissions: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        tenant_id: TenantId,
        user_id: u64,
        user_name: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            tenant_id,
            user_id,
            user_name: user_name.into(),
            locale: locale.into(),
            profiles: BTreeSet::new(),
            permissions: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn has_profile(&self, profile: &str) -> bool {
        self.profiles.contains(profile)
    }
}

/// Shared, in-memory session store.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: Session) {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session);
    }

    pub async fn get(&self, session_id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    pub async fn remove(&self, session_id: Uuid) -> Option<Session> {
        self.sessions.write().await.remove(&session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Session bound to the request's cookie, if any.
    pub async fn current_session(&self, headers: &HeaderMap) -> Option<Session> {
        let session_id = session_id_from_headers(headers)?;
        self.get(session_id).await
    }
}

/// Extract the session id from the `Cookie` header(s).
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value binding a browser to `session_id`.
pub fn session_cookie(session_id: Uuid) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
