//! Login manager
//!
//! Authenticates credentials for a tenant, turns the authenticated user into a
//! [`Session`] (locale, profiles, permissions) and registers it in the
//! [`SessionStore`].

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::engine::{Directory, TenantId};
use crate::session::{Session, SessionStore};

/// Locale used when the login request does not carry one.
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("authentication failed: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LoginError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Identity returned by an [`Authenticator`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub user_name: String,
    pub profiles: Vec<String>,
    pub permissions: Vec<String>,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        tenant_id: TenantId,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, LoginError>;
}

/// Checks credentials against the directory's password digests.
pub struct DirectoryAuthenticator {
    directory: Arc<Directory>,
}

impl DirectoryAuthenticator {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Authenticator for DirectoryAuthenticator {
    async fn authenticate(
        &self,
        tenant_id: TenantId,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, LoginError> {
        let user = self
            .directory
            .user(tenant_id, &credentials.username)
            .filter(|user| user.password_matches(&credentials.password))
            .ok_or(LoginError::InvalidCredentials)?;

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            user_name: user.username.clone(),
            profiles: user.profiles.clone(),
            permissions: user.permissions.clone(),
        })
    }
}

pub struct LoginManager {
    authenticator: Arc<dyn Authenticator>,
    sessions: SessionStore,
}

impl LoginManager {
    pub fn new(authenticator: Arc<dyn Authenticator>, sessions: SessionStore) -> Self {
        Self {
            authenticator,
            sessions,
        }
    }

    pub async fn login(
        &self,
        tenant_id: TenantId,
        credentials: &Credentials,
        locale: Option<String>,
    ) -> Result<Session, LoginError> {
        let user = match self.authenticator.authenticate(tenant_id, credentials).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(
                    "Login failed for '{}' on tenant {}: {}",
                    credentials.username,
                    tenant_id,
                    e
                );
                return Err(e);
            }
        };

        let locale = locale
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let mut session = Session::new(tenant_id, user.user_id, user.user_name, locale);
        session.profiles = user.profiles.into_iter().collect();
        session.permissions = user.permissions.into_iter().collect();

        tracing::info!(
            "User '{}' logged in on tenant {} (session {})",
            session.user_name,
            tenant_id,
            session.session_id
        );
        self.sessions.insert(session.clone()).await;
        Ok(session)
    }

    /// Drop a session. Returns whether it existed.
    pub async fn logout(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.remove(session_id).await;
        if let Some(session) = &removed {
            tracing::info!("User '{}' logged out", session.user_name);
        }
        removed.is_some()
    }
}
