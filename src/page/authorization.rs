//! Custom page authorization gate.

use std::sync::Arc;

use crate::engine::PageRightsService;
use crate::error::PageError;
use crate::session::Session;

/// Asks the rights service on every call; decisions are never cached.
#[derive(Clone)]
pub struct AuthorizationGate {
    rights: Arc<dyn PageRightsService>,
}

impl AuthorizationGate {
    pub fn new(rights: Arc<dyn PageRightsService>) -> Self {
        Self { rights }
    }

    /// `Ok(false)` is a denial; `Err` means no decision could be made.
    pub async fn is_authorized(
        &self,
        session: &Session,
        application_id: Option<&str>,
        page_name: &str,
    ) -> Result<bool, PageError> {
        let allowed = self
            .rights
            .is_page_authorized(session, application_id, page_name)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Rights check failed for user '{}' on page '{}' (application {:?}): {}",
                    session.user_name,
                    page_name,
                    application_id,
                    e
                );
                PageError::from(e)
            })?;

        tracing::debug!(
            "Page '{}' for user '{}' (application {:?}): {}",
            page_name,
            session.user_name,
            application_id,
            if allowed { "allowed" } else { "denied" }
        );
        Ok(allowed)
    }
}
