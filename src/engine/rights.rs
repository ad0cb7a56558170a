//! Directory-backed custom page rights.
//!
//! Without an application scope a page is open to sessions holding the
//! `custompage_<name>` permission. With one, the application must exist for
//! the session's tenant, list the page, and target a profile the user has.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Directory, EngineError, PageRightsService};
use crate::session::Session;

/// Permission granting direct access to a custom page.
pub fn custom_page_permission(page_name: &str) -> String {
    format!("custompage_{page_name}")
}

pub struct DirectoryRightsService {
    directory: Arc<Directory>,
}

impl DirectoryRightsService {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl PageRightsService for DirectoryRightsService {
    async fn is_page_authorized(
        &self,
        session: &Session,
        application_id: Option<&str>,
        page_name: &str,
    ) -> Result<bool, EngineError> {
        let Some(application_id) = application_id else {
            return Ok(session.has_permission(&custom_page_permission(page_name)));
        };

        let application = self
            .directory
            .application(session.tenant_id, application_id)
            .ok_or_else(|| EngineError::NotFound(format!("application {application_id}")))?;

        Ok(application.contains_page(page_name) && session.has_profile(&application.profile))
    }
}
