//! Custom page dispatcher
//!
//! Flow for `GET <mount><path_info>`:
//!
//! 1. `/<page>` without trailing slash: 302 to `<mount>/<page>/`
//! 2. no page name: 400
//! 3. entry point (`/<page>/`, `/<page>/index.html`, ...): authorization
//!    gate, then the page renderer
//! 4. anything else: tenant lookup, `resources/` join, containment check,
//!    then the file streamer
//!
//! Failures past step 2 are logged with the page name and answered with a
//! 500 carrying only the error message.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use super::authorization::AuthorizationGate;
use super::containment::is_in_folder;
use super::locator::TenantPageLocator;
use super::path::{needs_redirect, PagePath, PageTarget};
use super::renderer::PageRenderer;
use crate::error::PageError;
use crate::session::Session;

/// One inbound custom page call.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Path below the mount point, e.g. `/helloWorld/css/app.css`.
    pub path_info: String,
    /// Raw query string, kept across redirects.
    pub query: Option<String>,
    pub application_id: Option<String>,
    pub headers: HeaderMap,
    pub session: Option<Session>,
}

pub struct CustomPageDispatcher {
    mount_path: String,
    locator: TenantPageLocator,
    gate: AuthorizationGate,
    renderer: Arc<dyn PageRenderer>,
}

impl CustomPageDispatcher {
    pub fn new(
        mount_path: impl Into<String>,
        locator: TenantPageLocator,
        gate: AuthorizationGate,
        renderer: Arc<dyn PageRenderer>,
    ) -> Self {
        Self {
            mount_path: mount_path.into(),
            locator,
            gate,
            renderer,
        }
    }

    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    pub async fn handle(&self, request: PageRequest) -> Response {
        if needs_redirect(&request.path_info) {
            return self.redirect_to_valid_page_url(&request);
        }

        let path = PagePath::resolve(&request.path_info);
        let Some(page_name) = path.page_name() else {
            return PageError::PageNameRequired.into_response();
        };

        match self.dispatch(&request, &path, page_name).await {
            Ok(response) => response,
            Err(err) => self.handle_failure(page_name, err),
        }
    }

    async fn dispatch(
        &self,
        request: &PageRequest,
        path: &PagePath,
        page_name: &str,
    ) -> Result<Response, PageError> {
        let session = request.session.as_ref().ok_or(PageError::NoSession)?;

        match path.target() {
            PageTarget::EntryPoint => {
                let application_id = request.application_id.as_deref();
                if !self
                    .gate
                    .is_authorized(session, application_id, page_name)
                    .await?
                {
                    return Err(PageError::Forbidden);
                }
                self.renderer
                    .render_entry_point(session, page_name, &request.headers)
                    .await
            }
            PageTarget::SubResource(segments) => {
                let file = self
                    .resource_file(&request.path_info, page_name, session, segments)
                    .await?;
                self.renderer.stream_file(&file, &request.headers).await
            }
        }
    }

    async fn resource_file(
        &self,
        path_info: &str,
        page_name: &str,
        session: &Session,
        segments: &[String],
    ) -> Result<PathBuf, PageError> {
        let page_dir = self.locator.locate(page_name, session.tenant_id).await?;
        let file = page_dir.resource_file(segments);
        if !is_in_folder(&file, &page_dir.resources_dir()) {
            return Err(PageError::SecurityViolation(path_info.to_string()));
        }
        Ok(file)
    }

    fn redirect_to_valid_page_url(&self, request: &PageRequest) -> Response {
        let mut location = format!("{}{}/", self.mount_path, request.path_info);
        if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
            location.push('?');
            location.push_str(query);
        }
        (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
    }

    fn handle_failure(&self, page_name: &str, err: PageError) -> Response {
        match err {
            PageError::NoSession | PageError::Forbidden => err.into_response(),
            err => {
                tracing::warn!(
                    "Error while trying to render the custom page {}: {}",
                    page_name,
                    err
                );
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
