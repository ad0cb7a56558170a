//! Page rendering and resource streaming.
//!
//! Files are served through `tower_http::services::ServeFile`, which sets the
//! content type, honours conditional and range headers, and keeps the open
//! file inside the response body so it is closed whenever the body is dropped.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::locator::TenantPageLocator;
use super::path::{PAGE_CONTROLLER_FILENAME, PAGE_INDEX_FILENAME};
use crate::error::PageError;
use crate::session::Session;

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render the entry point of `page_name` for an authorized session.
    async fn render_entry_point(
        &self,
        session: &Session,
        page_name: &str,
        headers: &HeaderMap,
    ) -> Result<Response, PageError>;

    /// Stream a file that already passed the containment check.
    async fn stream_file(&self, file: &Path, headers: &HeaderMap) -> Result<Response, PageError>;
}

/// Serves a page's `index.html`, looked up at the bundle root first and
/// then under `resources/`.
pub struct BundlePageRenderer {
    locator: TenantPageLocator,
}

impl BundlePageRenderer {
    pub fn new(locator: TenantPageLocator) -> Self {
        Self { locator }
    }

    async fn entry_document(&self, session: &Session, page_name: &str) -> Result<PathBuf, PageError> {
        let page_dir = self.locator.locate(page_name, session.tenant_id).await?;
        let candidates = [
            page_dir.path().join(PAGE_INDEX_FILENAME),
            page_dir.resources_dir().join(PAGE_INDEX_FILENAME),
        ];
        for candidate in candidates {
            if tokio::fs::try_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        if tokio::fs::try_exists(page_dir.path().join(PAGE_CONTROLLER_FILENAME)).await? {
            tracing::warn!(
                "Page '{}' only provides a {} controller, which this server does not execute",
                page_name,
                PAGE_CONTROLLER_FILENAME
            );
        }
        Err(PageError::EntryPointMissing(page_name.to_string()))
    }
}

#[async_trait]
impl PageRenderer for BundlePageRenderer {
    async fn render_entry_point(
        &self,
        session: &Session,
        page_name: &str,
        headers: &HeaderMap,
    ) -> Result<Response, PageError> {
        let document = self.entry_document(session, page_name).await?;
        serve_file(&document, headers).await
    }

    async fn stream_file(&self, file: &Path, headers: &HeaderMap) -> Result<Response, PageError> {
        serve_file(file, headers).await
    }
}

/// Stream `file` as an HTTP response. A missing file yields a 404 response.
pub async fn serve_file(file: &Path, headers: &HeaderMap) -> Result<Response, PageError> {
    let mut request = Request::new(Body::empty());
    *request.headers_mut() = headers.clone();

    let response = ServeFile::new(file)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    Ok(response.map(Body::new).into_response())
}
