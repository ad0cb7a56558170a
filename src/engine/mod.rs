//! Engine collaborators
//!
//! The console never owns process, identity or page-deployment data. It talks
//! to the BPM engine through the narrow ports below; the submodules provide
//! the filesystem and in-memory implementations the server binary runs with.
//!
//! - [`PageRegistry`]      - where a tenant's deployed page bundle lives on disk
//! - [`PageRightsService`] - whether a session may open a page
//! - [`ProcessApi`]        - process instantiation

pub mod directory;
pub mod pages;
pub mod process;
pub mod rights;

use std::path::PathBuf;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::session::Session;

pub use directory::Directory;
pub use pages::FsPageRegistry;
pub use process::InMemoryProcessApi;
pub use rights::DirectoryRightsService;

/// Tenant identifier as issued by the engine.
pub type TenantId = u64;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("process activation failed: {0}")]
    ProcessActivation(String),

    #[error("{message}")]
    ContractViolation {
        message: String,
        explanations: Vec<String>,
    },

    #[error("engine unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ContractViolation { .. } => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProcessActivation(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Page/application registry: resolves the directory holding a deployed page.
#[async_trait]
pub trait PageRegistry: Send + Sync {
    /// Directory of `page_name` as deployed for `tenant_id`.
    /// Returns [`EngineError::NotFound`] when the page is not deployed there.
    async fn page_directory(
        &self,
        tenant_id: TenantId,
        page_name: &str,
    ) -> Result<PathBuf, EngineError>;
}

/// Rights resolution for custom pages.
#[async_trait]
pub trait PageRightsService: Send + Sync {
    /// Decide whether `session` may open `page_name`, optionally scoped to a
    /// living application. An `Err` means the decision could not be made.
    async fn is_page_authorized(
        &self,
        session: &Session,
        application_id: Option<&str>,
        page_name: &str,
    ) -> Result<bool, EngineError>;
}

/// Reference to a freshly started process instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstanceRef {
    pub case_id: u64,
    pub process_definition_id: u64,
    pub started_by: u64,
}

#[async_trait]
pub trait ProcessApi: Send + Sync {
    async fn start_process_with_inputs(
        &self,
        session: &Session,
        process_definition_id: u64,
        inputs: &Map<String, Value>,
    ) -> Result<ProcessInstanceRef, EngineError>;
}
