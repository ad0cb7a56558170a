//! Wiring of the engine collaborators into an [`AppState`].

use std::sync::Arc;

use axum::Router;

use crate::config::ServerConfig;
use crate::engine::{
    Directory, DirectoryRightsService, FsPageRegistry, InMemoryProcessApi, TenantId,
};
use crate::forms::ValidatorRegistry;
use crate::login::{DirectoryAuthenticator, LoginManager};
use crate::page::{AuthorizationGate, BundlePageRenderer, CustomPageDispatcher, TenantPageLocator};
use crate::router::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

/// State backed by a page bundle tree on disk and an in-memory directory.
pub fn build_state(config: &ServerConfig, directory: Directory) -> AppState {
    build_state_with(
        &config.page_mount,
        FsPageRegistry::new(&config.pages_root),
        Arc::new(directory),
        config.default_tenant,
    )
}

pub fn build_state_with(
    mount: &str,
    registry: FsPageRegistry,
    directory: Arc<Directory>,
    default_tenant: TenantId,
) -> AppState {
    let sessions = SessionStore::new();
    let locator = TenantPageLocator::new(Arc::new(registry));
    let gate = AuthorizationGate::new(Arc::new(DirectoryRightsService::new(directory.clone())));
    let renderer = Arc::new(BundlePageRenderer::new(locator.clone()));

    AppState {
        pages: Arc::new(CustomPageDispatcher::new(mount, locator, gate, renderer)),
        sessions: sessions.clone(),
        login: Arc::new(LoginManager::new(
            Arc::new(DirectoryAuthenticator::new(directory.clone())),
            sessions,
        )),
        processes: Arc::new(InMemoryProcessApi::new(directory)),
        validators: Arc::new(ValidatorRegistry::with_defaults()),
        default_tenant,
    }
}

/// Router for `config`, loading the directory file it names.
pub fn build_app(config: &ServerConfig) -> anyhow::Result<Router> {
    let directory = config.load_directory()?;
    tracing::info!(
        "Loaded directory: {} users, {} applications, {} processes",
        directory.users.len(),
        directory.applications.len(),
        directory.processes.len()
    );
    Ok(build_router(build_state(config, directory)))
}
