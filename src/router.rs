//! Router construction for the console server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
pub use crate::state::AppState;

/// Build the full axum router. Custom pages are mounted at
/// `state.pages.mount_path()`.
pub fn build_router(state: AppState) -> Router {
    let mount = state.pages.mount_path().to_string();

    let api = Router::new()
        .route("/loginservice", post(handlers::login::login))
        .route("/logoutservice", post(handlers::login::logout))
        .route(
            "/API/system/session/unusedid",
            get(handlers::login::current_session),
        )
        .route(
            "/API/bpm/process/:process_definition_id/instantiation",
            post(handlers::process::instantiate),
        )
        .route(
            "/API/form/validation",
            get(handlers::forms::list).post(handlers::forms::validate),
        );

    // `/*path` does not match an empty tail, hence the explicit `<mount>/`
    let pages = Router::new()
        .route(&mount, get(handlers::custom_page::serve))
        .route(&format!("{mount}/"), get(handlers::custom_page::serve))
        .route(&format!("{mount}/*path"), get(handlers::custom_page::serve));

    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(api)
        .merge(pages)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
