//! Custom page server for a BPM web console.
//!
//! Serves tenant-scoped custom page bundles under a configurable mount point,
//! guarding entry points with the page rights service and resource files with
//! a canonical path containment check. Login, process instantiation and form
//! validation endpoints round out the console API.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod login;
pub mod page;
pub mod router;
pub mod session;
pub mod state;

pub use app::{build_app, build_state, build_state_with};
pub use config::ServerConfig;
pub use error::{ApiError, PageError};
pub use router::build_router;
pub use state::AppState;
