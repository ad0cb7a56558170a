//! Shared application state
//!
//! Everything a handler needs, cloned per request. No field is mutable
//! except through the session store's own lock.

use std::sync::Arc;

use crate::engine::{ProcessApi, TenantId};
use crate::forms::ValidatorRegistry;
use crate::login::LoginManager;
use crate::page::CustomPageDispatcher;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub pages: Arc<CustomPageDispatcher>,
    pub sessions: SessionStore,
    pub login: Arc<LoginManager>,
    pub processes: Arc<dyn ProcessApi>,
    pub validators: Arc<ValidatorRegistry>,
    /// Tenant used by login requests that do not name one.
    pub default_tenant: TenantId,
}
