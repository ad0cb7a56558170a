//! Server configuration from environment variables.
//!
//!   CONSOLE_BIND_ADDR       listen address (default: 0.0.0.0:8080)
//!   CONSOLE_PAGES_ROOT      deployed page bundles (default: ./pages)
//!   CONSOLE_PAGE_MOUNT      custom page mount point (default: /custom-page)
//!   CONSOLE_DIRECTORY_FILE  YAML identity/process directory (optional)
//!   CONSOLE_DEFAULT_TENANT  tenant for logins that name none (default: 1)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::engine::{Directory, TenantId};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PAGES_ROOT: &str = "./pages";
pub const DEFAULT_PAGE_MOUNT: &str = "/custom-page";
pub const DEFAULT_TENANT: TenantId = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub pages_root: PathBuf,
    pub page_mount: String,
    pub directory_file: Option<PathBuf>,
    pub default_tenant: TenantId,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            pages_root: PathBuf::from(DEFAULT_PAGES_ROOT),
            page_mount: DEFAULT_PAGE_MOUNT.to_string(),
            directory_file: None,
            default_tenant: DEFAULT_TENANT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_tenant = match var("CONSOLE_DEFAULT_TENANT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("CONSOLE_DEFAULT_TENANT is not a tenant id: '{raw}'"))?,
            None => DEFAULT_TENANT,
        };

        Ok(Self {
            bind_addr: var("CONSOLE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            pages_root: var("CONSOLE_PAGES_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGES_ROOT)),
            page_mount: normalize_mount(
                &var("CONSOLE_PAGE_MOUNT").unwrap_or_else(|| DEFAULT_PAGE_MOUNT.into()),
            )?,
            directory_file: var("CONSOLE_DIRECTORY_FILE").map(PathBuf::from),
            default_tenant,
        })
    }

    /// The configured directory, or an empty one when no file is set.
    pub fn load_directory(&self) -> Result<Directory> {
        match &self.directory_file {
            Some(path) => Directory::load(path),
            None => {
                tracing::warn!("CONSOLE_DIRECTORY_FILE not set, no user can log in");
                Ok(Directory::default())
            }
        }
    }
}

/// `/custom-page`, `custom-page/` and `/custom-page/` all become `/custom-page`.
pub fn normalize_mount(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        bail!("page mount must not be the root path");
    }
    if trimmed.contains(['*', ':', '?', '#']) {
        bail!("page mount '{raw}' contains route or query characters");
    }
    Ok(format!("/{trimmed}"))
}
