//! Tenant-scoped page lookup.
//!
//! The only way into a page bundle on disk: every directory handed out here
//! was resolved by the engine registry for the session's tenant.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::{EngineError, PageRegistry, TenantId};
use crate::error::PageError;

/// Name of the static asset directory inside a page bundle.
pub const RESOURCES_DIR: &str = "resources";

/// Deployed bundle directory of one (tenant, page) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDirectory {
    root: PathBuf,
}

impl PageDirectory {
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.root.join(RESOURCES_DIR)
    }

    /// `resources/<segments...>`, joined segment by segment. The result is
    /// untrusted until checked with [`super::containment::is_in_folder`].
    pub fn resource_file(&self, segments: &[String]) -> PathBuf {
        segments
            .iter()
            .fold(self.resources_dir(), |path, segment| path.join(segment))
    }
}

#[derive(Clone)]
pub struct TenantPageLocator {
    registry: Arc<dyn PageRegistry>,
}

impl TenantPageLocator {
    pub fn new(registry: Arc<dyn PageRegistry>) -> Self {
        Self { registry }
    }

    pub async fn locate(
        &self,
        page_name: &str,
        tenant_id: TenantId,
    ) -> Result<PageDirectory, PageError> {
        match self.registry.page_directory(tenant_id, page_name).await {
            Ok(root) => Ok(PageDirectory { root }),
            Err(EngineError::NotFound(_)) => Err(PageError::NotFound {
                page_name: page_name.to_string(),
                tenant_id,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedRegistry(Result<PathBuf, fn() -> EngineError>);

    #[async_trait]
    impl PageRegistry for FixedRegistry {
        async fn page_directory(
            &self,
            _tenant_id: TenantId,
            _page_name: &str,
        ) -> Result<PathBuf, EngineError> {
            match &self.0 {
                Ok(path) => Ok(path.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn locator(result: Result<PathBuf, fn() -> EngineError>) -> TenantPageLocator {
        TenantPageLocator::new(Arc::new(FixedRegistry(result)))
    }

    #[tokio::test]
    async fn located_directory_builds_resource_paths() {
        let dir = locator(Ok(PathBuf::from("/srv/pages/helloWorld")))
            .locate("helloWorld", 1)
            .await
            .unwrap();
        assert_eq!(dir.path(), Path::new("/srv/pages/helloWorld"));
        assert_eq!(
            dir.resource_file(&["css".to_string(), "app.css".to_string()]),
            PathBuf::from("/srv/pages/helloWorld/resources/css/app.css")
        );
        assert_eq!(dir.resource_file(&[]), dir.resources_dir());
    }

    #[tokio::test]
    async fn registry_not_found_becomes_page_not_found() {
        let err = locator(Err(|| EngineError::NotFound("gone".into())))
            .locate("helloWorld", 7)
            .await
            .unwrap_err();
        match err {
            PageError::NotFound {
                page_name,
                tenant_id,
            } => {
                assert_eq!(page_name, "helloWorld");
                assert_eq!(tenant_id, 7);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_engine_errors_pass_through() {
        let err = locator(Err(|| EngineError::Unavailable("engine down".into())))
            .locate("helloWorld", 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PageError::Engine(EngineError::Unavailable(_))
        ));
    }
}
