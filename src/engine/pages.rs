//! Filesystem page registry.
//!
//! Deployed bundles live under `<root>/tenants/<tenant_id>/pages/<page_name>/`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::{EngineError, PageRegistry, TenantId};

pub struct FsPageRegistry {
    root: PathBuf,
}

impl FsPageRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tenant_pages_dir(&self, tenant_id: TenantId) -> PathBuf {
        self.root
            .join("tenants")
            .join(tenant_id.to_string())
            .join("pages")
    }
}

/// A page name must be exactly one ordinary path component.
fn is_plain_component(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[async_trait]
impl PageRegistry for FsPageRegistry {
    async fn page_directory(
        &self,
        tenant_id: TenantId,
        page_name: &str,
    ) -> Result<PathBuf, EngineError> {
        let not_found =
            || EngineError::NotFound(format!("page '{page_name}' for tenant {tenant_id}"));

        if !is_plain_component(page_name) {
            return Err(not_found());
        }

        let dir = self.tenant_pages_dir(tenant_id).join(page_name);
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => Ok(tokio::fs::canonicalize(&dir).await?),
            Ok(_) => Err(not_found()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_component_rules() {
        assert!(is_plain_component("helloWorld"));
        assert!(is_plain_component("custompage_hello.v2"));
        assert!(!is_plain_component(""));
        assert!(!is_plain_component("."));
        assert!(!is_plain_component(".."));
        assert!(!is_plain_component("a/b"));
        assert!(!is_plain_component("a\\b"));
        assert!(!is_plain_component("/etc"));
    }

    #[tokio::test]
    async fn resolves_deployed_page() {
        let root = tempfile::tempdir().unwrap();
        let registry = FsPageRegistry::new(root.path());
        let page = registry.tenant_pages_dir(1).join("helloWorld");
        std::fs::create_dir_all(&page).unwrap();

        let dir = registry.page_directory(1, "helloWorld").await.unwrap();
        assert_eq!(dir, page.canonicalize().unwrap());
    }

    #[tokio::test]
    async fn page_is_scoped_to_its_tenant() {
        let root = tempfile::tempdir().unwrap();
        let registry = FsPageRegistry::new(root.path());
        std::fs::create_dir_all(registry.tenant_pages_dir(1).join("helloWorld")).unwrap();

        let err = registry.page_directory(2, "helloWorld").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn regular_file_is_not_a_page() {
        let root = tempfile::tempdir().unwrap();
        let registry = FsPageRegistry::new(root.path());
        let pages = registry.tenant_pages_dir(1);
        std::fs::create_dir_all(&pages).unwrap();
        std::fs::write(pages.join("notes.txt"), "x").unwrap();

        let err = registry.page_directory(1, "notes.txt").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn traversal_in_page_name_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        let registry = FsPageRegistry::new(root.path());
        std::fs::create_dir_all(registry.tenant_pages_dir(2).join("secret")).unwrap();
        std::fs::create_dir_all(registry.tenant_pages_dir(1)).unwrap();

        let err = registry.page_directory(1, "..").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }
}
