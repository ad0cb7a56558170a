//! Path containment check for page resources.
//!
//! Both paths are brought to canonical form (absolute, symlinks resolved,
//! `.` and `..` collapsed) and compared component-wise. Components that do
//! not exist yet are appended lexically to the canonical form of their
//! deepest existing ancestor; a missing component cannot be a symlink.

use std::io;
use std::path::{Component, Path, PathBuf};

/// True when `candidate` is `base` or lies anywhere below it.
/// Any failure to canonicalize either path rejects the candidate.
pub fn is_in_folder(candidate: &Path, base: &Path) -> bool {
    match (canonical_form(candidate), canonical_form(base)) {
        (Ok(candidate), Ok(base)) => candidate.starts_with(&base),
        (Err(e), _) | (_, Err(e)) => {
            tracing::debug!(
                "Cannot canonicalize {} against {}: {}",
                candidate.display(),
                base.display(),
                e
            );
            false
        }
    }
}

/// Canonical form of a path that may not (fully) exist.
pub fn canonical_form(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut existing = absolute.as_path();
    let mut pending: Vec<Component<'_>> = Vec::new();

    let mut resolved = loop {
        match existing.canonicalize() {
            Ok(canonical) => break canonical,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(last), Some(parent)) = (existing.components().next_back(), existing.parent())
                else {
                    return Err(e);
                };
                pending.push(last);
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    };

    for component in pending.into_iter().rev() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => resolved.push(name),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    Ok(resolved)
}
