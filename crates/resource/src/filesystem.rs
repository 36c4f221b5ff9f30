use folio_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Reads letterhead files relative to a base directory.
///
/// References may not leave the base directory: absolute paths and `..`
/// components are refused, and symlinks resolving outside the base are
/// reported as missing.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn confine(&self, reference: &str) -> Option<PathBuf> {
        let relative = Path::new(reference);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let joined = self.root.join(relative);
        match (joined.canonicalize(), &self.canonical_root) {
            (Ok(resolved), Some(root)) => resolved.starts_with(root).then_some(resolved),
            _ => Some(joined),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, reference: &str) -> Result<SharedResourceData, ResourceError> {
        let path = self.confine(reference).ok_or_else(|| {
            ResourceError::InvalidReference(format!("{reference} escapes the resource directory"))
        })?;

        match std::fs::read(&path) {
            Ok(bytes) => {
                log::debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Arc::new(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ResourceError::NotFound(reference.to_string()))
            }
            Err(e) => Err(ResourceError::LoadFailed {
                reference: reference.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn exists(&self, reference: &str) -> bool {
        self.confine(reference).is_some_and(|p| p.is_file())
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
