use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::AssetError;

/// Opens resources by logical name.
pub trait AssetSource {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Asset source rooted at a directory on the filesystem.
///
/// Logical names are relative paths below the root; names that would escape
/// it are reported as not found.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let rel = Path::new(name);
        let plain = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        (plain && !name.is_empty()).then(|| self.root.join(rel))
    }
}

impl AssetSource for DirAssetSource {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;

        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound(name.to_string()),
            _ => AssetError::Io {
                name: name.to_string(),
                message: e.to_string(),
            },
        })
    }
}
