use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Read-only access to the application's bundled assets.
///
/// Cloning is cheap; every clone reads from the same root directory.
#[derive(Debug, Clone)]
pub struct AssetManager {
    root: Arc<PathBuf>,
}

impl AssetManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: Arc::new(root.into()) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if `path` names an existing file under the root.
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    pub fn load_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        std::fs::read(&full).with_context(|| format!("failed to read asset {}", full.display()))
    }

    pub fn load_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        std::fs::read_to_string(&full)
            .with_context(|| format!("failed to read text asset {}", full.display()))
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let rel = Path::new(path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        anyhow::ensure!(!escapes, "asset path {path:?} escapes the asset root");
        Ok(self.root.join(rel))
    }
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new("assets")
    }
}
