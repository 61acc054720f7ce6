use std::path::{Path, PathBuf};

use crate::foundation::error::{AdreelError, AdreelResult};

/// Normalize an asset path to a forward-slash relative path without `.` or `..` segments.
pub fn normalize_rel_path(source: &str) -> AdreelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(AdreelError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(AdreelError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(AdreelError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(AdreelError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Maps asset-relative paths to concrete files.
pub trait AssetResolver: Send + Sync {
    /// Concrete path of an asset-relative path. Missing files are an asset error.
    fn resolve(&self, rel: &str) -> AdreelResult<PathBuf>;
}

/// Resolves assets under a root directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct FsAssetResolver {
    root: PathBuf,
}

impl FsAssetResolver {
    /// Resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetResolver for FsAssetResolver {
    fn resolve(&self, rel: &str) -> AdreelResult<PathBuf> {
        let norm = normalize_rel_path(rel).map_err(|e| AdreelError::asset(e.to_string()))?;
        let path = self.root.join(&norm);
        if !path.is_file() {
            return Err(AdreelError::asset(format!(
                "'{norm}' not found under '{}'",
                self.root.display()
            )));
        }
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
