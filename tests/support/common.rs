#![allow(dead_code)]

use anyhow::{Context, Result};
use moddata::{BuildInfo, Config, Module, Registry};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const MAIN_PATH: &str = "example.org/app";
pub const LIB_PATH: &str = "example.org/lib";

// Temporary directory tree for laying out workspaces and data directories.
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate temp tree")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn mkdir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.join(rel);
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        Ok(path)
    }

    pub fn write(&self, rel: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn display(&self) -> String {
        self.root().display().to_string()
    }
}

/// Build info for `example.org/app` with one plain and one replaced
/// dependency.
pub fn sample_info(main_version: &str) -> BuildInfo {
    BuildInfo {
        path: MAIN_PATH.to_string(),
        main: Module::new(MAIN_PATH, main_version),
        deps: vec![
            Module::new(LIB_PATH, "v0.3.0").with_checksum("h1:lib="),
            Module::new("example.org/old", "v1.0.0")
                .replaced_by(Module::new("example.org/new", "v1.1.0").with_checksum("h1:new=")),
        ],
    }
}

pub fn registry(main_version: &str) -> Arc<Registry> {
    Arc::new(Registry::new(Some(sample_info(main_version))))
}

/// Defaults pinned to the generic Unix user data layout.
pub fn unix_config() -> Config {
    Config {
        platform: moddata::paths::Platform::Unix,
        ..Config::default()
    }
}

pub fn join_roots(roots: &[&Path]) -> Result<String> {
    let joined = std::env::join_paths(roots).context("failed to join roots")?;
    Ok(joined.to_string_lossy().into_owned())
}
