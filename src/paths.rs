//! Filesystem and platform helpers shared by the locators.

use crate::env::EnvProvider;
use crate::error::Cause;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Plan9,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Plan9 => "plan9",
            Platform::Unix => "unix",
        }
    }
}

/// True if `path` exists and is a directory, following symbolic links.
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
}

/// Splits a path list on the platform separator, dropping empty entries.
pub fn split_list(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|entry| !entry.as_os_str().is_empty())
        .collect()
}

/// Per-user data root for `platform`.
///
/// Windows uses `%LocalAppData%`, macOS `$HOME/Library/Application Support`,
/// Plan 9 `$home/lib`, and other Unix systems `$XDG_DATA_HOME` or
/// `$HOME/.local/share`.
pub fn user_data_dir(platform: Platform, env: &dyn EnvProvider) -> Result<PathBuf, Cause> {
    match platform {
        Platform::Windows => env
            .var("LocalAppData")
            .map(PathBuf::from)
            .ok_or_else(|| Cause::EnvNotSet(vec!["%LocalAppData%".into()])),
        Platform::MacOs => env
            .var("HOME")
            .map(|home| Path::new(&home).join("Library").join("Application Support"))
            .ok_or_else(|| Cause::EnvNotSet(vec!["$HOME".into()])),
        Platform::Plan9 => env
            .var("home")
            .map(|home| Path::new(&home).join("lib"))
            .ok_or_else(|| Cause::EnvNotSet(vec!["$home".into()])),
        Platform::Unix => {
            if let Some(xdg) = env.var("XDG_DATA_HOME") {
                return Ok(PathBuf::from(xdg));
            }
            env.var("HOME")
                .map(|home| Path::new(&home).join(".local").join("share"))
                .ok_or_else(|| {
                    Cause::EnvNotSet(vec!["$XDG_DATA_HOME".into(), "$HOME".into()])
                })
        }
    }
}
