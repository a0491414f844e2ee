//! Build metadata snapshot.
//!
//! The snapshot describes the running program: its main package path, the
//! main module and the dependency modules it was built with. It is read at
//! most once per process. Hosts normally install it explicitly with
//! [`install_build_info`] and [`build_info!`](crate::build_info); otherwise a
//! JSON file is looked up through `MODDATA_BUILD_INFO` and then through the
//! compile-time hint captured by `build.rs`.

use crate::module::{DEVEL_VERSION, Module};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const ENV_BUILD_INFO: &str = "MODDATA_BUILD_INFO";

static BUILD_INFO: OnceLock<Option<BuildInfo>> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Main package path; its last segment is the application name.
    pub path: String,
    pub main: Module,
    #[serde(default)]
    pub deps: Vec<Module>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildInfoError {
    #[error("reading build info {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing build info: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid build info: {0}")]
    Invalid(String),
    #[error("build info was already read")]
    AlreadyRead,
}

impl BuildInfo {
    /// Snapshot for a single package with no recorded dependencies.
    ///
    /// A development build gets the `(devel)` version marker instead of
    /// `version`.
    pub fn for_package(name: &str, version: &str, devel: bool) -> Self {
        let version = if devel { DEVEL_VERSION } else { version };
        Self {
            path: name.to_string(),
            main: Module::new(name, version),
            deps: Vec::new(),
        }
    }

    /// Last segment of the main package path.
    pub fn app_name(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[idx + 1..],
            None => &self.path,
        }
    }

    pub fn with_dependency(mut self, module: Module) -> Self {
        self.deps.push(module);
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, BuildInfoError> {
        let info: BuildInfo = serde_json::from_str(raw)?;
        info.validate()?;
        Ok(info)
    }

    pub fn from_path(path: &Path) -> Result<Self, BuildInfoError> {
        let raw = fs::read_to_string(path).map_err(|source| BuildInfoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), BuildInfoError> {
        if self.path.trim().is_empty() {
            return Err(BuildInfoError::Invalid("path must not be empty".into()));
        }
        if self.path.ends_with('/') {
            return Err(BuildInfoError::Invalid(format!(
                "path {:?} must not end with '/'",
                self.path
            )));
        }
        validate_module(&self.main, "main")?;
        for (idx, dep) in self.deps.iter().enumerate() {
            validate_module(dep, &format!("deps[{idx}]"))?;
        }
        Ok(())
    }
}

fn validate_module(module: &Module, field: &str) -> Result<(), BuildInfoError> {
    if module.path.trim().is_empty() {
        return Err(BuildInfoError::Invalid(format!(
            "{field}.path must not be empty"
        )));
    }
    if let Some(replacement) = &module.replace {
        if replacement.path.trim().is_empty() {
            return Err(BuildInfoError::Invalid(format!(
                "{field}.replace.path must not be empty"
            )));
        }
    }
    Ok(())
}

/// Snapshot for the calling crate, from its Cargo package name and version.
///
/// Debug builds are treated as development builds.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::BuildInfo::for_package(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            cfg!(debug_assertions),
        )
    };
}

/// Installs the process build metadata.
///
/// Fails once the metadata has been read, either by an earlier install or by
/// the first call to [`read_build_info`].
pub fn install_build_info(info: BuildInfo) -> Result<(), BuildInfoError> {
    info.validate()?;
    BUILD_INFO
        .set(Some(info))
        .map_err(|_| BuildInfoError::AlreadyRead)
}

/// Returns the process build metadata, reading it on first use.
pub fn read_build_info() -> Option<&'static BuildInfo> {
    BUILD_INFO.get_or_init(discover).as_ref()
}

fn discover() -> Option<BuildInfo> {
    if let Ok(path) = env::var(ENV_BUILD_INFO) {
        if let Some(info) = load_from_hint(&path) {
            return Some(info);
        }
    }

    if let Some(hint) = option_env!("MODDATA_BUILD_INFO_HINT") {
        if let Some(info) = load_from_hint(hint) {
            return Some(info);
        }
    }

    log::debug!("no build info available for this process");
    None
}

fn load_from_hint(hint: &str) -> Option<BuildInfo> {
    if hint.is_empty() {
        return None;
    }
    match BuildInfo::from_path(Path::new(hint)) {
        Ok(info) => {
            log::debug!("loaded build info for {} from {hint}", info.main);
            Some(info)
        }
        Err(err) => {
            log::warn!("ignoring build info {hint}: {err}");
            None
        }
    }
}
