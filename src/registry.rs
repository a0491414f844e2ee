//! Module registry over one build metadata snapshot.
//!
//! The registry owns the snapshot and answers module-by-path lookups for the
//! locators. A registry without a snapshot is valid; every lookup then fails
//! with [`Cause::BuildInfoUnavailable`].

use crate::buildinfo::{BuildInfo, read_build_info};
use crate::error::Cause;
use crate::module::Module;

#[derive(Clone, Debug, Default)]
pub struct Registry {
    info: Option<BuildInfo>,
}

impl Registry {
    pub fn new(info: Option<BuildInfo>) -> Self {
        Self { info }
    }

    /// Registry over the process build metadata.
    pub fn load() -> Self {
        Self::new(read_build_info().cloned())
    }

    pub fn info(&self) -> Option<&BuildInfo> {
        self.info.as_ref()
    }

    pub fn main(&self) -> Option<&Module> {
        self.info.as_ref().map(|info| &info.main)
    }

    pub fn is_devel(&self) -> bool {
        self.main().is_some_and(Module::is_devel)
    }

    /// Application name: the last segment of the main package path.
    ///
    /// Empty when build metadata is not available.
    pub fn app_name(&self) -> &str {
        self.info.as_ref().map_or("", BuildInfo::app_name)
    }

    /// Resolves `modpath` to the module identity the locators should use.
    ///
    /// A dependency with a replacement resolves to the replacement. Only one
    /// hop is followed; a replacement's own replacement is dropped. On
    /// duplicate dependency paths the first entry wins.
    pub fn resolve(&self, modpath: &str) -> Result<Module, Cause> {
        let info = self.info.as_ref().ok_or(Cause::BuildInfoUnavailable)?;
        if modpath == info.main.path {
            return Ok(info.main.clone());
        }

        let dep = info
            .deps
            .iter()
            .find(|dep| dep.path == modpath)
            .ok_or_else(|| Cause::ModuleNotActive(modpath.to_string()))?;
        match &dep.replace {
            Some(replacement) => {
                log::trace!("module {modpath} replaced by {}", replacement.path);
                Ok(Module {
                    replace: None,
                    ..replacement.as_ref().clone()
                })
            }
            None => Ok(dep.clone()),
        }
    }
}
