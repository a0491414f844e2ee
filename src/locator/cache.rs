//! The `fs:cache` locator: modules extracted into the shared module cache
//! at `<first workspace root>/pkg/mod/<path>@<version>`.

use super::{Locator, LocatorKind, workspace_roots};
use crate::config::Config;
use crate::env::EnvProvider;
use crate::error::Cause;
use crate::loader::Loader;
use crate::module::Module;
use crate::paths::is_dir;
use crate::registry::Registry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const LOCATION: &str = "the module cache";

#[derive(Clone, Debug)]
pub struct CacheLocator {
    registry: Arc<Registry>,
    base: PathBuf,
}

impl CacheLocator {
    /// Builds the locator, or a null locator when the cache is missing or
    /// does not hold the main module.
    pub fn new(registry: Arc<Registry>, env: &dyn EnvProvider, config: &Config) -> Locator {
        let Some(main) = registry.main().cloned() else {
            return Locator::null(Cause::BuildInfoUnavailable);
        };
        let base = match cache_dir(env, config) {
            Ok(base) => base,
            Err(cause) => return Locator::null(cause),
        };

        if !is_cached(&base, &main) {
            return Locator::null(Cause::MainNotLocated {
                module: main.to_string(),
                location: LOCATION.to_string(),
            });
        }
        Locator::Cache(Self { registry, base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub(super) fn main_path(&self) -> &str {
        self.registry.main().map_or("", |main| main.path.as_str())
    }

    pub(super) fn find(&self, modpath: &str) -> Result<Loader, Cause> {
        let module = self.registry.resolve(modpath)?;

        let dir = self.base.join(module.cache_dir_name());
        if !is_dir(&dir) {
            return Err(Cause::NotFound {
                module: module.to_string(),
                location: LOCATION.to_string(),
            });
        }

        log::trace!("{modpath} found at {}", dir.display());
        Ok(Loader::new(LocatorKind::Cache, module, dir.join("data")))
    }
}

/// The module cache lives in the first workspace root.
fn cache_dir(env: &dyn EnvProvider, config: &Config) -> Result<PathBuf, Cause> {
    let roots = workspace_roots(env, config)?;
    let Some(first) = roots.first() else {
        return Err(Cause::CacheUnavailable);
    };
    let dir = first.join("pkg").join("mod");
    if !is_dir(&dir) {
        return Err(Cause::CacheUnavailable);
    }
    Ok(dir)
}

fn is_cached(base: &Path, module: &Module) -> bool {
    is_dir(&base.join(module.cache_dir_name()))
}
