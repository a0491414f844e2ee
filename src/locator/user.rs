//! The `fs:user` locator: data installed in the per-user data directory.
//!
//! The main module lives in `<base>/<app name>`; every other module lives in
//! `<base>/mod-data/<flattened path@version>`.

use super::{Locator, LocatorKind};
use crate::config::{Config, SHARED_DATA_DIR};
use crate::env::EnvProvider;
use crate::error::Cause;
use crate::loader::Loader;
use crate::paths::{is_dir, user_data_dir};
use crate::registry::Registry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const LOCATION: &str = "the user data directory";

#[derive(Clone, Debug)]
pub struct UserLocator {
    registry: Arc<Registry>,
    base: PathBuf,
}

impl UserLocator {
    /// Builds the locator, or a null locator when the user data directory is
    /// unknown or the application is not installed in it.
    pub fn new(registry: Arc<Registry>, env: &dyn EnvProvider, config: &Config) -> Locator {
        let Some(main_path) = registry.main().map(|main| main.path.clone()) else {
            return Locator::null(Cause::BuildInfoUnavailable);
        };
        let base = match data_home(env, config) {
            Ok(base) => base,
            Err(cause) => return Locator::null(cause),
        };

        // An empty application name would make the base itself the install.
        let app = registry.app_name();
        if app.is_empty() {
            return Locator::null(Cause::MainNotLocated {
                module: main_path,
                location: LOCATION.to_string(),
            });
        }
        if !is_dir(&base.join(app)) {
            return Locator::null(Cause::MainNotLocated {
                module: app.to_string(),
                location: LOCATION.to_string(),
            });
        }
        Locator::User(Self { registry, base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub(super) fn main_path(&self) -> &str {
        self.registry.main().map_or("", |main| main.path.as_str())
    }

    pub(super) fn find(&self, modpath: &str) -> Result<Loader, Cause> {
        let module = self.registry.resolve(modpath)?;

        let dir = if modpath == self.main_path() {
            self.base.join(self.registry.app_name())
        } else {
            self.base.join(SHARED_DATA_DIR).join(module.flat_path())
        };
        if !is_dir(&dir) {
            return Err(Cause::NotFound {
                module: modpath.to_string(),
                location: LOCATION.to_string(),
            });
        }

        log::trace!("{modpath} found at {}", dir.display());
        Ok(Loader::new(LocatorKind::User, module, dir.join("data")))
    }
}

fn data_home(env: &dyn EnvProvider, config: &Config) -> Result<PathBuf, Cause> {
    if let Some(dir) = env.var(&config.data_home_var) {
        return Ok(PathBuf::from(dir));
    }
    user_data_dir(config.platform, env)
}
