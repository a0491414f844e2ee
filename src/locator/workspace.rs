//! The `fs:workspace` locator: modules checked out under workspace roots.

use super::{Locator, LocatorKind, workspace_roots};
use crate::config::Config;
use crate::env::EnvProvider;
use crate::error::Cause;
use crate::loader::Loader;
use crate::paths::is_dir;
use crate::registry::Registry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct WorkspaceLocator {
    registry: Arc<Registry>,
    roots: Vec<PathBuf>,
    var: String,
}

impl WorkspaceLocator {
    /// Builds the locator, or a null locator when the workspace roots are not
    /// available or the main module is not checked out under any of them.
    pub fn new(registry: Arc<Registry>, env: &dyn EnvProvider, config: &Config) -> Locator {
        let Some(main) = registry.main().cloned() else {
            return Locator::null(Cause::BuildInfoUnavailable);
        };
        let roots = match workspace_roots(env, config) {
            Ok(roots) => roots,
            Err(cause) => return Locator::null(cause),
        };

        let locator = Self {
            registry,
            roots,
            var: config.workspace_var.clone(),
        };
        if locator.find(&main.path).is_err() {
            return Locator::null(Cause::MainNotLocated {
                module: main.to_string(),
                location: locator.location(),
            });
        }
        Locator::Workspace(locator)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub(super) fn main_path(&self) -> &str {
        self.registry.main().map_or("", |main| main.path.as_str())
    }

    pub(super) fn find(&self, modpath: &str) -> Result<Loader, Cause> {
        let module = self.registry.resolve(modpath)?;

        for root in &self.roots {
            let dir = root.join("src").join(&module.path);
            if is_dir(&dir) {
                log::trace!("{modpath} found at {}", dir.display());
                return Ok(Loader::new(LocatorKind::Workspace, module, dir.join("data")));
            }
        }

        Err(Cause::NotFound {
            module: modpath.to_string(),
            location: self.location(),
        })
    }

    fn location(&self) -> String {
        format!("${}", self.var)
    }
}
