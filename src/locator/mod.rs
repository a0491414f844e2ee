//! Locator strategies.
//!
//! A [`Locator`] maps a module path to a [`Loader`] bound to that module's
//! `data` directory. The set of strategies is closed:
//!
//! - `fs:workspace` looks under `<root>/src/<module path>` for each
//!   workspace root;
//! - `fs:user` looks in the per-user data directory;
//! - `fs:cache` looks in the shared module cache under the first workspace
//!   root;
//! - `null` always fails with the reason it was chosen.
//!
//! Strategy constructors return a `Locator` rather than a `Result`: a
//! strategy that cannot serve the main module comes back as `Locator::Null`
//! carrying the cause, never as a half-working value.

mod cache;
mod selection;
mod user;
mod workspace;

pub use cache::CacheLocator;
pub use selection::{default_locator, select};
pub use user::UserLocator;
pub use workspace::WorkspaceLocator;

use crate::config::Config;
use crate::env::EnvProvider;
use crate::error::{Cause, Error};
use crate::loader::Loader;
use crate::paths::split_list;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocatorKind {
    Workspace,
    User,
    Cache,
    Null,
}

impl LocatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorKind::Workspace => "fs:workspace",
            LocatorKind::User => "fs:user",
            LocatorKind::Cache => "fs:cache",
            LocatorKind::Null => "null",
        }
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LocatorKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "fs:workspace" => Ok(LocatorKind::Workspace),
            "fs:user" => Ok(LocatorKind::User),
            "fs:cache" => Ok(LocatorKind::Cache),
            "null" => Ok(LocatorKind::Null),
            other => Err(format!("unknown locator: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Locator {
    Workspace(WorkspaceLocator),
    User(UserLocator),
    Cache(CacheLocator),
    Null(NullLocator),
}

impl Locator {
    pub fn null(cause: Cause) -> Self {
        Locator::Null(NullLocator { cause })
    }

    pub fn kind(&self) -> LocatorKind {
        match self {
            Locator::Workspace(_) => LocatorKind::Workspace,
            Locator::User(_) => LocatorKind::User,
            Locator::Cache(_) => LocatorKind::Cache,
            Locator::Null(_) => LocatorKind::Null,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Locator::Null(_))
    }

    /// Returns the loader for the module named by `modpath`.
    pub fn locate(&self, modpath: &str) -> Result<Loader, Error> {
        let located = match self {
            Locator::Workspace(locator) => locator.find(modpath),
            Locator::User(locator) => locator.find(modpath),
            Locator::Cache(locator) => locator.find(modpath),
            Locator::Null(locator) => Err(locator.cause.clone()),
        };
        located.map_err(|cause| Error::new(self.kind(), cause))
    }

    /// Returns the loader for the main module.
    pub fn locate_main(&self) -> Result<Loader, Error> {
        let main = match self {
            Locator::Workspace(locator) => locator.main_path(),
            Locator::User(locator) => locator.main_path(),
            Locator::Cache(locator) => locator.main_path(),
            // The null locator may have been chosen because there is no
            // build info; it fails before looking at the path.
            Locator::Null(_) => "",
        };
        self.locate(main)
    }

    /// The reason a null locator was chosen.
    pub fn null_cause(&self) -> Option<&Cause> {
        match self {
            Locator::Null(locator) => Some(&locator.cause),
            _ => None,
        }
    }
}

/// A locator that fails every request with the cause it was built with.
#[derive(Clone, Debug)]
pub struct NullLocator {
    cause: Cause,
}

impl NullLocator {
    pub fn cause(&self) -> &Cause {
        &self.cause
    }
}

/// Workspace roots from the configured variable, asking the toolchain when
/// the process environment does not define it.
pub(crate) fn workspace_roots(
    env: &dyn EnvProvider,
    config: &Config,
) -> Result<Vec<PathBuf>, Cause> {
    let var = &config.workspace_var;
    let value = match env.var(var) {
        Some(value) => value,
        None => env
            .toolchain_var(var)
            .map_err(|source| Cause::Toolchain {
                var: var.clone(),
                source,
            })?
            .map(OsString::from)
            .ok_or_else(|| Cause::EnvNotSet(vec![format!("${var}")]))?,
    };

    let roots = split_list(&value);
    if roots.is_empty() {
        return Err(Cause::EnvNotSet(vec![format!("${var}")]));
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            LocatorKind::Workspace,
            LocatorKind::User,
            LocatorKind::Cache,
            LocatorKind::Null,
        ] {
            assert_eq!(LocatorKind::try_from(kind.as_str()), Ok(kind));
        }
        assert!(LocatorKind::try_from("fs:nowhere").is_err());
    }

    #[test]
    fn null_locator_resurfaces_cause() {
        let locator = Locator::null(Cause::NoLocator);
        for path in ["", "example.org/app"] {
            let err = locator.locate(path).unwrap_err();
            assert_eq!(err.locator(), LocatorKind::Null);
            assert!(matches!(err.cause(), Cause::NoLocator));
        }
        assert_eq!(
            locator.locate_main().unwrap_err().to_string(),
            "moddata: null: no locator is available"
        );
    }

    #[test]
    fn workspace_roots_fall_back_to_toolchain() {
        let config = Config::default();
        let env = MapEnv::new().with_toolchain_var("MODDATA_PATH", "/tc/root");
        assert_eq!(
            workspace_roots(&env, &config).unwrap(),
            vec![PathBuf::from("/tc/root")]
        );

        let env = MapEnv::new()
            .with_var("MODDATA_PATH", "/env/root")
            .with_toolchain_var("MODDATA_PATH", "/tc/root");
        assert_eq!(
            workspace_roots(&env, &config).unwrap(),
            vec![PathBuf::from("/env/root")]
        );
    }

    #[test]
    fn workspace_roots_require_the_variable() {
        let err = workspace_roots(&MapEnv::new(), &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "$MODDATA_PATH is not defined");
    }
}
