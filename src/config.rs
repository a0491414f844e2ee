//! Locator configuration.
//!
//! Holds the environment variable names the locators consult and the
//! optional toolchain program. `Config::default()` uses the standard names;
//! `Config::from_env` additionally picks up `MODDATA_TOOLCHAIN`.

use crate::env::EnvProvider;
use crate::paths::Platform;
use std::ffi::OsString;

pub const ENV_WORKSPACE_PATH: &str = "MODDATA_PATH";
pub const ENV_DATA_HOME: &str = "MODDATA_HOME";
pub const ENV_TOOLCHAIN: &str = "MODDATA_TOOLCHAIN";

/// Directory under the user data root holding dependency module data.
pub const SHARED_DATA_DIR: &str = "mod-data";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// List of workspace roots, split with the platform path-list separator.
    pub workspace_var: String,
    /// Override for the user data root.
    pub data_home_var: String,
    /// Program asked for `env <var>` when a workspace variable is not set.
    pub toolchain: Option<OsString>,
    /// Selects the user data directory convention.
    pub platform: Platform,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_var: ENV_WORKSPACE_PATH.to_string(),
            data_home_var: ENV_DATA_HOME.to_string(),
            toolchain: None,
            platform: Platform::current(),
        }
    }
}

impl Config {
    pub fn from_env(env: &dyn EnvProvider) -> Self {
        Self {
            toolchain: env.var(ENV_TOOLCHAIN),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn toolchain_comes_from_env() {
        let config = Config::from_env(&MapEnv::new().with_var(ENV_TOOLCHAIN, "cargo"));
        assert_eq!(config.toolchain, Some(OsString::from("cargo")));
        assert_eq!(config.workspace_var, ENV_WORKSPACE_PATH);
        assert_eq!(Config::from_env(&MapEnv::new()), Config::default());
    }
}
