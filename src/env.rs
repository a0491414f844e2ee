//! Environment providers.
//!
//! Locators never read `std::env` directly; they ask an [`EnvProvider`] so
//! tests can substitute a fixed environment and skip toolchain subprocesses.

use crate::toolchain::{self, ToolchainError};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;

pub trait EnvProvider {
    /// Value of `key`, or `None` when unset or empty. Values are paths, so
    /// they are kept as raw OS strings.
    fn var(&self, key: &str) -> Option<OsString>;

    /// Asks the host toolchain for `key` when the process does not see it.
    fn toolchain_var(&self, _key: &str) -> Result<Option<String>, ToolchainError> {
        Ok(None)
    }
}

/// The real process environment, optionally backed by a toolchain program.
#[derive(Clone, Debug, Default)]
pub struct SystemEnv {
    toolchain: Option<OsString>,
}

impl SystemEnv {
    pub fn new(toolchain: Option<OsString>) -> Self {
        Self { toolchain }
    }
}

impl EnvProvider for SystemEnv {
    fn var(&self, key: &str) -> Option<OsString> {
        env::var_os(key).filter(|value| !value.is_empty())
    }

    fn toolchain_var(&self, key: &str) -> Result<Option<String>, ToolchainError> {
        match &self.toolchain {
            Some(program) => toolchain::getenv(program, key),
            None => Ok(None),
        }
    }
}

/// Fixed environment for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: BTreeMap<String, OsString>,
    toolchain: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// Value answered by the fake toolchain for `key`.
    pub fn with_toolchain_var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.toolchain.insert(key.to_string(), value.into());
        self
    }
}

impl EnvProvider for MapEnv {
    fn var(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).filter(|value| !value.is_empty()).cloned()
    }

    fn toolchain_var(&self, key: &str) -> Result<Option<String>, ToolchainError> {
        Ok(self
            .toolchain
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned())
    }
}
