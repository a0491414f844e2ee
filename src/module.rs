//! Module identity records.
//!
//! A `Module` names one versioned unit of software: the running program's
//! main module or one of its dependencies. Records are plain values; a
//! replacement is owned, never shared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version marker carried by the main module of a development build.
pub const DEVEL_VERSION: &str = "(devel)";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub path: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, alias = "sum")]
    pub checksum: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<Box<Module>>,
}

impl Module {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            checksum: String::new(),
            replace: None,
        }
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = checksum.into();
        self
    }

    pub fn replaced_by(mut self, replacement: Module) -> Self {
        self.replace = Some(Box::new(replacement));
        self
    }

    pub fn is_devel(&self) -> bool {
        self.version == DEVEL_VERSION
    }

    /// `path@version`, usable as a nested directory name under a module cache.
    pub fn cache_dir_name(&self) -> String {
        if self.version.is_empty() {
            return self.path.clone();
        }
        format!("{}@{}", self.path, self.version)
    }

    /// `path@version` flattened into a single path segment.
    ///
    /// Both `/` and `\` become `!`, which never appears in a module path.
    pub fn flat_path(&self) -> String {
        self.cache_dir_name().replace(['/', '\\'], "!")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.version.is_empty() {
            write!(f, " {}", self.version)?;
        }
        if let Some(replacement) = &self.replace {
            write!(f, " => {}", replacement.path)?;
            if !replacement.version.is_empty() {
                write!(f, " {}", replacement.version)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_replacement() {
        let module = Module::new("example.org/lib", "v1.2.0")
            .replaced_by(Module::new("example.org/fork", "v1.2.1"));
        assert_eq!(
            module.to_string(),
            "example.org/lib v1.2.0 => example.org/fork v1.2.1"
        );
        assert_eq!(Module::new("example.org/app", "").to_string(), "example.org/app");
    }

    #[test]
    fn flat_path_is_a_single_segment() {
        let module = Module::new("example.org/lib/v2", "v2.0.1");
        assert_eq!(module.cache_dir_name(), "example.org/lib/v2@v2.0.1");
        assert_eq!(module.flat_path(), "example.org!lib!v2@v2.0.1");
        assert!(!module.flat_path().contains('/'));
    }

    #[test]
    fn checksum_accepts_sum_alias() {
        let module: Module = serde_json::from_str(
            r#"{"path": "example.org/lib", "version": "v1.0.0", "sum": "h1:abc="}"#,
        )
        .unwrap();
        assert_eq!(module.checksum, "h1:abc=");
        assert!(module.replace.is_none());
    }
}
