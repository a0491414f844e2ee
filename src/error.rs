//! Structured errors for locate, load and file operations.
//!
//! An [`Error`] carries the locator that failed plus whatever context was
//! available when it was raised (module, operation, file name) and the
//! underlying [`Cause`]. The rendered message is a single line; programs
//! should inspect the fields and the cause rather than the text.

use crate::locator::LocatorKind;
use crate::module::Module;
use crate::toolchain::ToolchainError;
use std::fmt;
use std::io;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Load,
    Lstat,
    Open,
    Read,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Load => "load",
            Op::Lstat => "lstat",
            Op::Open => "open",
            Op::Read => "read",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying reason for a failed operation.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Cause {
    #[error("build info is not available")]
    BuildInfoUnavailable,
    #[error("no locator is available")]
    NoLocator,
    #[error("{}", describe_unset(.0))]
    EnvNotSet(Vec<String>),
    #[error("{var} is not available: {source}")]
    Toolchain {
        var: String,
        #[source]
        source: ToolchainError,
    },
    #[error("module cache is not available")]
    CacheUnavailable,
    #[error("main module {module} is not in {location}")]
    MainNotLocated { module: String, location: String },
    #[error("module {0} is not an active module")]
    ModuleNotActive(String),
    #[error("module {module} is not in {location}")]
    NotFound { module: String, location: String },
    #[error("path {0} is not a relative path")]
    NotRelative(String),
    #[error("module {0} does not have data")]
    NoData(Module),
    #[error("{0} is not a regular file")]
    NotRegularFile(String),
    #[error(transparent)]
    Io(Arc<io::Error>),
}

impl From<io::Error> for Cause {
    fn from(err: io::Error) -> Self {
        Cause::Io(Arc::new(err))
    }
}

fn describe_unset(vars: &[String]) -> String {
    match vars {
        [] => "environment is not available".to_string(),
        [single] => format!("{single} is not defined"),
        [first, second] => format!("neither {first} nor {second} are defined"),
        _ => format!("none of {} are defined", vars.join(", ")),
    }
}

#[derive(Clone, Debug)]
pub struct Error {
    locator: LocatorKind,
    module: Option<Module>,
    op: Option<Op>,
    file: Option<String>,
    cause: Cause,
}

impl Error {
    pub fn new(locator: LocatorKind, cause: Cause) -> Self {
        Self {
            locator,
            module: None,
            op: None,
            file: None,
            cause,
        }
    }

    pub fn with_module(mut self, module: &Module) -> Self {
        self.module = Some(module.clone());
        self
    }

    pub fn with_op(mut self, op: Op) -> Self {
        self.op = Some(op);
        self
    }

    pub fn with_file(mut self, op: Op, name: &str) -> Self {
        self.op = Some(op);
        self.file = Some(name.to_string());
        self
    }

    pub fn locator(&self) -> LocatorKind {
        self.locator
    }

    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn op(&self) -> Option<Op> {
        self.op
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// The I/O error behind a failed file operation, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match &self.cause {
            Cause::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "moddata: {}: ", self.locator)?;
        if let Some(module) = &self.module {
            write!(f, "{module}: ")?;
        }
        match (&self.op, &self.file) {
            (Some(op), Some(file)) => write!(f, "{op} {file}: ")?,
            (Some(op), None) => write!(f, "{op}: ")?,
            (None, Some(file)) => write!(f, "{file}: ")?,
            (None, None) => {}
        }
        write!(f, "{}", self.cause)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
