//! Thin wrapper for asking an external toolchain program for values.
//!
//! Used when a variable is not visible in the process environment but the
//! host toolchain knows it (`<program> env NAME`). Timeouts belong to the
//! caller's process policy.

use std::ffi::OsStr;
use std::io;
use std::process::{Command, ExitStatus};
use std::sync::Arc;

#[derive(Clone, Debug, thiserror::Error)]
pub enum Failure {
    #[error("{0}")]
    Spawn(Arc<io::Error>),
    #[error("{0}")]
    Status(ExitStatus),
}

/// A toolchain invocation that failed to start or exited unsuccessfully.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{program} {}: {failure}{}", .argv.join(" "), stderr_suffix(.stderr))]
pub struct ToolchainError {
    pub program: String,
    pub argv: Vec<String>,
    /// Trimmed standard error of the failed invocation.
    pub stderr: String,
    #[source]
    pub failure: Failure,
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Runs `program verb args...` and returns its trimmed standard output.
pub fn invoke<S: AsRef<OsStr>>(
    program: &OsStr,
    verb: &str,
    args: &[S],
) -> Result<String, ToolchainError> {
    let mut argv = vec![verb.to_string()];
    argv.extend(
        args.iter()
            .map(|arg| arg.as_ref().to_string_lossy().into_owned()),
    );
    let program_name = program.to_string_lossy().into_owned();

    log::trace!("invoking {program_name} {}", argv.join(" "));
    let output = Command::new(program)
        .arg(verb)
        .args(args)
        .output()
        .map_err(|err| ToolchainError {
            program: program_name.clone(),
            argv: argv.clone(),
            stderr: String::new(),
            failure: Failure::Spawn(Arc::new(err)),
        })?;

    if !output.status.success() {
        return Err(ToolchainError {
            program: program_name,
            argv,
            stderr: normalize(&output.stderr),
            failure: Failure::Status(output.status),
        });
    }

    Ok(normalize(&output.stdout))
}

/// Asks `program env name` for a single value; an empty answer means unset.
pub fn getenv(program: &OsStr, name: &str) -> Result<Option<String>, ToolchainError> {
    let value = invoke(program, "env", &[name])?;
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(value))
}

fn normalize(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn invoke_trims_stdout() {
        let out = invoke(OsStr::new("sh"), "-c", &["printf '  /work/a:/work/b \\n'"]).unwrap();
        assert_eq!(out, "/work/a:/work/b");
    }

    #[test]
    fn invoke_captures_stderr_on_failure() {
        let err = invoke(OsStr::new("sh"), "-c", &["echo ' no such var ' >&2; exit 3"])
            .unwrap_err();
        assert_eq!(err.stderr, "no such var");
        assert_eq!(err.argv[0], "-c");
        assert!(matches!(err.failure, Failure::Status(status) if status.code() == Some(3)));
        assert!(err.to_string().ends_with(": no such var"));
    }

    #[test]
    fn invoke_reports_spawn_failure() {
        let err = invoke(OsStr::new("moddata-no-such-program"), "env", &["X"]).unwrap_err();
        assert!(matches!(err.failure, Failure::Spawn(_)));
        assert!(err.stderr.is_empty());
        let message = err.to_string();
        assert!(message.starts_with("moddata-no-such-program env X: "));
        assert!(!message.ends_with(": "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
