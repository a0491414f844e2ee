// Smoke tests for the moddata-locate helper binary.
#[path = "support/common.rs"]
mod common;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};

use common::{TempTree, sample_info};

fn locate_command(build_info: Option<&Path>) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_moddata-locate"));
    if let Some(path) = build_info {
        cmd.arg("--build-info").arg(path);
    }
    cmd.env_remove("MODDATA_BUILD_INFO")
        .env_remove("MODDATA_TOOLCHAIN")
        .env_remove("MODDATA_HOME");
    cmd
}

fn run(mut cmd: Command) -> Result<Output> {
    cmd.output().context("failed to run moddata-locate")
}

#[test]
fn reports_workspace_files_as_json() -> Result<()> {
    let root = TempTree::new()?;
    root.write("src/example.org/app/data/greeting.txt", b"hello")?;
    let info_path = root.write(
        "build.json",
        serde_json::to_string(&sample_info("(devel)"))?.as_bytes(),
    )?;

    let mut cmd = locate_command(Some(&info_path));
    cmd.env("MODDATA_PATH", root.root())
        .args(["greeting.txt", "missing.txt"]);
    let output = run(cmd)?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["locator"], "fs:workspace");
    assert_eq!(report["module"], "example.org/app (devel)");
    assert_eq!(report["has_data"], true);
    assert_eq!(report["files"][0]["kind"], "file");
    assert_eq!(report["files"][1]["kind"], "missing");
    assert!(report["files"][1]["error"].is_string());
    Ok(())
}

#[test]
fn fails_without_build_info() -> Result<()> {
    let output = run(locate_command(None))?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("moddata: null: build info is not available"),
        "unexpected stderr: {stderr}"
    );
    Ok(())
}

#[test]
fn rejects_inactive_modules() -> Result<()> {
    let root = TempTree::new()?;
    root.mkdir("src/example.org/app")?;
    let info_path = root.write(
        "build.json",
        serde_json::to_string(&sample_info("(devel)"))?.as_bytes(),
    )?;

    let mut cmd = locate_command(Some(&info_path));
    cmd.env("MODDATA_PATH", root.root())
        .args(["--module", "example.org/unknown"]);
    let output = run(cmd)?;
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("module example.org/unknown is not an active module")
    );
    Ok(())
}
