//! Reports how module data resolves for a build info snapshot.
//!
//! Usage:
//!   moddata-locate --build-info build.json greeting.txt
//!   moddata-locate --build-info build.json --module example.org/lib schema.json
//!   MODDATA_BUILD_INFO=build.json moddata-locate
//!
//! Prints a JSON report with the selected locator, the resolved module and
//! data directory, and the kind of each requested file. Exits non-zero when
//! the module cannot be located.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use moddata::{BuildInfo, File, default_locator, install_build_info};
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moddata-locate")]
#[command(about = "Resolve module data directories and report what is found")]
struct Cli {
    /// Build info JSON file; defaults to $MODDATA_BUILD_INFO.
    #[arg(long)]
    build_info: Option<PathBuf>,
    /// Module path to locate; defaults to the main module.
    #[arg(long)]
    module: Option<String>,
    /// Data file names, relative to the data directory.
    names: Vec<String>,
}

#[derive(Serialize)]
struct Report {
    locator: &'static str,
    module: String,
    root: String,
    has_data: bool,
    files: Vec<FileReport>,
}

#[derive(Serialize)]
struct FileReport {
    name: String,
    path: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.build_info {
        let info = BuildInfo::from_path(path)
            .with_context(|| format!("loading build info {}", path.display()))?;
        install_build_info(info).context("installing build info")?;
    }

    let locator = default_locator();
    let located = match &cli.module {
        Some(modpath) => locator.locate(modpath),
        None => locator.locate_main(),
    };
    let loader = located.map_err(|err| anyhow!(err.to_string()))?;

    let mut files = Vec::with_capacity(cli.names.len());
    for name in &cli.names {
        let file = loader.load(name).map_err(|err| anyhow!(err.to_string()))?;
        files.push(describe(&file));
    }

    let report = Report {
        locator: locator.name(),
        module: loader.module().to_string(),
        root: loader.root().display().to_string(),
        has_data: loader.has_data(),
        files,
    };
    serde_json::to_writer_pretty(io::stdout().lock(), &report).context("writing report")?;
    println!();
    Ok(())
}

fn describe(file: &File) -> FileReport {
    let (kind, error) = match file.lstat() {
        Ok(meta) if meta.file_type().is_symlink() => ("symlink", None),
        Ok(meta) if meta.is_dir() => ("dir", None),
        Ok(meta) if meta.is_file() => ("file", None),
        Ok(_) => ("other", None),
        Err(err) => ("missing", Some(err.to_string())),
    };
    FileReport {
        name: file.name().to_string(),
        path: file.path().display().to_string(),
        kind,
        error,
    }
}
