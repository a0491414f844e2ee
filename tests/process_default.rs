// Process-wide build info and default locator. Kept as the only test in this
// binary because both are initialized once per process.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use moddata::{BuildInfoError, LocatorKind, default_locator, install_build_info, read_build_info};

use common::{MAIN_PATH, TempTree, sample_info};

#[test]
fn installed_devel_build_loads_from_workspace() -> Result<()> {
    let root = TempTree::new()?;
    root.write("src/example.org/app/data/greeting.txt", b"hi from the workspace")?;

    // SAFETY: this test binary runs a single test, so no other thread reads
    // the environment concurrently.
    unsafe {
        std::env::set_var("MODDATA_PATH", root.root());
        std::env::remove_var("MODDATA_TOOLCHAIN");
    }

    install_build_info(sample_info("(devel)"))?;
    assert!(matches!(
        install_build_info(sample_info("v1.0.0")),
        Err(BuildInfoError::AlreadyRead)
    ));
    assert_eq!(read_build_info().map(|info| info.main.path.as_str()), Some(MAIN_PATH));
    assert_eq!(moddata::app_name(), "app");

    assert_eq!(default_locator().kind(), LocatorKind::Workspace);
    let loader = moddata::locate()?;
    assert_eq!(loader.module().path, MAIN_PATH);

    let file = moddata::load("greeting.txt")?;
    assert_eq!(file.read()?, b"hi from the workspace");

    // The selection is cached for the rest of the process.
    unsafe {
        std::env::remove_var("MODDATA_PATH");
    }
    assert_eq!(default_locator().kind(), LocatorKind::Workspace);
    assert!(moddata::load("greeting.txt")?.lstat()?.is_file());
    Ok(())
}
