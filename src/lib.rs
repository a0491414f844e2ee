//! Module data loading.
//!
//! A module's data lives in the `data` directory at the module root. The data
//! may belong to the main module or to any active dependency, and is read by
//! the main module through a [`Loader`]:
//!
//! ```ignore
//! moddata::install_build_info(moddata::build_info!())?;
//! let greeting = moddata::load("greeting.txt")?.read()?;
//! ```
//!
//! Which directory is used depends on the process default [`Locator`]; see
//! [`locator::select`] for the selection order.

pub mod buildinfo;
pub mod config;
pub mod env;
pub mod error;
pub mod loader;
pub mod locator;
pub mod module;
pub mod paths;
pub mod registry;
pub mod toolchain;

pub use buildinfo::{BuildInfo, BuildInfoError, install_build_info, read_build_info};
pub use config::Config;
pub use env::{EnvProvider, MapEnv, SystemEnv};
pub use error::{Cause, Error, Op};
pub use loader::{File, Loader};
pub use locator::{
    CacheLocator, Locator, LocatorKind, NullLocator, UserLocator, WorkspaceLocator,
    default_locator, select,
};
pub use module::{DEVEL_VERSION, Module};
pub use registry::Registry;

/// Returns the loader for the main module, using the default locator.
pub fn locate() -> Result<Loader, Error> {
    default_locator().locate_main()
}

/// Returns the main module file at `name`, using the default locator.
///
/// `name` must be relative to the data directory, without a `data/` prefix.
pub fn load(name: &str) -> Result<File, Error> {
    locate()?.load(name)
}

/// The application name derived from the process build info, or an empty
/// string when build info is not available.
pub fn app_name() -> String {
    read_build_info()
        .map(|info| info.app_name().to_string())
        .unwrap_or_default()
}
