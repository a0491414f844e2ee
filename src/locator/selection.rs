//! Default locator selection.

use super::{CacheLocator, Locator, UserLocator, WorkspaceLocator};
use crate::config::Config;
use crate::env::{EnvProvider, SystemEnv};
use crate::error::Cause;
use crate::registry::Registry;
use std::sync::{Arc, OnceLock};

static DEFAULT_LOCATOR: OnceLock<Locator> = OnceLock::new();

/// Picks the locator for a process, in order:
///
/// 1. without build info, the null locator;
/// 2. for a `(devel)` main module, `fs:workspace`;
/// 3. `fs:user`, if the application is in the user data directory;
/// 4. `fs:cache`, if the main module is in the module cache;
/// 5. the null locator.
pub fn select(registry: Arc<Registry>, env: &dyn EnvProvider, config: &Config) -> Locator {
    if registry.info().is_none() {
        log::debug!("selected null locator: build info is not available");
        return Locator::null(Cause::BuildInfoUnavailable);
    }

    if registry.is_devel() {
        let locator = WorkspaceLocator::new(registry, env, config);
        log_choice(&locator);
        return locator;
    }

    let user = UserLocator::new(Arc::clone(&registry), env, config);
    if !user.is_null() {
        log_choice(&user);
        return user;
    }
    log_skipped(&user);

    let cache = CacheLocator::new(registry, env, config);
    if !cache.is_null() {
        log_choice(&cache);
        return cache;
    }
    log_skipped(&cache);

    log::debug!("selected null locator: no locator is available");
    Locator::null(Cause::NoLocator)
}

/// The process-wide locator, selected on first use from the process build
/// info and environment. It does not change afterwards.
pub fn default_locator() -> &'static Locator {
    DEFAULT_LOCATOR.get_or_init(|| {
        let system = SystemEnv::default();
        let config = Config::from_env(&system);
        let env = SystemEnv::new(config.toolchain.clone());
        select(Arc::new(Registry::load()), &env, &config)
    })
}

fn log_choice(locator: &Locator) {
    match locator.null_cause() {
        Some(cause) => log::debug!("selected null locator: {cause}"),
        None => log::debug!("selected {} locator", locator.name()),
    }
}

fn log_skipped(locator: &Locator) {
    if let Some(cause) = locator.null_cause() {
        log::debug!("skipping locator: {cause}");
    }
}
