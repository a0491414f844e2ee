// Bakes a default build-info location into the library.
//
// MODDATA_BUILD_INFO_HINT names a JSON build-info file. Relative paths are
// taken from the package root; the result is exported to the crate as a
// compile-time env var and read back with `option_env!`.

use std::env;
use std::path::{Path, PathBuf};

const HINT_VAR: &str = "MODDATA_BUILD_INFO_HINT";

fn resolve_hint(raw: &Path) -> PathBuf {
    if raw.is_absolute() {
        return raw.to_path_buf();
    }
    match env::var_os("CARGO_MANIFEST_DIR") {
        Some(manifest_dir) => Path::new(&manifest_dir).join(raw),
        None => raw.to_path_buf(),
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed={HINT_VAR}");

    let Some(raw) = env::var_os(HINT_VAR).filter(|value| !value.is_empty()) else {
        return;
    };
    let hint = resolve_hint(Path::new(&raw));

    if !hint.is_file() {
        println!(
            "cargo:warning={HINT_VAR} points at {}, which is not a file; no default is baked in",
            hint.display()
        );
        return;
    }
    println!("cargo:rerun-if-changed={}", hint.display());

    let hint = hint.canonicalize().unwrap_or(hint);
    match hint.to_str() {
        Some(text) => println!("cargo:rustc-env={HINT_VAR}={text}"),
        None => println!(
            "cargo:warning={HINT_VAR} is not valid UTF-8 and cannot be baked in: {}",
            hint.display()
        ),
    }
}
