//! Purpose: Discover the UVtools installation directory for the current platform.
//! Exports: `InstallDir`, `Origin`, `locate`, `install_from_env`.
//! Role: Registry lookup on Windows, `UVTOOLS_PATH` everywhere else.
//! Invariants: A returned `InstallDir` always names an existing directory.
//! Invariants: "Source absent" and "other I/O fault" are distinct error kinds.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{Error, ErrorKind};

pub const ENV_VAR: &str = "UVTOOLS_PATH";
#[cfg(windows)]
pub const REGISTRY_KEY: &str = "Software\\UVtools";
#[cfg(windows)]
pub const REGISTRY_VALUE: &str = "InstallDir";

/// Which discovery strategy produced the install directory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Origin {
    Registry,
    Environment,
}

/// A validated UVtools installation directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstallDir {
    path: PathBuf,
    origin: Origin,
}

impl InstallDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}

/// Discover and validate the install directory without touching any other
/// process state. The library itself is not loaded here.
pub fn locate() -> Result<InstallDir, Error> {
    let install = platform_locate()?;
    debug!(
        origin = ?install.origin,
        path = %install.path.display(),
        "located UVtools installation"
    );
    Ok(install)
}

#[cfg(windows)]
fn platform_locate() -> Result<InstallDir, Error> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = match hklm.open_subkey(REGISTRY_KEY) {
        Ok(key) => key,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(not_found(format!(
                "registry key HKLM\\{REGISTRY_KEY} is absent"
            )));
        }
        Err(err) => {
            return Err(Error::new(ErrorKind::Io)
                .with_message(format!("failed to open registry key HKLM\\{REGISTRY_KEY}"))
                .with_source(err));
        }
    };
    let dir: String = match key.get_value(REGISTRY_VALUE) {
        Ok(dir) => dir,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(not_found(format!(
                "registry value {REGISTRY_VALUE} is absent under HKLM\\{REGISTRY_KEY}"
            )));
        }
        Err(err) => {
            return Err(Error::new(ErrorKind::Io)
                .with_message(format!(
                    "failed to read registry value {REGISTRY_VALUE} under HKLM\\{REGISTRY_KEY}"
                ))
                .with_source(err));
        }
    };
    validated(PathBuf::from(dir), Origin::Registry)
}

#[cfg(not(windows))]
fn platform_locate() -> Result<InstallDir, Error> {
    install_from_env(std::env::var_os(ENV_VAR).as_deref())
}

/// Interpret an `UVTOOLS_PATH` value. Split out from `platform_locate` so the
/// unset/empty/missing-directory cases are testable without mutating the
/// process environment.
pub fn install_from_env(value: Option<&OsStr>) -> Result<InstallDir, Error> {
    let Some(value) = value else {
        return Err(not_found(format!("{ENV_VAR} is not set")));
    };
    if value.is_empty() {
        return Err(not_found(format!("{ENV_VAR} is set but empty")));
    }
    validated(PathBuf::from(value), Origin::Environment)
}

fn validated(path: PathBuf, origin: Origin) -> Result<InstallDir, Error> {
    if !path.is_dir() {
        return Err(not_found("the recorded path is not a directory").with_path(path));
    }
    Ok(InstallDir { path, origin })
}

fn not_found(detail: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::Discovery)
        .with_message(format!(
            "Unable to find the UVtools installation: {detail}"
        ))
        .with_hint(format!(
            "Set {ENV_VAR} to the directory containing the UVtools core library."
        ))
}
