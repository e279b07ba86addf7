//! Environment variable access shared by the env-driven sources

use std::env;
use std::ffi::OsString;

use super::traits::{ConfigError, ConfigResult};

/// Whether `name` is present in the environment, even if empty
pub(crate) fn is_set(name: &str) -> bool {
    env::var_os(name).is_some()
}

/// Read a variable that must hold a non-empty value
pub(crate) fn required(name: &'static str) -> ConfigResult<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(env::VarError::NotPresent) => Err(ConfigError::MissingVariable(name)),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidVariable(name)),
    }
}

/// Read a variable that must be present but may be empty
pub(crate) fn present(name: &'static str) -> ConfigResult<String> {
    env::var(name).map_err(|e| match e {
        env::VarError::NotPresent => ConfigError::MissingVariable(name),
        env::VarError::NotUnicode(_) => ConfigError::InvalidVariable(name),
    })
}

/// Read a variable as an OS string (used for file paths)
pub(crate) fn required_os(name: &'static str) -> ConfigResult<OsString> {
    env::var_os(name).ok_or(ConfigError::MissingVariable(name))
}
