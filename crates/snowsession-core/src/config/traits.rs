//! Credential source trait and configuration errors

use std::fmt;

use crate::session::SessionError;
use crate::types::ConnectionParams;

use super::profile::ProfileError;

/// Which kind of source produced a set of credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `SNOWFLAKE_P8_FILE` and friends
    KeyPairEnv,
    /// `[connections.<name>]` in `~/.snowsql/config`
    ProfileFile,
    /// `SNOWSQL_*` password variables
    PasswordEnv,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::KeyPairEnv => "key-pair environment",
            SourceKind::ProfileFile => "snowsql profile",
            SourceKind::PasswordEnv => "password environment",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A place credentials can come from
///
/// Implementations:
/// - `KeyPairEnvSource`: encrypted private key plus `SNOWFLAKE_*` variables
/// - `ProfileSource`: a snowsql INI profile
/// - `PasswordEnvSource`: `SNOWSQL_*` variables
///
/// A source is consulted only when [`CredentialSource::is_active`] reports
/// that its trigger (a variable or a file) is present. Once consulted, its
/// result is final: a failing source does not fall through to the next one.
pub trait CredentialSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Human-readable name, used in log messages
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Whether the trigger for this source is present
    fn is_active(&self) -> bool;

    /// Build a complete set of connection parameters
    fn load(&self) -> Result<ConnectionParams, SessionError>;
}

/// Errors in environment or profile configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVariable(&'static str),

    #[error("Environment variable {0} is not valid unicode")]
    InvalidVariable(&'static str),

    /// The message stays generic; the underlying problem is the `source()`
    #[error("Error getting snowsql config details")]
    Profile {
        #[source]
        source: ProfileError,
    },
}

impl From<ProfileError> for ConfigError {
    fn from(source: ProfileError) -> Self {
        ConfigError::Profile { source }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
