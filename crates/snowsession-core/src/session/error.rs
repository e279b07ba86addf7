//! Session resolution errors

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::keys::{KeyError, KeyFormatError};

use super::traits::BoxError;

/// Everything that can stop a session from being resolved
///
/// Once a credential source has been attempted, its error reaches the caller
/// unchanged; there is no fallback to another source.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Key file missing or unreadable
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key bytes are not an encrypted PEM private key, or the passphrase is wrong
    #[error("invalid private key: {0}")]
    KeyFormat(#[from] KeyFormatError),

    /// Missing environment variables or an unusable profile
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The client library rejected the credentials or could not connect
    #[error("{builder} failed to create a session: {source}")]
    SessionCreation {
        builder: String,
        #[source]
        source: BoxError,
    },

    /// No source was active and nothing was cached
    #[error("Unable to create a Snowpark session")]
    NoCredentials,
}

impl SessionError {
    /// Create a session creation error
    pub fn session_creation(builder: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::SessionCreation {
            builder: builder.into(),
            source: source.into(),
        }
    }
}

impl From<KeyError> for SessionError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Io { path, source } => SessionError::Io { path, source },
            KeyError::Format(format) => SessionError::KeyFormat(format),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
