//! Key loading errors

use std::path::PathBuf;

use thiserror::Error;

/// Why key bytes could not be turned into a private key
#[derive(Error, Debug)]
pub enum KeyFormatError {
    #[error("key file is not valid UTF-8 PEM text")]
    NotUtf8,

    #[error("malformed PEM: {0}")]
    Pem(pkcs8::der::Error),

    /// Plain `PRIVATE KEY` or `RSA PRIVATE KEY` blocks are rejected; a
    /// passphrase only makes sense for an encrypted key
    #[error("expected an ENCRYPTED PRIVATE KEY block, found {0}")]
    UnexpectedLabel(String),

    #[error("malformed encrypted key: {0}")]
    EncryptedKeyInfo(pkcs8::der::Error),

    /// Wrong passphrase or unsupported encryption scheme
    #[error("failed to decrypt private key: {0}")]
    Decrypt(pkcs8::Error),

    #[error("decrypted data is not a PKCS#8 private key: {0}")]
    InvalidKeyInfo(pkcs8::der::Error),
}

/// Errors raised while loading a private key file
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("failed to read private key file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] KeyFormatError),
}

impl KeyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type KeyResult<T> = Result<T, KeyError>;
