//! Encrypted PKCS#8 private key loader

use std::fmt;
use std::fs;
use std::path::Path;

use pkcs8::der::Decode;
use pkcs8::{EncryptedPrivateKeyInfo, ObjectIdentifier, PrivateKeyInfo, SecretDocument};
use zeroize::Zeroizing;

use super::error::{KeyError, KeyFormatError, KeyResult};

const ENCRYPTED_PEM_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// A decrypted private key
///
/// Holds the unencrypted PKCS#8 `PrivateKeyInfo` DER. The backing buffer is
/// zeroed when the key is dropped.
pub struct PrivateKey {
    document: SecretDocument,
    algorithm: ObjectIdentifier,
}

impl PrivateKey {
    /// Decrypt an `ENCRYPTED PRIVATE KEY` PEM block with `passphrase`
    pub fn from_encrypted_pem(pem: &str, passphrase: impl AsRef<[u8]>) -> Result<Self, KeyFormatError> {
        let (label, encrypted) =
            SecretDocument::from_pem(pem.trim()).map_err(KeyFormatError::Pem)?;
        if label != ENCRYPTED_PEM_LABEL {
            return Err(KeyFormatError::UnexpectedLabel(label.to_string()));
        }

        let info = EncryptedPrivateKeyInfo::from_der(encrypted.as_bytes())
            .map_err(KeyFormatError::EncryptedKeyInfo)?;
        let document = info.decrypt(passphrase).map_err(KeyFormatError::Decrypt)?;

        // A wrong passphrase occasionally survives the padding check; the
        // inner structure catches it.
        let algorithm = PrivateKeyInfo::from_der(document.as_bytes())
            .map_err(KeyFormatError::InvalidKeyInfo)?
            .algorithm
            .oid;

        Ok(Self { document, algorithm })
    }

    /// Algorithm OID of the key (e.g. `1.2.840.113549.1.1.1` for RSA)
    pub fn algorithm(&self) -> ObjectIdentifier {
        self.algorithm
    }

    /// Unencrypted PKCS#8 DER encoding, the form the session builder expects
    pub fn to_pkcs8_der(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.document.as_bytes().to_vec())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Read and decrypt a PEM-encoded encrypted private key file
///
/// # Errors
///
/// - [`KeyError::Io`] if the file cannot be read
/// - [`KeyError::Format`] if the content is not an encrypted PKCS#8 key or
///   the passphrase is wrong
pub fn load_private_key(path: impl AsRef<Path>, passphrase: impl AsRef<[u8]>) -> KeyResult<PrivateKey> {
    let path = path.as_ref();
    let bytes = Zeroizing::new(fs::read(path).map_err(|e| KeyError::io(path, e))?);
    let pem = std::str::from_utf8(&bytes).map_err(|_| KeyFormatError::NotUtf8)?;
    Ok(PrivateKey::from_encrypted_pem(pem, passphrase)?)
}
