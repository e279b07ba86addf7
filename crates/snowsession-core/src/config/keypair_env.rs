//! Key-pair credentials from `SNOWFLAKE_*` environment variables

use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::keys::load_private_key;
use crate::session::SessionError;
use crate::types::{ConnectionParams, CredentialSecret};

use super::env;
use super::traits::{CredentialSource, SourceKind};

/// Path of the encrypted PKCS#8 key; its presence activates the source
pub const SNOWFLAKE_P8_FILE: &str = "SNOWFLAKE_P8_FILE";
pub const SNOWSQL_PRIVATE_KEY_PASSPHRASE: &str = "SNOWSQL_PRIVATE_KEY_PASSPHRASE";
pub const SNOWFLAKE_ACCOUNT: &str = "SNOWFLAKE_ACCOUNT";
pub const SNOWFLAKE_USER: &str = "SNOWFLAKE_USER";
pub const SNOWFLAKE_ROLE: &str = "SNOWFLAKE_ROLE";
pub const SNOWFLAKE_WAREHOUSE: &str = "SNOWFLAKE_WAREHOUSE";
pub const SNOWFLAKE_DATABASE: &str = "SNOWFLAKE_DATABASE";
pub const SNOWFLAKE_SCHEMA: &str = "SNOWFLAKE_SCHEMA";

/// Credential source for key-pair authentication
///
/// Intended for automated and server contexts. Active iff `SNOWFLAKE_P8_FILE`
/// is set. Loading requires the passphrase and all six companion variables;
/// they are checked before the key is decrypted.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyPairEnvSource {
    _private: (),
}

impl KeyPairEnvSource {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl CredentialSource for KeyPairEnvSource {
    fn kind(&self) -> SourceKind {
        SourceKind::KeyPairEnv
    }

    fn is_active(&self) -> bool {
        env::is_set(SNOWFLAKE_P8_FILE)
    }

    fn load(&self) -> Result<ConnectionParams, SessionError> {
        let key_path = PathBuf::from(env::required_os(SNOWFLAKE_P8_FILE)?);
        let passphrase = Zeroizing::new(env::present(SNOWSQL_PRIVATE_KEY_PASSPHRASE)?);

        let account = env::required(SNOWFLAKE_ACCOUNT)?;
        let user = env::required(SNOWFLAKE_USER)?;
        let role = env::required(SNOWFLAKE_ROLE)?;
        let warehouse = env::required(SNOWFLAKE_WAREHOUSE)?;
        let database = env::required(SNOWFLAKE_DATABASE)?;
        let schema = env::required(SNOWFLAKE_SCHEMA)?;

        let key = load_private_key(&key_path, passphrase.as_bytes())?;

        Ok(ConnectionParams {
            account,
            user,
            role,
            warehouse,
            database,
            schema,
            secret: CredentialSecret::PrivateKey(key),
        })
    }
}
