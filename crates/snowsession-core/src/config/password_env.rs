//! Password credentials from `SNOWSQL_*` environment variables

use secrecy::SecretString;

use crate::session::SessionError;
use crate::types::{ConnectionParams, CredentialSecret};

use super::env;
use super::traits::{CredentialSource, SourceKind};

/// Account name; its presence activates the source
pub const SNOWSQL_ACCOUNT: &str = "SNOWSQL_ACCOUNT";
pub const SNOWSQL_USER: &str = "SNOWSQL_USER";
pub const SNOWSQL_PWD: &str = "SNOWSQL_PWD";
pub const SNOWSQL_ROLE: &str = "SNOWSQL_ROLE";
pub const SNOWSQL_WAREHOUSE: &str = "SNOWSQL_WAREHOUSE";
pub const SNOWSQL_DATABASE: &str = "SNOWSQL_DATABASE";
pub const SNOWSQL_SCHEMA: &str = "SNOWSQL_SCHEMA";

/// Credential source for password authentication
///
/// The least preferred source. Active iff `SNOWSQL_ACCOUNT` is set; once
/// active, a missing variable is a fatal misconfiguration.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordEnvSource {
    _private: (),
}

impl PasswordEnvSource {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl CredentialSource for PasswordEnvSource {
    fn kind(&self) -> SourceKind {
        SourceKind::PasswordEnv
    }

    fn is_active(&self) -> bool {
        env::is_set(SNOWSQL_ACCOUNT)
    }

    fn load(&self) -> Result<ConnectionParams, SessionError> {
        Ok(ConnectionParams {
            account: env::required(SNOWSQL_ACCOUNT)?,
            user: env::required(SNOWSQL_USER)?,
            secret: CredentialSecret::Password(SecretString::from(env::required(SNOWSQL_PWD)?)),
            role: env::required(SNOWSQL_ROLE)?,
            warehouse: env::required(SNOWSQL_WAREHOUSE)?,
            database: env::required(SNOWSQL_DATABASE)?,
            schema: env::required(SNOWSQL_SCHEMA)?,
        })
    }
}
