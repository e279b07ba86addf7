//! Credential sources
//!
//! Three independent sources, each producing a complete set of
//! [`ConnectionParams`](crate::types::ConnectionParams):
//! - `KeyPairEnvSource`: encrypted private key + `SNOWFLAKE_*` variables
//! - `ProfileSource`: `[connections.<name>]` in `~/.snowsql/config`
//! - `PasswordEnvSource`: `SNOWSQL_*` variables

mod traits;
mod env;
pub mod ini;
mod keypair_env;
mod profile;
mod password_env;

pub use traits::{CredentialSource, SourceKind, ConfigError, ConfigResult};
pub use keypair_env::{
    KeyPairEnvSource, SNOWFLAKE_P8_FILE, SNOWSQL_PRIVATE_KEY_PASSPHRASE, SNOWFLAKE_ACCOUNT,
    SNOWFLAKE_USER, SNOWFLAKE_ROLE, SNOWFLAKE_WAREHOUSE, SNOWFLAKE_DATABASE, SNOWFLAKE_SCHEMA,
};
pub use profile::{
    ProfileSource, ProfileError, read_profile, translate_field, DEFAULT_PROFILE, CONNECTIONS_PREFIX,
};
pub use password_env::{
    PasswordEnvSource, SNOWSQL_ACCOUNT, SNOWSQL_USER, SNOWSQL_PWD, SNOWSQL_ROLE,
    SNOWSQL_WAREHOUSE, SNOWSQL_DATABASE, SNOWSQL_SCHEMA,
};

/// Default sources in priority order: key pair, profile file, password
pub fn default_sources() -> Vec<Box<dyn CredentialSource>> {
    vec![
        Box::new(KeyPairEnvSource::new()),
        Box::new(ProfileSource::default()),
        Box::new(PasswordEnvSource::new()),
    ]
}
