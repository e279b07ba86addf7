//! Normalized connection parameters

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::keys::PrivateKey;

/// The fields a credential source may supply
///
/// `Password` is the only secret field a text source can carry; private keys
/// only ever arrive through the key loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Account,
    User,
    Password,
    Role,
    Warehouse,
    Database,
    Schema,
}

impl CredentialField {
    /// Non-secret fields, in the order they are validated
    pub const TARGET: [CredentialField; 6] = [
        CredentialField::Account,
        CredentialField::User,
        CredentialField::Role,
        CredentialField::Warehouse,
        CredentialField::Database,
        CredentialField::Schema,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::Account => "account",
            CredentialField::User => "user",
            CredentialField::Password => "password",
            CredentialField::Role => "role",
            CredentialField::Warehouse => "warehouse",
            CredentialField::Database => "database",
            CredentialField::Schema => "schema",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single authentication secret of a connection
pub enum CredentialSecret {
    /// Plain password authentication
    Password(SecretString),
    /// Key-pair authentication with a decrypted private key
    PrivateKey(PrivateKey),
}

impl CredentialSecret {
    /// Name of the field this secret fills (`password` or `private_key`)
    pub fn field_name(&self) -> &'static str {
        match self {
            CredentialSecret::Password(_) => "password",
            CredentialSecret::PrivateKey(_) => "private_key",
        }
    }

    pub fn is_key_pair(&self) -> bool {
        matches!(self, CredentialSecret::PrivateKey(_))
    }
}

impl fmt::Debug for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSecret::Password(_) => f.write_str("Password([REDACTED])"),
            CredentialSecret::PrivateKey(key) => f.debug_tuple("PrivateKey").field(key).finish(),
        }
    }
}

/// A complete set of connection parameters ready for session construction
///
/// Every target field is non-empty and exactly one secret is present. Sources
/// build a fresh value per resolution attempt; values are never merged.
#[derive(Debug)]
pub struct ConnectionParams {
    pub account: String,
    pub user: String,
    pub role: String,
    pub warehouse: String,
    pub database: String,
    pub schema: String,
    pub secret: CredentialSecret,
}

impl ConnectionParams {
    /// Look up a non-secret field by name
    ///
    /// Returns `None` for [`CredentialField::Password`]; use
    /// [`ConnectionParams::password`] for that.
    pub fn field(&self, field: CredentialField) -> Option<&str> {
        match field {
            CredentialField::Account => Some(&self.account),
            CredentialField::User => Some(&self.user),
            CredentialField::Role => Some(&self.role),
            CredentialField::Warehouse => Some(&self.warehouse),
            CredentialField::Database => Some(&self.database),
            CredentialField::Schema => Some(&self.schema),
            CredentialField::Password => None,
        }
    }

    /// The password, when this is password authentication
    pub fn password(&self) -> Option<&str> {
        match &self.secret {
            CredentialSecret::Password(password) => Some(password.expose_secret()),
            CredentialSecret::PrivateKey(_) => None,
        }
    }

    /// The private key, when this is key-pair authentication
    pub fn private_key(&self) -> Option<&PrivateKey> {
        match &self.secret {
            CredentialSecret::PrivateKey(key) => Some(key),
            CredentialSecret::Password(_) => None,
        }
    }
}
