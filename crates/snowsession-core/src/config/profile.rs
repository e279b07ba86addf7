//! snowsql connection profiles
//!
//! Reads `[connections.<name>]` from a snowsql config file
//! (`~/.snowsql/config` by default) and translates snowsql option names into
//! connection parameter fields.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use secrecy::SecretString;
use thiserror::Error;

use crate::session::SessionError;
use crate::types::{ConnectionParams, CredentialField, CredentialSecret};

use super::ini::{IniDocument, IniError};
use super::traits::{ConfigError, ConfigResult, CredentialSource, SourceKind};

/// Profile used when none is named
pub const DEFAULT_PROFILE: &str = "dev";

/// Section name prefix for connection profiles
pub const CONNECTIONS_PREFIX: &str = "connections.";

/// snowsql option names and the fields they fill
static FIELD_MAP: Lazy<HashMap<&'static str, CredentialField>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("account", CredentialField::Account);
    m.insert("accountname", CredentialField::Account);
    m.insert("username", CredentialField::User);
    m.insert("password", CredentialField::Password);
    m.insert("rolename", CredentialField::Role);
    m.insert("warehousename", CredentialField::Warehouse);
    m.insert("dbname", CredentialField::Database);
    m.insert("schemaname", CredentialField::Schema);
    m
});

/// What went wrong reading a profile
///
/// Callers see these only as the `source()` of
/// [`ConfigError::Profile`].
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] IniError),

    #[error("section [{0}] not found")]
    SectionNotFound(String),

    #[error("unrecognized option '{0}'")]
    UnknownField(String),

    #[error("option for '{0}' is missing or empty")]
    MissingField(CredentialField),
}

/// Translate a snowsql option name (`dbname`, `accountname`, ...)
pub fn translate_field(option: &str) -> Option<CredentialField> {
    FIELD_MAP.get(option.to_lowercase().as_str()).copied()
}

/// Read profile `profile` from the config file at `path`
///
/// # Errors
///
/// Every failure (missing file, parse error, missing section, unknown or
/// missing option) is reported as [`ConfigError::Profile`]
/// with the generic message "Error getting snowsql config details".
pub fn read_profile(path: impl AsRef<Path>, profile: &str) -> ConfigResult<ConnectionParams> {
    Ok(load_profile(path.as_ref(), profile)?)
}

fn load_profile(path: &Path, profile: &str) -> Result<ConnectionParams, ProfileError> {
    let content = fs::read_to_string(path)?;
    let document = IniDocument::parse(&content)?;

    let section_name = format!("{CONNECTIONS_PREFIX}{profile}");
    let section = document
        .section(&section_name)
        .ok_or(ProfileError::SectionNotFound(section_name))?;

    let mut fields = ProfileFields::default();
    for (option, value) in section {
        let field = translate_field(option)
            .ok_or_else(|| ProfileError::UnknownField(option.to_string()))?;
        fields.set(field, value.trim_matches('"'));
    }
    fields.into_params()
}

/// Values collected from one section; later options win
#[derive(Default)]
struct ProfileFields {
    values: HashMap<CredentialField, String>,
}

impl ProfileFields {
    fn set(&mut self, field: CredentialField, value: &str) {
        self.values.insert(field, value.to_string());
    }

    fn take(&mut self, field: CredentialField) -> Result<String, ProfileError> {
        self.values
            .remove(&field)
            .filter(|v| !v.is_empty())
            .ok_or(ProfileError::MissingField(field))
    }

    fn into_params(mut self) -> Result<ConnectionParams, ProfileError> {
        Ok(ConnectionParams {
            account: self.take(CredentialField::Account)?,
            user: self.take(CredentialField::User)?,
            role: self.take(CredentialField::Role)?,
            warehouse: self.take(CredentialField::Warehouse)?,
            database: self.take(CredentialField::Database)?,
            schema: self.take(CredentialField::Schema)?,
            secret: CredentialSecret::Password(SecretString::from(
                self.take(CredentialField::Password)?,
            )),
        })
    }
}

/// Credential source backed by a snowsql config file
///
/// Active whenever the config file exists; the named profile must then be
/// present and complete.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    path: Option<PathBuf>,
    profile: String,
}

impl Default for ProfileSource {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

impl ProfileSource {
    /// Create a source for a specific file and profile
    pub fn new(path: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            profile: profile.into(),
        }
    }

    /// `~/.snowsql/config`, or `None` when there is no home directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".snowsql").join("config"))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}

impl CredentialSource for ProfileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::ProfileFile
    }

    fn is_active(&self) -> bool {
        self.path.as_deref().is_some_and(Path::exists)
    }

    fn load(&self) -> Result<ConnectionParams, SessionError> {
        let Some(path) = self.path.as_deref() else {
            let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory");
            return Err(ConfigError::from(ProfileError::Io(missing)).into());
        };
        Ok(read_profile(path, &self.profile)?)
    }
}
