//! Session factory

use std::sync::Arc;

use crate::logging::Logger;
use crate::types::{ConnectionParams, CredentialSecret};

use super::error::{SessionError, SessionResult};
use super::traits::{SessionAuth, SessionBuilder, SessionConfig};

impl From<ConnectionParams> for SessionConfig {
    /// Consumes the params; a private key is serialized to PKCS#8 DER here
    /// and the decrypted key object is dropped.
    fn from(params: ConnectionParams) -> Self {
        let auth = match params.secret {
            CredentialSecret::Password(password) => SessionAuth::Password(password),
            CredentialSecret::PrivateKey(key) => SessionAuth::PrivateKey(key.to_pkcs8_der()),
        };
        SessionConfig {
            account: params.account,
            user: params.user,
            role: params.role,
            warehouse: params.warehouse,
            database: params.database,
            schema: params.schema,
            auth,
        }
    }
}

/// Builds sessions from resolved connection parameters
pub struct SessionFactory<B> {
    builder: B,
    logger: Arc<dyn Logger>,
}

impl<B: SessionBuilder> SessionFactory<B> {
    pub fn new(builder: B, logger: Arc<dyn Logger>) -> Self {
        Self { builder, logger }
    }

    /// The underlying client
    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub(crate) fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    /// Create a session from `params`
    ///
    /// # Errors
    ///
    /// Any builder failure is returned as [`SessionError::SessionCreation`]
    /// with the original error as its source.
    pub fn create_session(&self, params: ConnectionParams) -> SessionResult<B::Session> {
        let auth_kind = params.secret.field_name();
        let config = SessionConfig::from(params);

        self.logger.debug(&format!(
            "Creating session via {} for {}@{} (role={}, warehouse={}, auth={})",
            self.builder.name(),
            config.user,
            config.account,
            config.role,
            config.warehouse,
            auth_kind,
        ));

        self.builder.create(&config).map_err(|e| {
            self.logger.error(&format!("{} rejected the session: {}", self.builder.name(), e));
            SessionError::session_creation(self.builder.name(), e)
        })
    }
}
