//! Mock session builder for testing
//!
//! Records every configuration it receives and hands out numbered sessions
//! without touching the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use secrecy::ExposeSecret;

use super::traits::{BoxError, SessionAuth, SessionBuilder, SessionConfig};

/// Secret as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedAuth {
    Password(String),
    PrivateKey(Vec<u8>),
}

/// A copy of a [`SessionConfig`] the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedConfig {
    pub account: String,
    pub user: String,
    pub role: String,
    pub warehouse: String,
    pub database: String,
    pub schema: String,
    pub auth: RecordedAuth,
}

impl From<&SessionConfig> for RecordedConfig {
    fn from(config: &SessionConfig) -> Self {
        let auth = match &config.auth {
            SessionAuth::Password(password) => RecordedAuth::Password(password.expose_secret().to_string()),
            SessionAuth::PrivateKey(der) => RecordedAuth::PrivateKey(der.to_vec()),
        };
        Self {
            account: config.account.clone(),
            user: config.user.clone(),
            role: config.role.clone(),
            warehouse: config.warehouse.clone(),
            database: config.database.clone(),
            schema: config.schema.clone(),
            auth,
        }
    }
}

/// Session handed out by [`MockSessionBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSession {
    /// 1-based sequence number of the `create` call that produced this session
    pub id: usize,
    pub account: String,
    pub user: String,
}

#[derive(Debug, Default)]
struct MockState {
    calls: AtomicUsize,
    configs: Mutex<Vec<RecordedConfig>>,
}

/// Mock client library
///
/// Clones share state, so a test can keep one clone and hand the other to a
/// resolver.
#[derive(Debug, Clone, Default)]
pub struct MockSessionBuilder {
    state: Arc<MockState>,
    failure: Option<String>,
}

impl MockSessionBuilder {
    /// A builder that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that rejects every request with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            state: Arc::default(),
            failure: Some(message.into()),
        }
    }

    /// Number of `create` calls so far, including failed ones
    pub fn call_count(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Every configuration received, in order
    pub fn configs(&self) -> Vec<RecordedConfig> {
        self.state.configs.lock().clone()
    }

    pub fn last_config(&self) -> Option<RecordedConfig> {
        self.state.configs.lock().last().cloned()
    }
}

impl SessionBuilder for MockSessionBuilder {
    type Session = MockSession;

    fn name(&self) -> &str {
        "mock"
    }

    fn create(&self, config: &SessionConfig) -> Result<MockSession, BoxError> {
        let id = self.state.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.configs.lock().push(RecordedConfig::from(config));

        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }

        Ok(MockSession {
            id,
            account: config.account.clone(),
            user: config.user.clone(),
        })
    }
}
