//! snowsession core
//!
//! Resolves how a process authenticates to Snowflake and produces a single
//! reusable session handle. The client library itself stays behind the
//! [`SessionBuilder`] trait; this crate decides which credentials to use and
//! caches the session it builds.
//!
//! ## Credential precedence
//!
//! Sources are checked in a fixed order, and only the first one whose
//! trigger is present is attempted:
//! 1. `SNOWFLAKE_P8_FILE` is set: key-pair auth with an encrypted PKCS#8 key
//! 2. `~/.snowsql/config` exists: the `[connections.dev]` profile
//! 3. `SNOWSQL_ACCOUNT` is set: password auth from `SNOWSQL_*` variables
//!
//! ```rust,ignore
//! use snowsession_core::SessionResolver;
//!
//! let resolver = SessionResolver::new(MyClient::default());
//!
//! // First call resolves credentials and connects; later calls reuse it
//! let session = resolver.get_session()?;
//! ```

pub mod types;
pub mod keys;
pub mod logging;
pub mod config;
pub mod session;
pub mod resolver;

// Re-export commonly used types
pub use types::{ConnectionParams, CredentialField, CredentialSecret};

pub use keys::{load_private_key, KeyError, KeyFormatError, PrivateKey};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, CaptureLogger, TracingLogger};

pub use config::{
    CredentialSource, SourceKind, ConfigError,
    KeyPairEnvSource, ProfileSource, PasswordEnvSource, ProfileError,
    read_profile, default_sources,
};

pub use session::{
    SessionBuilder, SessionConfig, SessionAuth, SessionFactory, SessionError, SessionResult,
    MockSessionBuilder, MockSession,
};

pub use resolver::{SessionResolver, ConnectionCache, ResolveStep};
