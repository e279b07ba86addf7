//! Session builder trait definition

use std::fmt;

use secrecy::SecretString;
use zeroize::Zeroizing;

/// Error type returned by client libraries
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The secret handed to the client library
pub enum SessionAuth {
    Password(SecretString),
    /// Unencrypted PKCS#8 DER, zeroed on drop
    PrivateKey(Zeroizing<Vec<u8>>),
}

impl fmt::Debug for SessionAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionAuth::Password(_) => f.write_str("Password([REDACTED])"),
            SessionAuth::PrivateKey(der) => write!(f, "PrivateKey([{} bytes])", der.len()),
        }
    }
}

/// Connection options passed verbatim to [`SessionBuilder::create`]
#[derive(Debug)]
pub struct SessionConfig {
    pub account: String,
    pub user: String,
    pub role: String,
    pub warehouse: String,
    pub database: String,
    pub schema: String,
    pub auth: SessionAuth,
}

impl SessionConfig {
    /// Non-secret options as `(name, value)` pairs, in client option naming
    pub fn options(&self) -> [(&'static str, &str); 6] {
        [
            ("account", self.account.as_str()),
            ("user", self.user.as_str()),
            ("role", self.role.as_str()),
            ("warehouse", self.warehouse.as_str()),
            ("database", self.database.as_str()),
            ("schema", self.schema.as_str()),
        ]
    }
}

/// The external warehouse client
///
/// Implementations wrap a concrete client library and open one authenticated
/// session per call. The call blocks; any timeout is the library's own.
///
/// # Example
///
/// ```rust,ignore
/// struct MyClient;
///
/// impl SessionBuilder for MyClient {
///     type Session = my_client::Session;
///
///     fn name(&self) -> &str {
///         "my-client"
///     }
///
///     fn create(&self, config: &SessionConfig) -> Result<Self::Session, BoxError> {
///         Ok(my_client::Session::connect(config)?)
///     }
/// }
/// ```
pub trait SessionBuilder: Send + Sync {
    /// The live session handle
    type Session: Send + Sync;

    /// Client name used in logs and errors
    fn name(&self) -> &str;

    /// Open a session with the given options
    fn create(&self, config: &SessionConfig) -> Result<Self::Session, BoxError>;
}
