//! Session construction
//!
//! The warehouse client library is reached only through the
//! [`SessionBuilder`] trait. [`SessionFactory`] turns resolved
//! [`ConnectionParams`](crate::types::ConnectionParams) into the builder's
//! [`SessionConfig`], serializing private keys at the last moment.
//!
//! The `MockSessionBuilder` is kept for testing purposes.

mod traits;
mod error;
mod factory;
mod mock;

pub use traits::{BoxError, SessionAuth, SessionBuilder, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use factory::SessionFactory;
pub use mock::{MockSession, MockSessionBuilder, RecordedAuth, RecordedConfig};
