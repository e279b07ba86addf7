//! Session resolution
//!
//! [`SessionResolver`] is the single entry point: it returns the cached
//! session if there is one, otherwise walks the credential sources in
//! priority order and caches whatever the first active source produces.

mod cache;
mod session_resolver;

pub use cache::ConnectionCache;
pub use session_resolver::{ResolveStep, SessionResolver};
