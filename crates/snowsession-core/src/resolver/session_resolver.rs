//! Credential precedence and session caching

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{default_sources, CredentialSource, ProfileSource, SourceKind};
use crate::logging::{SharedLogger, TracingLogger};
use crate::session::{SessionBuilder, SessionError, SessionFactory, SessionResult};

use super::cache::ConnectionCache;

/// States of one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    Cached,
    TryKeyPair,
    TryProfile,
    TryPassword,
    Failed,
    Success,
}

impl From<SourceKind> for ResolveStep {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::KeyPairEnv => ResolveStep::TryKeyPair,
            SourceKind::ProfileFile => ResolveStep::TryProfile,
            SourceKind::PasswordEnv => ResolveStep::TryPassword,
        }
    }
}

impl fmt::Display for ResolveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolveStep::Cached => "cached",
            ResolveStep::TryKeyPair => "try-key-pair",
            ResolveStep::TryProfile => "try-profile",
            ResolveStep::TryPassword => "try-password",
            ResolveStep::Failed => "failed",
            ResolveStep::Success => "success",
        };
        f.write_str(name)
    }
}

/// Resolves credentials into one cached session
///
/// Sources are checked in a fixed order: key-pair environment, snowsql
/// profile file, password environment. Only the first source whose trigger
/// is present is attempted, and its outcome is final for the call. A
/// successful session is cached and returned by every later call.
///
/// The resolver is owned by the caller; share it (e.g. in an `Arc`) wherever
/// a session is needed. Concurrent first calls are serialized, so at most one
/// session is ever built.
///
/// # Example
///
/// ```rust,ignore
/// use snowsession_core::{SessionResolver, MockSessionBuilder};
///
/// let resolver = SessionResolver::new(MockSessionBuilder::new());
/// let session = resolver.get_session()?;
/// let again = resolver.get_session()?;
/// assert!(std::sync::Arc::ptr_eq(&session, &again));
/// ```
pub struct SessionResolver<B: SessionBuilder> {
    factory: SessionFactory<B>,
    sources: Vec<Box<dyn CredentialSource>>,
    cache: ConnectionCache<B::Session>,
    resolving: Mutex<()>,
    logger: SharedLogger,
}

impl<B: SessionBuilder> SessionResolver<B> {
    /// Create a resolver with the default sources, logging through `tracing`
    pub fn new(builder: B) -> Self {
        let logger: SharedLogger = Arc::new(TracingLogger::new());
        Self {
            factory: SessionFactory::new(builder, Arc::clone(&logger)),
            sources: default_sources(),
            cache: ConnectionCache::new(),
            resolving: Mutex::new(()),
            logger,
        }
    }

    /// Use a different logger
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.factory.set_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    /// Read the profile source from `path`, section `connections.<profile>`
    pub fn with_profile(mut self, path: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        let replacement = ProfileSource::new(path, profile);
        for source in self.sources.iter_mut() {
            if source.kind() == SourceKind::ProfileFile {
                *source = Box::new(replacement.clone());
            }
        }
        self
    }

    /// Replace the source list; order is priority
    pub fn with_sources(mut self, sources: Vec<Box<dyn CredentialSource>>) -> Self {
        self.sources = sources;
        self
    }

    /// Kinds of the configured sources, in priority order
    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// The underlying client
    pub fn builder(&self) -> &B {
        self.factory.builder()
    }

    /// The cached session, without attempting resolution
    pub fn cached(&self) -> Option<Arc<B::Session>> {
        self.cache.get()
    }

    /// Return the session, creating it on first use
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoCredentials`] if no source is active
    /// - otherwise whatever the first active source, the key loader or the
    ///   session builder reported; later sources are not consulted
    pub fn get_session(&self) -> SessionResult<Arc<B::Session>> {
        if let Some(session) = self.cache.get() {
            self.step(ResolveStep::Cached);
            return Ok(session);
        }

        let _guard = self.resolving.lock();
        // Another caller may have finished while we waited
        if let Some(session) = self.cache.get() {
            self.step(ResolveStep::Cached);
            return Ok(session);
        }

        let Some(source) = self.sources.iter().find(|s| s.is_active()) else {
            self.step(ResolveStep::Failed);
            self.logger.error("No credential source is configured");
            return Err(SessionError::NoCredentials);
        };

        self.step(ResolveStep::from(source.kind()));
        self.logger.info(&format!("Resolving session from {}", source.name()));

        match self.build(&**source) {
            Ok(session) => {
                self.cache.set(Arc::clone(&session));
                self.step(ResolveStep::Success);
                Ok(session)
            }
            Err(err) => {
                self.step(ResolveStep::Failed);
                self.logger.error(&format!("{} failed: {}", source.name(), err));
                Err(err)
            }
        }
    }

    fn build(&self, source: &dyn CredentialSource) -> SessionResult<Arc<B::Session>> {
        let params = source.load()?;
        if let Some(key) = params.private_key() {
            self.logger.debug(&format!("Loaded private key ({})", key.algorithm()));
        }
        Ok(Arc::new(self.factory.create_session(params)?))
    }

    fn step(&self, step: ResolveStep) {
        self.logger.debug(&format!("resolve step: {step}"));
    }
}
