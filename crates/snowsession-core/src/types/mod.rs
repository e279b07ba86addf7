//! Core types shared by sources, the session factory and the resolver

mod credentials;

pub use credentials::{ConnectionParams, CredentialField, CredentialSecret};
