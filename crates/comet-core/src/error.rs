//! # Comet Core Errors
//!
//! Crate-level [`Error`] wrapping the typed error of each subsystem, and the
//! matching [`Result`] alias.
//!
//! Most host operations report failures with their own type
//! ([`HostError`], [`AttachError`]) because the caller usually wants to act on
//! the specific condition. `Error` is for code paths that cross subsystems,
//! such as building a host from a configuration file.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::ConfigError;
use crate::host::{AttachError, HostError};
use crate::identity::IdentityError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Registration or hierarchy failure on a host
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Invalid interface identity
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Host configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

// The rejected component is dropped; keep the AttachError if it is needed.
impl<C> From<AttachError<C>> for Error {
    fn from(err: AttachError<C>) -> Self {
        Error::Host(err.reason().clone())
    }
}
