//! # Comet Core Identity Errors
//!
//! Errors raised while building a [`TypeIdentity`](super::TypeIdentity) from a
//! raw constant at run time. Compile-time pins go through [`pin`](super::pin)
//! and never produce these.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Pinned identity for interface '{interface}' must be non-zero")]
    ZeroPin { interface: String },
}
