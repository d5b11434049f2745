//! # Comet Core Host Errors
//!
//! Defines the recoverable failures of host operations: registration conflicts
//! on the interface table and violations of the parent/child hierarchy.
//!
//! [`AttachError`] wraps a [`HostError`] together with the rejected component,
//! so a failed attach never takes ownership away from the caller.
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Interface '{interface}' is already registered on host '{host}'")]
    DuplicateInterface { host: String, interface: String },

    #[error("Interface '{interface}' is reserved for host '{host}' itself")]
    ReservedIdentity { host: String, interface: String },

    #[error("Host '{host}' cannot be added as its own child")]
    SelfChild { host: String },

    #[error("Adding '{child}' under '{host}' would create a cycle")]
    CyclicHierarchy { host: String, child: String },

    #[error("Host '{child}' already has a parent")]
    AlreadyParented { child: String },

    #[error("Host '{host}' is not the parent of '{child}'")]
    NotParent { host: String, child: String },

    #[error("Host '{host}' is recorded as parent of '{child}' but does not hold it")]
    ChildMissing { host: String, child: String },
}

/// A rejected attach. Hands the component back to the caller.
#[derive(Error)]
#[error("Failed to attach component: {reason}")]
pub struct AttachError<C> {
    component: C,
    #[source]
    reason: HostError,
}

impl<C> AttachError<C> {
    pub(crate) fn new(component: C, reason: HostError) -> Self {
        Self { component, reason }
    }

    pub fn reason(&self) -> &HostError {
        &self.reason
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    /// Recovers the component that could not be attached.
    pub fn into_component(self) -> C {
        self.component
    }
}

// Components are usually trait objects without a Debug bound.
impl<C> fmt::Debug for AttachError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachError")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
