//! # Comet Core
//!
//! An in-process component hosting runtime. Components register themselves on a
//! [`Host`] under an interface identity, find each other through the host
//! without holding direct references, and are torn down in a controlled order
//! when the last handle to the host goes away.
//!
//! ## Modules
//!
//! - [`identity`]: [`TypeIdentity`] values and the [`Interface`] marker trait.
//! - [`host`]: the [`Host`] handle, its [`InterfaceTable`], the
//!   [`DeferredActionStack`] and the parent/child hierarchy.
//! - [`component`]: the host-aware and passive adapter roles plus the
//!   [`Resolver`] used to look up sibling components.
//! - [`config`]: [`HostConfig`] loading from JSON, TOML or YAML.
//! - [`constants`] and [`error`]: shared defaults and the crate-level [`Error`].
//!
//! The runtime is single-threaded by contract: handles are `!Send` and every
//! operation runs synchronously on the caller's thread.
pub mod component;
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod identity;

pub use component::{Component, HostLink, HostReachable, Resolver};
pub use config::{ConfigFormat, HostConfig};
pub use error::{Error, Result};
pub use host::{AnyComponent, AttachError, DeferredActionStack, Host, HostError, InterfaceTable, WeakHost};
pub use identity::{identity_of, pin, Interface, TypeIdentity};

#[cfg(test)]
mod tests;
