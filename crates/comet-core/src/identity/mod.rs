//! # Comet Core Type Identity
//!
//! Every interface a component can be registered under is identified by a
//! [`TypeIdentity`]. By default the identity is derived from the interface's
//! [`TypeId`], which is stable for one process run but not across builds. An
//! interface that has to be recognised across independently compiled modules
//! pins a non-zero constant instead:
//!
//! ```
//! use std::num::NonZeroU64;
//! use comet_core::identity::{pin, Interface};
//!
//! trait Clock {
//!     fn now(&self) -> u64;
//! }
//!
//! impl Interface for dyn Clock {
//!     const PINNED: Option<NonZeroU64> = pin(0xC10C_0001);
//! }
//! ```
//!
//! Pinning zero fails const evaluation, so it is rejected when the crate that
//! declares the interface is built.
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU64;

pub mod error;

pub use error::IdentityError;

/// Marker for types that components can be registered under.
///
/// Usually implemented for a trait object, e.g. `impl Interface for dyn Logger {}`.
pub trait Interface: 'static {
    /// Fixed identity constant. `None` derives the identity from the type.
    const PINNED: Option<NonZeroU64> = None;

    fn identity() -> TypeIdentity {
        TypeIdentity::of::<Self>()
    }
}

/// Returns the identity `I` is registered under.
pub fn identity_of<I: Interface + ?Sized>() -> TypeIdentity {
    I::identity()
}

/// Validates a pinned identity constant at compile time.
///
/// # Panics
///
/// Panics when `raw` is zero. Used in a `const` item this becomes a build error.
pub const fn pin(raw: u64) -> Option<NonZeroU64> {
    match NonZeroU64::new(raw) {
        Some(value) => Some(value),
        None => panic!("pinned interface identity must be non-zero"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum IdentityKey {
    Derived(TypeId),
    Pinned(NonZeroU64),
}

/// Comparable token identifying one interface type.
///
/// Equality and hashing only look at the key; the name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    key: IdentityKey,
    name: &'static str,
}

impl TypeIdentity {
    /// Identity of `I`, honouring its pinned constant if it has one.
    pub fn of<I: Interface + ?Sized>() -> Self {
        let key = match I::PINNED {
            Some(raw) => IdentityKey::Pinned(raw),
            None => IdentityKey::Derived(TypeId::of::<I>()),
        };
        Self { key, name: type_name::<I>() }
    }

    /// Builds a pinned identity from a constant only known at run time, such as
    /// one read from a plugin's export table.
    pub fn from_raw(raw: u64, name: &'static str) -> Result<Self, IdentityError> {
        let value = NonZeroU64::new(raw).ok_or_else(|| IdentityError::ZeroPin {
            interface: name.to_string(),
        })?;
        Ok(Self { key: IdentityKey::Pinned(value), name })
    }

    /// Diagnostic name: the interface's type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.key, IdentityKey::Pinned(_))
    }

    /// The pinned constant, if any.
    pub fn raw(&self) -> Option<u64> {
        match self.key {
            IdentityKey::Pinned(value) => Some(value.get()),
            IdentityKey::Derived(_) => None,
        }
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeIdentity")
            .field("name", &self.name)
            .field("pinned", &self.raw())
            .finish()
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            IdentityKey::Pinned(value) => write!(f, "{}#{:#x}", self.name, value.get()),
            IdentityKey::Derived(_) => f.write_str(self.name),
        }
    }
}
