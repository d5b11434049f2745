use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::component::HostReachable;
use crate::host::WeakHost;
use crate::identity::Interface;

/// Typed result of one interface lookup through a host.
///
/// The lookup happens once, in [`Resolver::new`]. The resolver remembers the
/// host it went through as a [`WeakHost`], so [`cast`](Resolver::cast) can look
/// up another interface on the same host without ever keeping the host alive.
pub struct Resolver<I: ?Sized> {
    target: Option<Rc<I>>,
    host: Option<WeakHost>,
}

impl<I: Interface + ?Sized> Resolver<I> {
    pub fn new<S: HostReachable + ?Sized>(source: &S) -> Self {
        let host = source.reach_host();
        let target = host.as_ref().and_then(WeakHost::query::<I>);
        if target.is_none() {
            log::debug!("Resolver: '{}' could not be resolved", I::identity());
        }
        Self { target, host }
    }

    /// Resolves another interface through the host this one came from.
    pub fn cast<J: Interface + ?Sized>(&self) -> Resolver<J> {
        match &self.host {
            Some(host) => Resolver::new(host),
            None => Resolver::empty(),
        }
    }

    /// Same as `Resolver::<I>::new(other)`: re-queries the host behind `other`.
    pub fn from_resolver<J: ?Sized>(other: &Resolver<J>) -> Self {
        match &other.host {
            Some(host) => Self::new(host),
            None => Self::empty(),
        }
    }
}

impl<I: ?Sized> Resolver<I> {
    fn empty() -> Self {
        Self { target: None, host: None }
    }

    pub fn is_valid(&self) -> bool {
        self.target.is_some()
    }

    pub fn get(&self) -> Option<&Rc<I>> {
        self.target.as_ref()
    }

    pub fn into_inner(self) -> Option<Rc<I>> {
        self.target
    }
}

/// # Panics
///
/// Dereferencing an invalid resolver panics; check [`Resolver::is_valid`] or
/// use [`Resolver::get`] first.
impl<I: ?Sized> Deref for Resolver<I> {
    type Target = I;

    fn deref(&self) -> &I {
        match &self.target {
            Some(target) => &**target,
            None => panic!("dereferenced an unresolved interface"),
        }
    }
}

impl<I: ?Sized> fmt::Debug for Resolver<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("interface", &std::any::type_name::<I>())
            .field("resolved", &self.target.is_some())
            .finish()
    }
}

impl<I: ?Sized> HostReachable for Resolver<I> {
    fn reach_host(&self) -> Option<WeakHost> {
        self.host.clone()
    }
}
