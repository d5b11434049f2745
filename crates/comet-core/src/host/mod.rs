//! # Comet Core Host
//!
//! The [`Host`] is the container components are attached to. It owns:
//!
//! - an [`InterfaceTable`] mapping interface identities to components,
//! - a [`DeferredActionStack`] of teardown callbacks,
//! - an optional weak link to its parent host and owning links to its children.
//!
//! `Host` is a reference-counted handle. Cloning it takes a reference and
//! dropping it releases one; when the last handle goes away the host runs its
//! deferred actions last-registered-first, releases its children in the order
//! they were added, and frees its table. [`WeakHost`] is the non-owning
//! counterpart handed to host-aware components; it can query the host but never
//! keeps it alive.
//!
//! Lookups that miss the local table fall back to the parent chain, so a child
//! host sees everything its ancestors provide while its own registrations
//! shadow theirs. Parents never see their children's registrations.
use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};

pub mod deferred;
pub mod error;
pub mod hierarchy;
pub mod table;

pub use deferred::{DeferredAction, DeferredActionStack};
pub use error::{AttachError, HostError};
pub use table::{AnyComponent, InterfaceTable};

use crate::component::Component;
use crate::config::HostConfig;
use crate::error::Result;
use crate::identity::{identity_of, Interface, TypeIdentity};

/// Outcome of an attach: the component comes back on failure.
pub type AttachResult<I> = std::result::Result<(), AttachError<Rc<I>>>;

struct HostInner {
    label: String,
    self_ref: Weak<HostInner>,
    table: RefCell<InterfaceTable>,
    deferred: RefCell<DeferredActionStack>,
    parent: RefCell<Option<Weak<HostInner>>>,
    children: RefCell<Vec<Host>>,
}

impl HostInner {
    fn weak(&self) -> WeakHost {
        WeakHost { inner: self.self_ref.clone() }
    }

    fn parent(&self) -> Option<Rc<HostInner>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn query_interface(&self, identity: &TypeIdentity) -> Option<AnyComponent> {
        if *identity == identity_of::<WeakHost>() {
            return Some(AnyComponent::new(Rc::new(self.weak())));
        }
        if let Some(found) = self.table.borrow().get(identity) {
            return Some(found);
        }
        match self.parent() {
            Some(parent) => {
                log::trace!("Host '{}': '{}' not local, asking parent '{}'", self.label, identity, parent.label);
                parent.query_interface(identity)
            }
            None => {
                log::debug!("Host '{}': no component registered for '{}'", self.label, identity);
                None
            }
        }
    }
}

impl Drop for HostInner {
    fn drop(&mut self) {
        log::info!("Tearing down host '{}'", self.label);

        // A deleter gets the last host-held handle to its component.
        let table = self.table.get_mut();
        let ran = self.deferred.get_mut().run_all_with(|action| {
            if let Some(owner) = action.owner() {
                drop(table.remove(&owner));
            }
        });

        let children = std::mem::take(self.children.get_mut());
        let released = children.len();
        for child in children {
            *child.inner.parent.borrow_mut() = None;
            drop(child);
        }

        log::info!(
            "Host '{}' released ({} deferred action(s) run, {} child host(s) released, {} entries dropped)",
            self.label,
            ran,
            released,
            self.table.get_mut().len()
        );
    }
}

/// Owning, reference-counted handle to a component host.
pub struct Host {
    inner: Rc<HostInner>,
}

impl Host {
    /// Creates a host with reference count 1.
    ///
    /// `capacity_hint` sizes the interface table; `0` uses
    /// [`DEFAULT_TABLE_CAPACITY`](crate::constants::DEFAULT_TABLE_CAPACITY).
    pub fn new(capacity_hint: usize) -> Self {
        Self::build(&HostConfig {
            capacity_hint,
            ..HostConfig::default()
        })
    }

    /// Like [`Host::new`], with a label used in log lines and errors.
    pub fn with_label(label: impl Into<String>, capacity_hint: usize) -> Self {
        Self::build(&HostConfig {
            label: label.into(),
            capacity_hint,
        })
    }

    /// Creates a host from a validated [`HostConfig`].
    pub fn with_config(config: &HostConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Loads a [`HostConfig`] from `path` and creates a host from it.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = HostConfig::load(path)?;
        Self::with_config(&config)
    }

    fn build(config: &HostConfig) -> Self {
        let capacity = config.effective_capacity();
        log::debug!("Creating host '{}' (table capacity {})", config.label, capacity);
        let inner = Rc::new_cyclic(|self_ref| HostInner {
            label: config.label.clone(),
            self_ref: self_ref.clone(),
            table: RefCell::new(InterfaceTable::with_capacity(capacity)),
            deferred: RefCell::new(DeferredActionStack::new()),
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
        });
        Self { inner }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Number of live owning handles, including those held by a parent host.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Non-owning handle to this host.
    pub fn downgrade(&self) -> WeakHost {
        self.inner.weak()
    }

    /// Whether both handles refer to the same host.
    pub fn ptr_eq(&self, other: &Host) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Registers a host-aware component under `I`.
    ///
    /// On success the component's [`HostLink`](crate::component::HostLink), if
    /// it has one, is bound to this host. Fails with
    /// [`HostError::DuplicateInterface`] if `I` is already registered here.
    pub fn attach<I>(&self, component: Rc<I>) -> AttachResult<I>
    where
        I: Interface + Component + ?Sized,
    {
        let component = self.insert_entry(component)?;
        if let Some(link) = component.host_link() {
            link.bind(self.downgrade());
        }
        Ok(())
    }

    /// Registers a component under `I` without handing it a host reference.
    pub fn attach_passive<I: Interface + ?Sized>(&self, component: Rc<I>) -> AttachResult<I> {
        self.insert_entry(component).map(|_| ())
    }

    /// Attaches `component` and schedules `cleanup(component)` for host
    /// teardown. If the attach fails nothing is scheduled.
    ///
    /// Detaching `I` before teardown cancels the cleanup.
    pub fn attach_with_deleter<I>(&self, component: Rc<I>, cleanup: impl FnOnce(Rc<I>) + 'static) -> AttachResult<I>
    where
        I: Interface + Component + ?Sized,
    {
        let identity = I::identity();
        let scheduled = Rc::clone(&component);
        self.attach(component)?;
        self.inner
            .deferred
            .borrow_mut()
            .push(DeferredAction::owned_by(identity, move || cleanup(scheduled)));
        Ok(())
    }

    fn insert_entry<I: Interface + ?Sized>(&self, component: Rc<I>) -> std::result::Result<Rc<I>, AttachError<Rc<I>>> {
        let identity = I::identity();
        if identity == identity_of::<WeakHost>() {
            log::error!("Host '{}': refusing to register '{}' under the host's own identity", self.label(), identity);
            debug_assert!(false, "component registered under the host's own identity");
            let reason = HostError::ReservedIdentity {
                host: self.label().to_string(),
                interface: identity.to_string(),
            };
            return Err(AttachError::new(component, reason));
        }

        let entry = AnyComponent::new(Rc::clone(&component));
        let inserted = self.inner.table.borrow_mut().insert(identity, entry, &self.inner.label);
        match inserted {
            Ok(()) => {
                log::debug!("Host '{}': attached '{}'", self.label(), identity);
                Ok(component)
            }
            Err(reason) => {
                log::warn!("{}", reason);
                Err(AttachError::new(component, reason))
            }
        }
    }

    /// Removes and returns the component registered under `I` on this host.
    ///
    /// Any teardown action scheduled for it by
    /// [`attach_with_deleter`](Host::attach_with_deleter) is dropped without
    /// running; the caller owns the component again.
    pub fn detach<I: Interface + ?Sized>(&self) -> Option<Rc<I>> {
        let identity = I::identity();
        let entry = self.inner.table.borrow_mut().remove(&identity)?;
        let cancelled = self.inner.deferred.borrow_mut().take_owned(&identity);
        log::debug!(
            "Host '{}': detached '{}' ({} teardown action(s) cancelled)",
            self.label(),
            identity,
            cancelled.len()
        );
        drop(cancelled);
        downcast_entry::<I>(&entry, &identity)
    }

    /// Schedules `action` to run when this host is torn down.
    pub fn at_delete(&self, action: impl FnOnce() + 'static) {
        self.inner.deferred.borrow_mut().push(DeferredAction::new(action));
    }

    /// Looks `identity` up here, then along the parent chain.
    ///
    /// The host's own identity (`identity_of::<WeakHost>()`) answers with a
    /// [`WeakHost`] to this host.
    pub fn query_interface(&self, identity: &TypeIdentity) -> Option<AnyComponent> {
        self.inner.query_interface(identity)
    }

    /// Typed form of [`query_interface`](Host::query_interface).
    pub fn query<I: Interface + ?Sized>(&self) -> Option<Rc<I>> {
        let identity = I::identity();
        let entry = self.query_interface(&identity)?;
        downcast_entry::<I>(&entry, &identity)
    }

    /// Whether `I` is registered on this host itself, ignoring ancestors.
    pub fn contains<I: Interface + ?Sized>(&self) -> bool {
        self.contains_identity(&I::identity())
    }

    pub fn contains_identity(&self, identity: &TypeIdentity) -> bool {
        self.inner.table.borrow().contains(identity)
    }

    /// Identities registered on this host itself.
    pub fn registered_identities(&self) -> Vec<TypeIdentity> {
        self.inner.table.borrow().identities()
    }

    /// Number of local registrations.
    pub fn len(&self) -> usize {
        self.inner.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.table.borrow().is_empty()
    }

    /// Number of teardown actions waiting for destruction.
    pub fn pending_actions(&self) -> usize {
        self.inner.deferred.borrow().len()
    }
}

/// Taking a reference: the clone shares the same host.
impl Clone for Host {
    fn clone(&self) -> Self {
        log::trace!("Host '{}': ref ({} -> {})", self.label(), self.ref_count(), self.ref_count() + 1);
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("label", &self.inner.label)
            .field("ref_count", &self.ref_count())
            .field("table", &*self.inner.table.borrow())
            .field("pending_actions", &self.pending_actions())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Non-owning handle to a [`Host`].
///
/// Queries go through the host while it is alive and return `None` once it
/// has been torn down. A `WeakHost` never contributes to the reference count
/// beyond the duration of a single lookup.
#[derive(Clone)]
pub struct WeakHost {
    inner: Weak<HostInner>,
}

impl Interface for WeakHost {}

impl WeakHost {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Label of the host, if it is still alive.
    pub fn label(&self) -> Option<String> {
        self.inner.upgrade().map(|host| host.label.clone())
    }

    /// Whether this handle points at `host`.
    pub fn points_to(&self, host: &Host) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&host.inner))
    }

    pub fn query_interface(&self, identity: &TypeIdentity) -> Option<AnyComponent> {
        self.inner.upgrade()?.query_interface(identity)
    }

    pub fn query<I: Interface + ?Sized>(&self) -> Option<Rc<I>> {
        let identity = I::identity();
        let entry = self.query_interface(&identity)?;
        downcast_entry::<I>(&entry, &identity)
    }
}

impl fmt::Debug for WeakHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakHost")
            .field("label", &self.label())
            .finish()
    }
}

// Two interfaces sharing a pinned constant end up here.
fn downcast_entry<I: ?Sized + 'static>(entry: &AnyComponent, identity: &TypeIdentity) -> Option<Rc<I>> {
    let typed = entry.downcast::<I>();
    if typed.is_none() {
        log::error!(
            "Identity collision on '{}': stored as '{}', requested as '{}'",
            identity,
            entry.interface_name(),
            type_name::<I>()
        );
        debug_assert!(false, "identity collision on '{identity}'");
    }
    typed
}

#[cfg(test)]
mod tests;
