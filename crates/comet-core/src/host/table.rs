use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::host::error::HostError;
use crate::identity::TypeIdentity;

/// Type-erased handle to a registered component.
///
/// Wraps the `Rc<I>` the component was attached as, so it can only be turned
/// back into that exact `Rc<I>`.
#[derive(Clone)]
pub struct AnyComponent {
    inner: Rc<dyn Any>,
    interface: &'static str,
}

impl AnyComponent {
    pub fn new<I: ?Sized + 'static>(component: Rc<I>) -> Self {
        Self {
            inner: Rc::new(component),
            interface: type_name::<I>(),
        }
    }

    /// Name of the interface type the component was stored as.
    pub fn interface_name(&self) -> &'static str {
        self.interface
    }

    /// Recovers the typed handle. `None` if the component was stored as a
    /// different interface type.
    pub fn downcast<I: ?Sized + 'static>(&self) -> Option<Rc<I>> {
        self.inner.downcast_ref::<Rc<I>>().cloned()
    }

    pub fn is<I: ?Sized + 'static>(&self) -> bool {
        self.inner.is::<Rc<I>>()
    }
}

impl fmt::Debug for AnyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyComponent")
            .field("interface", &self.interface)
            .finish()
    }
}

/// One host's registrations, keyed by interface identity.
#[derive(Default)]
pub struct InterfaceTable {
    entries: HashMap<TypeIdentity, AnyComponent>,
}

impl InterfaceTable {
    /// Create a new empty interface table
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a table with room for `capacity` registrations
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Register a component. An existing entry is never overwritten.
    pub fn insert(&mut self, identity: TypeIdentity, component: AnyComponent, host: &str) -> Result<(), HostError> {
        use std::collections::hash_map::Entry;

        match self.entries.entry(identity) {
            Entry::Occupied(_) => Err(HostError::DuplicateInterface {
                host: host.to_string(),
                interface: identity.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(component);
                Ok(())
            }
        }
    }

    pub fn remove(&mut self, identity: &TypeIdentity) -> Option<AnyComponent> {
        self.entries.remove(identity)
    }

    pub fn get(&self, identity: &TypeIdentity) -> Option<AnyComponent> {
        self.entries.get(identity).cloned()
    }

    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Get the identities of all registered components.
    pub fn identities(&self) -> Vec<TypeIdentity> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for InterfaceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.entries.keys().map(|id| id.to_string()).collect();
        f.debug_struct("InterfaceTable")
            .field("entries", &names)
            .finish()
    }
}
