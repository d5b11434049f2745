//! Parent/child links between hosts.
//!
//! A parent holds an owning [`Host`] handle for each child, so adding a child
//! takes a reference on it and removing one releases that reference. The child
//! only keeps a weak back-link, used to walk up the chain during lookups and
//! cycle checks.
use std::rc::{Rc, Weak};

use crate::host::error::HostError;
use crate::host::{Host, WeakHost};

impl Host {
    /// Adopts `child`, taking a reference on it.
    ///
    /// Fails if `child` is this host, is one of this host's ancestors, or
    /// already has a parent.
    pub fn add_child(&self, child: &Host) -> Result<(), HostError> {
        if self.ptr_eq(child) {
            let err = HostError::SelfChild { host: self.label().to_string() };
            log::warn!("{}", err);
            return Err(err);
        }

        if self.is_descendant_of(child) {
            let err = HostError::CyclicHierarchy {
                host: self.label().to_string(),
                child: child.label().to_string(),
            };
            log::warn!("{}", err);
            return Err(err);
        }

        if child.inner.parent.borrow().is_some() {
            let err = HostError::AlreadyParented { child: child.label().to_string() };
            log::warn!("{}", err);
            return Err(err);
        }

        *child.inner.parent.borrow_mut() = Some(self.inner.self_ref.clone());
        self.inner.children.borrow_mut().push(child.clone());
        log::debug!("Host '{}': adopted child '{}'", self.label(), child.label());
        Ok(())
    }

    /// Releases `child`, dropping the reference taken by
    /// [`add_child`](Host::add_child).
    ///
    /// Fails if this host is not `child`'s parent, or if the link is recorded
    /// on the child but the child is missing from this host's list.
    pub fn remove_child(&self, child: &Host) -> Result<(), HostError> {
        let is_parent = child
            .inner
            .parent
            .borrow()
            .as_ref()
            .is_some_and(|parent| Weak::ptr_eq(parent, &self.inner.self_ref));
        if !is_parent {
            let err = HostError::NotParent {
                host: self.label().to_string(),
                child: child.label().to_string(),
            };
            log::warn!("{}", err);
            return Err(err);
        }

        let position = self
            .inner
            .children
            .borrow()
            .iter()
            .position(|held| held.ptr_eq(child));
        let Some(index) = position else {
            let err = HostError::ChildMissing {
                host: self.label().to_string(),
                child: child.label().to_string(),
            };
            log::error!("{}", err);
            return Err(err);
        };

        let released = self.inner.children.borrow_mut().remove(index);
        *child.inner.parent.borrow_mut() = None;
        log::debug!("Host '{}': released child '{}'", self.label(), child.label());
        drop(released);
        Ok(())
    }

    /// Whether this host currently has a parent.
    pub fn has_parent(&self) -> bool {
        self.inner.parent().is_some()
    }

    /// Non-owning handle to the parent, if any.
    pub fn parent(&self) -> Option<WeakHost> {
        self.inner.parent().map(|parent| parent.weak())
    }

    pub fn child_count(&self) -> usize {
        self.inner.children.borrow().len()
    }

    /// Non-owning handles to the children, in adoption order.
    pub fn children(&self) -> Vec<WeakHost> {
        self.inner
            .children
            .borrow()
            .iter()
            .map(Host::downgrade)
            .collect()
    }

    /// Whether `other` is this host's parent, grandparent, and so on.
    pub fn is_descendant_of(&self, other: &Host) -> bool {
        let mut ancestor = self.inner.parent();
        while let Some(current) = ancestor {
            if Rc::ptr_eq(&current, &other.inner) {
                return true;
            }
            ancestor = current.parent();
        }
        false
    }
}
