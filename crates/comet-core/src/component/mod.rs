//! # Comet Core Components
//!
//! Components come in two roles:
//!
//! - **Passive** components implement [`Component`] with the default
//!   [`host_link`](Component::host_link), which returns `None`. They never
//!   learn which host they live on.
//! - **Host-aware** components embed a [`HostLink`] and return it from
//!   `host_link`. [`Host::attach`](crate::host::Host::attach) binds the link,
//!   after which the component can resolve its siblings with a [`Resolver`].
//!
//! An interface is usually a trait with `Component` as a supertrait, so the
//! trait object itself satisfies the bounds `attach` needs:
//!
//! ```
//! use std::rc::Rc;
//! use comet_core::{Component, Host, HostLink, Interface, Resolver};
//!
//! trait Greeter: Component {
//!     fn greet(&self) -> String;
//! }
//! impl Interface for dyn Greeter {}
//!
//! trait Echo: Component {
//!     fn echo(&self) -> String;
//! }
//! impl Interface for dyn Echo {}
//!
//! struct English;
//! impl Component for English {}
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Parrot {
//!     link: HostLink,
//! }
//! impl Component for Parrot {
//!     fn host_link(&self) -> Option<&HostLink> {
//!         Some(&self.link)
//!     }
//! }
//! impl Echo for Parrot {
//!     fn echo(&self) -> String {
//!         let greeter = Resolver::<dyn Greeter>::new(self);
//!         greeter.get().map(|g| g.greet()).unwrap_or_default()
//!     }
//! }
//!
//! let host = Host::new(0);
//! host.attach::<dyn Greeter>(Rc::new(English)).ok();
//! host.attach::<dyn Echo>(Rc::new(Parrot::default())).ok();
//! let echo = host.query::<dyn Echo>().unwrap();
//! assert_eq!(echo.echo(), "hello");
//! ```
use std::cell::RefCell;
use std::fmt;

pub mod resolver;

pub use resolver::Resolver;

use crate::host::{Host, WeakHost};

/// Base role shared by every attachable component.
pub trait Component: 'static {
    /// The link a host binds on attach. Passive components keep the default.
    fn host_link(&self) -> Option<&HostLink> {
        None
    }
}

/// Back-reference from a host-aware component to the host it is attached to.
///
/// Holds a [`WeakHost`], so a component never keeps its host alive.
#[derive(Default)]
pub struct HostLink {
    host: RefCell<Option<WeakHost>>,
}

impl HostLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&self, host: WeakHost) {
        *self.host.borrow_mut() = Some(host);
    }

    /// Whether a host has bound this link and is still alive.
    pub fn is_bound(&self) -> bool {
        self.host.borrow().as_ref().is_some_and(WeakHost::is_alive)
    }

    pub fn host(&self) -> Option<WeakHost> {
        self.host.borrow().clone()
    }
}

impl fmt::Debug for HostLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostLink")
            .field("host", &*self.host.borrow())
            .finish()
    }
}

/// Anything that can lead to a host to query: a host, a weak host, a bound
/// [`HostLink`], or a host-aware component.
pub trait HostReachable {
    fn reach_host(&self) -> Option<WeakHost>;
}

impl HostReachable for Host {
    fn reach_host(&self) -> Option<WeakHost> {
        Some(self.downgrade())
    }
}

impl HostReachable for WeakHost {
    fn reach_host(&self) -> Option<WeakHost> {
        Some(self.clone())
    }
}

impl HostReachable for HostLink {
    fn reach_host(&self) -> Option<WeakHost> {
        self.host()
    }
}

impl<C: Component + ?Sized> HostReachable for C {
    fn reach_host(&self) -> Option<WeakHost> {
        self.host_link()?.host()
    }
}
