#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::component::{Component, HostLink, Resolver};
use crate::host::Host;
use crate::identity::Interface;

/// Installs a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ===== SAMPLE DEVICES =====

pub trait Device: Component {
    fn device_name(&self) -> &'static str;
}

pub trait Logger: Device {
    fn log(&self, message: &str);
}
impl Interface for dyn Logger {}

pub trait Network: Device {
    fn connect(&self, address: &str);
    fn is_connected(&self) -> bool;
}
impl Interface for dyn Network {}

/// Passive logger that keeps every line it is given.
#[derive(Default)]
pub struct LoggerModule {
    pub lines: RefCell<Vec<String>>,
    pub disposed: Cell<bool>,
}

impl Component for LoggerModule {}

impl Device for LoggerModule {
    fn device_name(&self) -> &'static str {
        "LoggerModule"
    }
}

impl Logger for LoggerModule {
    fn log(&self, message: &str) {
        self.lines.borrow_mut().push(format!("[Logger] {}", message));
    }
}

/// Host-aware network module that reports through whatever logger its host
/// provides.
#[derive(Default)]
pub struct NetworkModule {
    link: HostLink,
    connected: Cell<bool>,
}

impl Component for NetworkModule {
    fn host_link(&self) -> Option<&HostLink> {
        Some(&self.link)
    }
}

impl Device for NetworkModule {
    fn device_name(&self) -> &'static str {
        "NetworkModule"
    }
}

impl Network for NetworkModule {
    fn connect(&self, address: &str) {
        self.connected.set(true);
        let logger = Resolver::<dyn Logger>::new(self);
        if logger.is_valid() {
            logger.log(&format!("Connecting to: {}", address));
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }
}

/// Attaches both sample devices. The network module is disposed of by the
/// host; the logger stays the caller's responsibility. Returns the logger and
/// a flag raised by the network module's deleter.
pub fn setup_devices(host: &Host) -> (Rc<LoggerModule>, Rc<Cell<bool>>) {
    let logger = Rc::new(LoggerModule::default());
    host.attach::<dyn Logger>(logger.clone())
        .expect("logger should attach to a fresh host");

    let network_deleted = Rc::new(Cell::new(false));
    let flag = Rc::clone(&network_deleted);
    host.attach_with_deleter::<dyn Network>(Rc::new(NetworkModule::default()), move |network| {
        log::debug!("Disposing {}", network.device_name());
        flag.set(true);
    })
    .expect("network should attach to a fresh host");

    (logger, network_deleted)
}
