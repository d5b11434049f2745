#![cfg(test)]

use std::rc::Rc;

use crate::component::Resolver;
use crate::host::Host;
use crate::tests::integration::common::{init_logging, setup_devices, Device, Logger, LoggerModule, Network};

#[test]
fn test_device_host_end_to_end() {
    init_logging();
    let host = Host::with_label("device-host", 0);
    let (logger, network_deleted) = setup_devices(&host);

    {
        let resolved = Resolver::<dyn Logger>::new(&host);
        assert!(resolved.is_valid());
        resolved.log("Initializing network...");

        let net = resolved.cast::<dyn Network>();
        assert!(net.is_valid());
        net.connect("127.0.0.1");
        assert!(net.is_connected());

        // The network module resolves the logger through its own host link.
        let back = Resolver::<dyn Logger>::new(&**net.get().unwrap());
        let expected: Rc<dyn Logger> = logger.clone();
        assert!(Rc::ptr_eq(back.get().unwrap(), &expected));
    }

    assert_eq!(
        *logger.lines.borrow(),
        vec!["[Logger] Initializing network...", "[Logger] Connecting to: 127.0.0.1"]
    );

    drop(host);

    assert!(network_deleted.get(), "Network deleter must run on teardown");
    assert!(!logger.disposed.get(), "Logger had no deleter and must not be disposed by the host");
    assert_eq!(Rc::strong_count(&logger), 1, "Test now holds the only handle to the logger");
    logger.disposed.set(true);
}

#[test]
fn test_manual_removal_of_logger() {
    init_logging();
    let host = Host::new(0);
    let (logger, network_deleted) = setup_devices(&host);

    let detached = host.detach::<dyn Logger>().expect("logger should detach");
    let expected: Rc<dyn Logger> = logger.clone();
    assert!(Rc::ptr_eq(&detached, &expected));
    drop(detached);
    drop(expected);

    let net = host.query::<dyn Network>().unwrap();
    net.connect("10.0.0.1");
    assert!(net.is_connected(), "Network keeps working without a logger");
    assert!(logger.lines.borrow().is_empty(), "Detached logger is no longer reachable");
    drop(net);

    drop(host);
    assert!(network_deleted.get());
    assert_eq!(Rc::strong_count(&logger), 1);
}

#[test]
fn test_child_host_devices_use_parent_logger() {
    init_logging();
    let root = Host::with_label("root", 0);
    let logger = Rc::new(LoggerModule::default());
    root.attach::<dyn Logger>(logger.clone()).unwrap();

    let child = Host::with_label("child", 0);
    root.add_child(&child).unwrap();
    child
        .attach::<dyn Network>(Rc::new(crate::tests::integration::common::NetworkModule::default()))
        .unwrap();
    drop(child);

    let children = root.children();
    let net = children[0].query::<dyn Network>().expect("network lives on the child host");
    assert_eq!(net.device_name(), "NetworkModule");
    net.connect("192.168.0.1");

    assert_eq!(*logger.lines.borrow(), vec!["[Logger] Connecting to: 192.168.0.1"]);
    assert!(root.query::<dyn Network>().is_none(), "Root cannot see the child's network");
}
