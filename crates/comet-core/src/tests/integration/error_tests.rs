#![cfg(test)]

use std::error::Error as StdError;
use std::rc::Rc;

use crate::config::{ConfigError, ConfigFormat, HostConfig};
use crate::error::{Error, Result};
use crate::host::{Host, HostError};
use crate::identity::TypeIdentity;
use crate::tests::integration::common::{init_logging, Logger, LoggerModule};

fn attach_twice(host: &Host) -> Result<()> {
    host.attach::<dyn Logger>(Rc::new(LoggerModule::default()))?;
    host.attach::<dyn Logger>(Rc::new(LoggerModule::default()))?;
    Ok(())
}

#[test]
fn test_attach_error_converts_to_host_error() {
    init_logging();
    let host = Host::with_label("errors", 0);

    match attach_twice(&host) {
        Err(Error::Host(HostError::DuplicateInterface { host, .. })) => assert_eq!(host, "errors"),
        other => panic!("Expected duplicate interface error, got {:?}", other),
    }
    assert_eq!(host.len(), 1);
}

#[test]
fn test_host_error_conversion_and_display() {
    let hierarchy = || -> Result<()> {
        let host = Host::with_label("loop", 0);
        host.add_child(&host)?;
        Ok(())
    };
    let err = hierarchy().unwrap_err();
    assert!(matches!(err, Error::Host(HostError::SelfChild { .. })));
    assert_eq!(err.to_string(), "Host error: Host 'loop' cannot be added as its own child");
}

#[test]
fn test_identity_error_conversion() {
    let build = || -> Result<TypeIdentity> { Ok(TypeIdentity::from_raw(0, "dyn Zero")?) };
    let err = build().unwrap_err();
    assert!(matches!(err, Error::Identity(_)));
    assert!(err.to_string().contains("dyn Zero"));
}

#[test]
fn test_config_error_keeps_source() {
    let err: Error = HostConfig::parse("{ not json", ConfigFormat::Json).unwrap_err().into();
    match &err {
        Error::Config(ConfigError::Deserialization { format, .. }) => assert_eq!(format, "json"),
        other => panic!("Expected deserialization error, got {:?}", other),
    }
    assert!(err.source().is_some(), "Config variant exposes the parser error");
}

#[test]
fn test_invalid_config_rejected_by_host() {
    let config = HostConfig {
        label: "   ".to_string(),
        capacity_hint: 0,
    };
    let err = Host::with_config(&config).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Invalid { ref field, .. }) if field == "label"));
}
