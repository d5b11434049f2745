
#[cfg(test)]
mod tests {
    use crate::constants::DEFAULT_TABLE_CAPACITY;
    use crate::host::Host;

    #[test]
    fn test_new_host_defaults() {
        let host = Host::new(0);
        assert_eq!(host.label(), "host");
        assert_eq!(host.ref_count(), 1);
        assert!(host.is_empty());
        assert_eq!(host.child_count(), 0);
        assert!(!host.has_parent());
        assert_eq!(host.pending_actions(), 0);
        assert_eq!(DEFAULT_TABLE_CAPACITY, 64);
    }

    #[test]
    fn test_labelled_host() {
        let host = Host::with_label("device", 8);
        assert_eq!(host.label(), "device");
        let debug = format!("{:?}", host);
        assert!(debug.contains("device"), "Debug output should include the label: {}", debug);
    }
}
