/// Interface table capacity used when a host is created with a hint of `0`
pub const DEFAULT_TABLE_CAPACITY: usize = 64;

/// Label given to hosts created without one
pub const DEFAULT_HOST_LABEL: &str = "host";
