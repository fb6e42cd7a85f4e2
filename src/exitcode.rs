//! Standard exit codes (BSD sysexits.h compatible)

/// Data format error (invalid scenario)
pub const DATAERR: i32 = 65;

/// Cannot open input (scenario file missing)
pub const NOINPUT: i32 = 66;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
