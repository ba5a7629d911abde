//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Invalid value - malformed version string, owner or name
pub const INVALID_VALUE: i32 = 2;

/// Not found - unknown resource, file, revision or thumbnails
pub const NOT_FOUND: i32 = 3;

/// Requested version is newer than the latest one
pub const VERSION_NOT_FOUND: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Configuration file could not be loaded (sysexits.h EX_CONFIG)
pub const CONFIG_ERROR: i32 = 78;
