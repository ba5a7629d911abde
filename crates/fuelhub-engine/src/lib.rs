//! Fuelhub Engine - versioning and snapshots for hosted resources
//!
//! This crate maps client version numbers onto repository history and
//! builds everything served from it:
//! - Version resolution against each resource's genesis tag
//! - Zip snapshots cached per resource and version
//! - Hierarchical file trees
//! - Resource lifecycle (create, clone, replace content, remove, move)
//! - A SQLite catalog of resource records

pub mod catalog;
pub mod error;
pub mod hub;
pub mod lifecycle;
pub mod resolver;
pub mod snapshot;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::ResourceCatalog;
pub use error::{EngineError, ErrorKind, Result};
pub use hub::Hub;
pub use resolver::ResolvedVersion;
pub use snapshot::Snapshot;
