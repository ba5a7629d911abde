//! Fuelhub Core - Core types for versioned simulation resources
//!
//! This crate provides the foundational types used throughout fuelhub:
//! - `Resource`: The capability surface every hosted resource exposes
//! - `Layout`: Where resource repositories and zip snapshots live on disk
//! - `Revision` / `VersionSpec`: The two addressing schemes (VCS vs. client)
//! - `FileTree`: Hierarchical file listing returned to clients
//! - `HubConfig`: YAML configuration

pub mod config;
pub mod error;
pub mod layout;
pub mod resource;
pub mod tree;
pub mod version;

pub use config::{CommitterIdentity, HubConfig};
pub use error::{CoreError, Result};
pub use layout::{Layout, ZIPS_FOLDER};
pub use resource::{Resource, ResourceKind, ResourceRecord};
pub use tree::{FileNode, FileTree};
pub use version::{Revision, VersionSpec};
