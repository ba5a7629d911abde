//! CLI commands

// Lifecycle
pub mod clone;
pub mod create;
pub mod mv;
pub mod rm;
pub mod update;

// Reads
pub mod cat;
pub mod list;
pub mod thumbnails;
pub mod tree;
pub mod version;
pub mod zip;
