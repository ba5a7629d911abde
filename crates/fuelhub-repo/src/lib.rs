//! Fuelhub Repository Store
//!
//! One version-controlled repository per resource, rooted at the resource's
//! location. This crate provides:
//!
//! - **`RepositoryStore`**: revision counting, tagging, tree walks, single
//!   file reads, zip export, full-tree replacement and local cloning
//! - **`GitBackend`**: the native backend built on libgit2
//! - **`MemoryBackend`**: an in-memory backend for tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use fuelhub_core::{CommitterIdentity, Revision};
//! use fuelhub_repo::{GitBackend, RepositoryFactory};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = GitBackend::new(CommitterIdentity::default());
//! let repo = backend.open(Path::new("/srv/fuel/alice/models/1234"));
//!
//! repo.init_repo()?;
//! repo.tag("1234")?;
//! let commits = repo.revision_count(&Revision::Tip)?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod error;
pub mod fs;
pub mod git;
pub mod memory;
pub mod store;
pub mod walk;

pub use error::{RepoError, Result};
pub use git::{GitBackend, GitRepository, TRUNK};
pub use memory::{MemoryBackend, MemoryRepository, OperationCounts};
pub use store::{RepositoryFactory, RepositoryStore, WalkEntry};
