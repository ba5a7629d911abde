//! Shared state for commands: configuration, engine and catalog

use std::path::PathBuf;
use std::sync::Arc;

use fuelhub_core::{HubConfig, ResourceRecord};
use fuelhub_engine::{Hub, ResourceCatalog};
use fuelhub_repo::GitBackend;
use tracing::debug;

use crate::error::{CliError, Result};

/// Command-line overrides applied on top of the configuration file
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub resource_dir: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

pub struct Context {
    pub hub: Hub,
    pub catalog: ResourceCatalog,
}

impl Context {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let mut config = match &overrides.config {
            Some(path) => HubConfig::load_from(path)?,
            None => HubConfig::load()?,
        };
        if let Some(dir) = &overrides.resource_dir {
            config.resource_dir = dir.clone();
        }
        if let Some(catalog) = &overrides.catalog {
            config.catalog_path = catalog.clone();
        }
        debug!(
            resource_dir = %config.resource_dir.display(),
            catalog = %config.catalog_path.display(),
            "loaded configuration"
        );

        let backend = GitBackend::new(config.committer.clone());
        let hub = Hub::new(config.resource_dir.clone(), Arc::new(backend));
        let catalog = ResourceCatalog::open_at(&config.catalog_path)?;

        Ok(Self { hub, catalog })
    }

    /// Live catalog record by UUID
    pub fn resource(&self, uuid: &str) -> Result<ResourceRecord> {
        self.catalog
            .get(uuid)?
            .ok_or_else(|| CliError::resource_not_found(uuid))
    }
}
