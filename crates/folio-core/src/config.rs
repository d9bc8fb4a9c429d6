//! Root configuration for a Folio deployment.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! section has defaults, so an empty file is a valid configuration.

use crate::image::DEFAULT_MAX_IMAGE_BYTES;
use crate::profile::DEFAULT_PROFILE_ID;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RootConfig {
    /// Well-known id of the singleton profile document.
    pub profile_id: String,
    pub log_level: String,
    pub store: StoreConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub contact: ContactConfig,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            profile_id: DEFAULT_PROFILE_ID.to_string(),
            log_level: "info".to_string(),
            store: StoreConfig::default(),
            storage: StorageConfig::default(),
            sync: SyncConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Volatile store, lost on exit.
    Memory,
    /// One JSON file per document under `data_dir`.
    #[default]
    JsonDir,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform directory for uploaded objects.
    pub objects_dir: Option<PathBuf>,
    /// Prefix of the references returned by uploads.
    pub public_base_url: String,
    pub max_image_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            objects_dir: None,
            public_base_url: "http://localhost:8080/objects".to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Pending skill sync jobs kept before new ones are dropped.
    pub queue_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContactConfig {
    pub recipient: String,
    /// Overrides the platform directory for relayed emails.
    pub outbox_dir: Option<PathBuf>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "owner@localhost".to_string(),
            outbox_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.profile_id, "main-profile");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
            profile_id = "alt"

            [store]
            backend = "memory"

            [sync]
            queue_capacity = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.profile_id, "alt");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.sync.queue_capacity, 4);
        assert_eq!(config.storage.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
    }
}
