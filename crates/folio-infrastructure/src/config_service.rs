//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/folio/config.toml) and applies
//! `FOLIO_*` environment overrides on top of it.

use crate::paths::FolioPaths;
use folio_core::config::{RootConfig, StoreBackend};
use folio_core::error::{FolioError, Result};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Looks up an environment variable by name.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Configuration service that loads and caches the root configuration.
///
/// A missing config file is created with the defaults on first load.
#[derive(Clone)]
pub struct ConfigService {
    paths: FolioPaths,
    env: EnvLookup,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the process environment.
    pub fn new(paths: FolioPaths) -> Self {
        Self::with_env(paths, Arc::new(|key: &str| std::env::var(key).ok()))
    }

    pub fn with_env(paths: FolioPaths, env: EnvLookup) -> Self {
        Self {
            paths,
            env,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn paths(&self) -> &FolioPaths {
        &self.paths
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let mut loaded = self.load_config()?;
        apply_env_overrides(&mut loaded, self.env.as_ref())?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        self.paths.config_file()
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            let defaults = RootConfig::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, toml::to_string_pretty(&defaults)?)?;
            tracing::info!("Created default configuration at {}", path.display());
            return Ok(defaults);
        }

        let content = std::fs::read_to_string(&path)?;
        let config: RootConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Directory of the json_dir document store.
    pub fn documents_dir(&self, config: &RootConfig) -> Result<PathBuf> {
        match &config.store.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => self.paths.documents_dir(),
        }
    }

    pub fn objects_dir(&self, config: &RootConfig) -> Result<PathBuf> {
        match &config.storage.objects_dir {
            Some(dir) => Ok(dir.clone()),
            None => self.paths.objects_dir(),
        }
    }

    pub fn outbox_dir(&self, config: &RootConfig) -> Result<PathBuf> {
        match &config.contact.outbox_dir {
            Some(dir) => Ok(dir.clone()),
            None => self.paths.outbox_dir(),
        }
    }
}

/// Applies `FOLIO_*` variables over file values.
pub fn apply_env_overrides(
    config: &mut RootConfig,
    env: &(dyn Fn(&str) -> Option<String> + Send + Sync),
) -> Result<()> {
    if let Some(profile_id) = env("FOLIO_PROFILE_ID") {
        config.profile_id = profile_id;
    }
    if let Some(level) = env("FOLIO_LOG_LEVEL") {
        config.log_level = level;
    }
    if let Some(backend) = env("FOLIO_STORE_BACKEND") {
        config.store.backend = match backend.as_str() {
            "memory" => StoreBackend::Memory,
            "json_dir" => StoreBackend::JsonDir,
            other => {
                return Err(FolioError::config(format!(
                    "FOLIO_STORE_BACKEND must be 'memory' or 'json_dir', got '{other}'"
                )));
            }
        };
    }
    if let Some(dir) = env("FOLIO_DATA_DIR") {
        config.store.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(dir) = env("FOLIO_OBJECTS_DIR") {
        config.storage.objects_dir = Some(PathBuf::from(dir));
    }
    if let Some(url) = env("FOLIO_PUBLIC_BASE_URL") {
        config.storage.public_base_url = url;
    }
    if let Some(recipient) = env("FOLIO_CONTACT_RECIPIENT") {
        config.contact.recipient = recipient;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(vars: &[(&str, &str)]) -> EnvLookup {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(move |key: &str| map.get(key).cloned())
    }

    #[test]
    fn test_creates_default_file_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_env(FolioPaths::new(Some(temp_dir.path())), env_of(&[]));

        let config = service.get_config().unwrap();
        assert_eq!(config, RootConfig::default());
        assert!(service.config_path().unwrap().exists());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FolioPaths::new(Some(temp_dir.path()));
        std::fs::create_dir_all(paths.config_dir().unwrap()).unwrap();
        std::fs::write(
            paths.config_file().unwrap(),
            "profile_id = \"from-file\"\n[store]\nbackend = \"json_dir\"\n",
        )
        .unwrap();

        let service = ConfigService::with_env(
            paths,
            env_of(&[("FOLIO_STORE_BACKEND", "memory"), ("FOLIO_LOG_LEVEL", "debug")]),
        );
        let config = service.get_config().unwrap();
        assert_eq!(config.profile_id, "from-file");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_backend_is_config_error() {
        let mut config = RootConfig::default();
        let env = env_of(&[("FOLIO_STORE_BACKEND", "postgres")]);
        let err = apply_env_overrides(&mut config, env.as_ref()).unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn test_cache_is_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FolioPaths::new(Some(temp_dir.path()));
        let service = ConfigService::with_env(paths.clone(), env_of(&[]));
        service.get_config().unwrap();

        std::fs::write(paths.config_file().unwrap(), "profile_id = \"changed\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().profile_id, "main-profile");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().profile_id, "changed");
    }
}
