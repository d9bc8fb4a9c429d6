//! Unified path management for folio files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/folio/             # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/folio/        # Data directory
//! ├── documents/               # One folder per collection (json_dir store)
//! │   └── projects/
//! │       └── <id>.json
//! ├── objects/                 # Uploaded images (local object storage)
//! └── outbox/                  # Relayed contact emails
//! ```
//!
//! Passing a base directory to [`FolioPaths::new`] places both trees under
//! it, which is how tests isolate their files.

use folio_core::error::{FolioError, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "folio";

/// Resolves folio's configuration and data locations.
#[derive(Debug, Clone, Default)]
pub struct FolioPaths {
    base_dir: Option<PathBuf>,
}

impl FolioPaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the folio configuration directory (e.g. `~/.config/folio/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_NAME))
                .ok_or_else(|| FolioError::config("Cannot find config directory")),
        }
    }

    /// Returns the folio data directory (e.g. `~/.local/share/folio/`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_NAME))
                .ok_or_else(|| FolioError::config("Cannot find data directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn documents_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("documents"))
    }

    pub fn objects_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("objects"))
    }

    pub fn outbox_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("outbox"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = FolioPaths::new(Some(Path::new("/tmp/folio-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/folio-test/config/config.toml")
        );
        assert_eq!(
            paths.objects_dir().unwrap(),
            PathBuf::from("/tmp/folio-test/data/objects")
        );
    }
}
