//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use charm_core::CharmConfig;

use crate::loaders::{ConfigLoader, LoadResult, SpellCatalog, SpellLoader};

/// Content factory that loads controller content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── spells.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Self::bundled_data_dir())
    }

    pub fn bundled_data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Load controller configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<CharmConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!("{} not found, using default config", path.display());
            return Ok(CharmConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellCatalog> {
        let path = self.data_dir.join("spells.ron");
        SpellLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
