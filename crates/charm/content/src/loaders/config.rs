//! Controller configuration loader.

use std::path::Path;

use charm_core::CharmConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for controller configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CharmConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CharmConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CharmConfig> {
        let config: CharmConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        tracing::debug!(
            "loaded charm config ({} possession exclusions)",
            config.possess_keep_bar_templates.len()
        );
        Ok(config)
    }
}
