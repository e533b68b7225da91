//! Inspector configuration.
use std::env;
use std::path::PathBuf;

use charm_content::ContentFactory;

#[derive(Clone, Debug)]
pub struct InspectConfig {
    /// Directory holding `config.toml` and `spells.ron`.
    pub data_dir: PathBuf,
    /// Print the little-endian wire payload after the slot table.
    pub show_wire: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            data_dir: ContentFactory::bundled_data_dir(),
            show_wire: true,
        }
    }
}

impl InspectConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CHARM_DATA_DIR` - Content directory (default: bundled `charm-content` data)
    /// - `CHARM_SHOW_WIRE` - Print the wire payload (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("CHARM_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(show) = read_env::<bool>("CHARM_SHOW_WIRE") {
            config.show_wire = show;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
