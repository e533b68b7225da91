//! Spell catalog loader.

use std::collections::HashMap;
use std::path::Path;

use charm_core::button::ACTION_ID_MASK;
use charm_core::{SpellAttributes, SpellId, SpellInfo, SpellOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One spell rank as written in `spells.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellSpec {
    pub id: SpellId,
    #[serde(default)]
    pub name: String,
    /// Head of the rank chain; omitted for unranked spells and first ranks.
    #[serde(default)]
    pub first_rank: Option<SpellId>,
    #[serde(default)]
    pub attributes: SpellAttributes,
}

impl SpellSpec {
    pub fn info(&self) -> SpellInfo {
        SpellInfo::ranked(self.id, self.first_rank.unwrap_or(self.id), self.attributes)
    }
}

/// Spell catalog file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    spells: Vec<SpellSpec>,
}

/// In-memory spell metadata, keyed by spell id.
#[derive(Debug, Clone, Default)]
pub struct SpellCatalog {
    spells: HashMap<SpellId, SpellInfo>,
    names: HashMap<SpellId, String>,
}

impl SpellCatalog {
    /// Builds a catalog, rejecting duplicate ids, ids that do not fit an
    /// action bar slot and chains whose head is not itself in the catalog.
    pub fn from_specs(specs: Vec<SpellSpec>) -> LoadResult<Self> {
        let mut catalog = Self::default();

        for spec in &specs {
            if spec.id.is_none() {
                return Err(anyhow::anyhow!("Spell id 0 is reserved"));
            }
            for id in [Some(spec.id), spec.first_rank].into_iter().flatten() {
                if id.0 > ACTION_ID_MASK {
                    return Err(anyhow::anyhow!(
                        "Spell {} exceeds the largest action id {}",
                        id,
                        ACTION_ID_MASK
                    ));
                }
            }
            if catalog.spells.insert(spec.id, spec.info()).is_some() {
                return Err(anyhow::anyhow!("Duplicate spell {} in catalog", spec.id));
            }
            if !spec.name.is_empty() {
                catalog.names.insert(spec.id, spec.name.clone());
            }
        }

        for info in catalog.spells.values() {
            if !catalog.spells.contains_key(&info.first_rank) {
                return Err(anyhow::anyhow!(
                    "Spell {} names unknown first rank {}",
                    info.id,
                    info.first_rank
                ));
            }
        }

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Display name of a spell, if the catalog gave it one.
    pub fn name(&self, spell: SpellId) -> Option<&str> {
        self.names.get(&spell).map(String::as_str)
    }
}

impl SpellOracle for SpellCatalog {
    fn spell_info(&self, spell: SpellId) -> Option<SpellInfo> {
        self.spells.get(&spell).copied()
    }
}

/// Loader for spell catalogs from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load a spell catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        let catalog = SpellCatalog::from_specs(file.spells)?;
        tracing::debug!("loaded {} spells", catalog.len());
        Ok(catalog)
    }
}
