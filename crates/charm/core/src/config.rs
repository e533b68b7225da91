use std::collections::BTreeSet;

use crate::env::{ConfigOracle, TemplateId};

/// Controller configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharmConfig {
    /// Creature templates whose possession bar must not receive the default
    /// attack command. Their bar keeps the all-empty constructed layout and
    /// only gains the creature's own spells.
    pub possess_keep_bar_templates: BTreeSet<TemplateId>,
}

impl CharmConfig {
    // ===== compile-time layout of the action bar =====
    /// Total number of slots on a controlled unit's action bar.
    pub const MAX_ACTION_BAR_SLOTS: usize = 10;
    /// First slot of the command sub-range.
    pub const COMMAND_START: usize = 0;
    /// First slot of the spell sub-range (end of the command sub-range).
    pub const PET_SPELL_START: usize = 3;
    /// End of the spell sub-range (start of the reaction sub-range).
    pub const PET_SPELL_END: usize = 7;
    /// End of the reaction sub-range.
    pub const REACTION_END: usize = Self::MAX_ACTION_BAR_SLOTS;
    /// Number of slots in the spell sub-range.
    pub const PET_SPELL_SLOTS: usize = Self::PET_SPELL_END - Self::PET_SPELL_START;

    /// Number of innate creature spells mirrored into the charm-spell table.
    pub const MAX_CHARM_SPELLS: usize = 4;
    /// Size of a creature's innate spell list.
    pub const MAX_CREATURE_SPELLS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POSSESS_KEEP_BAR_TEMPLATES: [u32; 5] = [
        23575, // Mindless Abomination
        24783, // Trained Rock Falcon
        27664, // Crashin' Thrashin' Racer
        40281, // Crashin' Thrashin' Racer
        28511, // Eye of Acherus
    ];

    pub fn new() -> Self {
        Self::with_possess_keep_bar_templates(
            Self::DEFAULT_POSSESS_KEEP_BAR_TEMPLATES
                .into_iter()
                .map(TemplateId),
        )
    }

    pub fn with_possess_keep_bar_templates(templates: impl IntoIterator<Item = TemplateId>) -> Self {
        Self {
            possess_keep_bar_templates: templates.into_iter().collect(),
        }
    }
}

impl Default for CharmConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigOracle for CharmConfig {
    fn keeps_bar_on_possess(&self, template: TemplateId) -> bool {
        self.possess_keep_bar_templates.contains(&template)
    }
}
