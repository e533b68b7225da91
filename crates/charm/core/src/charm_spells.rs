//! Innate spells of a charmed creature and their autocast state.
//!
//! The table mirrors the first [`CharmConfig::MAX_CHARM_SPELLS`] entries of
//! the creature's spell list. It is kept apart from the action bar so the
//! autocast state survives even when a spell never made it onto the bar.

use crate::button::{SpellId, SpellState};
use crate::config::CharmConfig;

/// One entry of the charm-spell table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharmSpell {
    pub spell: SpellId,
    pub state: SpellState,
}

impl CharmSpell {
    /// Entry written when control begins.
    pub const UNSET: Self = Self::new(SpellId::NONE, SpellState::Disabled);

    pub const fn new(spell: SpellId, state: SpellState) -> Self {
        Self { spell, state }
    }
}

impl Default for CharmSpell {
    fn default() -> Self {
        Self::UNSET
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharmSpellTable {
    entries: [CharmSpell; CharmConfig::MAX_CHARM_SPELLS],
}

impl CharmSpellTable {
    pub const fn new() -> Self {
        Self {
            entries: [CharmSpell::UNSET; CharmConfig::MAX_CHARM_SPELLS],
        }
    }

    pub fn get(&self, index: usize) -> Option<CharmSpell> {
        self.entries.get(index).copied()
    }

    pub fn entries(&self) -> &[CharmSpell; CharmConfig::MAX_CHARM_SPELLS] {
        &self.entries
    }

    /// Writes an entry. Only lifecycle initialization does this.
    pub(crate) fn set(&mut self, index: usize, entry: CharmSpell) {
        self.entries[index] = entry;
    }

    /// Sets the autocast state of every entry holding exactly `spell`.
    pub(crate) fn set_autocast(&mut self, spell: SpellId, enable: bool) {
        for entry in self.entries.iter_mut().filter(|entry| entry.spell == spell) {
            entry.state = SpellState::autocast(enable);
        }
    }
}

impl Default for CharmSpellTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_unset() {
        let table = CharmSpellTable::new();
        assert!(table.entries().iter().all(|entry| *entry == CharmSpell::UNSET));
        assert_eq!(table.get(CharmConfig::MAX_CHARM_SPELLS), None);
    }

    #[test]
    fn autocast_updates_every_matching_entry() {
        let mut table = CharmSpellTable::new();
        table.set(0, CharmSpell::new(SpellId(10), SpellState::Disabled));
        table.set(2, CharmSpell::new(SpellId(10), SpellState::Disabled));
        table.set(3, CharmSpell::new(SpellId(11), SpellState::Disabled));

        table.set_autocast(SpellId(10), true);

        assert_eq!(table.get(0).map(|e| e.state), Some(SpellState::Enabled));
        assert_eq!(table.get(2).map(|e| e.state), Some(SpellState::Enabled));
        assert_eq!(table.get(3).map(|e| e.state), Some(SpellState::Disabled));
    }
}
