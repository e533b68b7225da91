//! Spell metadata oracle.
//!
//! The controller never owns spell data. It asks the oracle for the few
//! properties that drive slot allocation and autocast defaults.

use bitflags::bitflags;

use crate::button::SpellId;

bitflags! {
    /// Spell properties relevant to a controlled unit's action bar.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SpellAttributes: u8 {
        /// Always-on aura; applied to the caster instead of placed on the bar.
        const PASSIVE                   = 1 << 0;
        /// The creature may cast it on its own initiative.
        const AUTOCASTABLE              = 1 << 1;
        /// Casting requires an explicitly selected unit target.
        const NEEDS_EXPLICIT_TARGET     = 1 << 2;
        /// Must not be offered while the creature is charmed or possessed.
        const UNAVAILABLE_WHILE_CHARMED = 1 << 3;
    }
}

/// Metadata of one spell rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellInfo {
    pub id: SpellId,
    /// First rank of this spell's rank chain (the spell itself for unranked
    /// spells).
    pub first_rank: SpellId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: SpellAttributes,
}

impl SpellInfo {
    /// Creates metadata for an unranked spell.
    pub const fn new(id: SpellId, attributes: SpellAttributes) -> Self {
        Self {
            id,
            first_rank: id,
            attributes,
        }
    }

    /// Creates metadata for a rank whose chain starts at `first_rank`.
    pub const fn ranked(id: SpellId, first_rank: SpellId, attributes: SpellAttributes) -> Self {
        Self {
            id,
            first_rank,
            attributes,
        }
    }

    pub const fn is_passive(&self) -> bool {
        self.attributes.contains(SpellAttributes::PASSIVE)
    }

    pub const fn is_autocastable(&self) -> bool {
        self.attributes.contains(SpellAttributes::AUTOCASTABLE)
    }

    pub const fn needs_explicit_target(&self) -> bool {
        self.attributes
            .contains(SpellAttributes::NEEDS_EXPLICIT_TARGET)
    }

    pub const fn is_unavailable_while_charmed(&self) -> bool {
        self.attributes
            .contains(SpellAttributes::UNAVAILABLE_WHILE_CHARMED)
    }
}

/// Oracle providing spell metadata.
pub trait SpellOracle: Send + Sync {
    /// Returns the metadata of a spell, or `None` for unknown ids.
    fn spell_info(&self, spell: SpellId) -> Option<SpellInfo>;

    /// Returns the first rank of the spell's rank chain.
    ///
    /// Unknown ids are their own chain head.
    fn first_rank_in_chain(&self, spell: SpellId) -> SpellId {
        self.spell_info(spell)
            .map_or(spell, |info| info.first_rank)
    }
}
