//! Fixed-length action bar of a controlled unit.
//!
//! The bar is split into three fixed sub-ranges (see [`CharmConfig`]):
//! commands at the start, spells in the middle, reactions at the end. Spell
//! placement only ever touches the spell sub-range; the outer ranges are
//! written by the layout initializers and by direct slot writes.

mod text;

pub use text::BarTextError;

use core::ops::Range;

use crate::button::{
    ACTION_ID_MASK, ActionButton, CommandToken, SpellId, SpellState, SpellStateRequest,
};
use crate::command::CommandState;
use crate::config::CharmConfig;
use crate::env::{SpellInfo, SpellOracle};
use crate::error::{CharmError, ErrorSeverity};

const SLOTS: usize = CharmConfig::MAX_ACTION_BAR_SLOTS;

/// Raw indices rejected by [`BarSlot::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("slot index {0} is outside the action bar (0..{SLOTS})")]
pub struct SlotIndexError(pub usize);

impl CharmError for SlotIndexError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Contract
    }

    fn error_code(&self) -> &'static str {
        "BAR_SLOT_OUT_OF_RANGE"
    }
}

/// Validated index of an action bar slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BarSlot(u8);

impl BarSlot {
    pub const fn new(index: usize) -> Result<Self, SlotIndexError> {
        if index < SLOTS {
            Ok(Self(index as u8))
        } else {
            Err(SlotIndexError(index))
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every slot in bar order.
    pub fn all() -> impl Iterator<Item = BarSlot> {
        (0..SLOTS as u8).map(Self)
    }

    /// Slot `offset` positions into the spell sub-range, wrapping around.
    pub const fn spell(offset: usize) -> Self {
        Self((CharmConfig::PET_SPELL_START + offset % CharmConfig::PET_SPELL_SLOTS) as u8)
    }

    pub const fn is_command_range(self) -> bool {
        self.index() < CharmConfig::PET_SPELL_START
    }

    pub const fn is_spell_range(self) -> bool {
        self.index() >= CharmConfig::PET_SPELL_START && self.index() < CharmConfig::PET_SPELL_END
    }

    pub const fn is_reaction_range(self) -> bool {
        self.index() >= CharmConfig::PET_SPELL_END
    }
}

impl TryFrom<usize> for BarSlot {
    type Error = SlotIndexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

/// Action bar store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionBar {
    slots: [ActionButton; SLOTS],
}

impl ActionBar {
    const COMMANDS: Range<usize> = CharmConfig::COMMAND_START..CharmConfig::PET_SPELL_START;
    const SPELLS: Range<usize> = CharmConfig::PET_SPELL_START..CharmConfig::PET_SPELL_END;
    const REACTIONS: Range<usize> = CharmConfig::PET_SPELL_END..CharmConfig::REACTION_END;

    /// Bar with every slot zeroed, as written when control begins.
    pub const fn cleared() -> Self {
        Self {
            slots: [ActionButton::CLEARED; SLOTS],
        }
    }

    /// Bar produced by [`Self::init_empty`].
    pub fn empty(with_attack: bool) -> Self {
        let mut bar = Self::cleared();
        bar.init_empty(with_attack);
        bar
    }

    /// Bar produced by [`Self::init_pet_layout`].
    pub fn pet_layout() -> Self {
        let mut bar = Self::cleared();
        bar.init_pet_layout();
        bar
    }

    pub const fn from_slots(slots: [ActionButton; SLOTS]) -> Self {
        Self { slots }
    }

    pub fn get(&self, slot: BarSlot) -> ActionButton {
        self.slots[slot.index()]
    }

    pub fn set(&mut self, slot: BarSlot, button: ActionButton) {
        self.slots[slot.index()] = button;
    }

    pub fn slots(&self) -> &[ActionButton; SLOTS] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (BarSlot, ActionButton)> + '_ {
        BarSlot::all().zip(self.slots.iter().copied())
    }

    /// Attack command (or nothing) in slot 0, every other slot empty.
    pub fn init_empty(&mut self, with_attack: bool) {
        self.slots[CharmConfig::COMMAND_START] = if with_attack {
            ActionButton::command(CommandState::Attack)
        } else {
            ActionButton::EMPTY
        };
        for slot in &mut self.slots[CharmConfig::COMMAND_START + 1..] {
            *slot = ActionButton::EMPTY;
        }
    }

    /// Standard pet bar: attack/follow/stay, four empty spell slots, then the
    /// aggressive/defensive/passive reactions.
    pub fn init_pet_layout(&mut self) {
        let attack = CommandState::Attack as u32;
        for (i, index) in Self::COMMANDS.enumerate() {
            self.slots[index] = ActionButton::Command(CommandToken(attack - i as u32));
        }
        for index in Self::SPELLS {
            self.slots[index] = ActionButton::EMPTY;
        }
        for (i, index) in Self::REACTIONS.enumerate() {
            self.slots[index] = ActionButton::Reaction(CommandToken(attack - i as u32));
        }
    }

    /// Places a spell in the spell sub-range.
    ///
    /// A lower rank of the same chain already on the bar is replaced in place
    /// and keeps its state. Otherwise the first free slot, scanning circularly
    /// from `preferred` (an offset into the spell sub-range), receives the
    /// spell. Returns false and leaves the bar untouched when no slot is free
    /// or the spell id does not fit the wire format.
    pub fn add_spell<S>(
        &mut self,
        spell: &SpellInfo,
        request: SpellStateRequest,
        preferred: usize,
        spells: &S,
    ) -> bool
    where
        S: SpellOracle + ?Sized,
    {
        if spell.id.0 > ACTION_ID_MASK {
            tracing::debug!("{} does not fit in a bar slot", spell.id);
            return false;
        }

        if let Some(index) = self.find_chain(spell.first_rank, spells) {
            if let ActionButton::Spell { spell: current, state } = self.slots[index] {
                tracing::debug!(
                    "slot {} upgraded from {} to {} ({})",
                    index,
                    current,
                    spell.id,
                    state
                );
                self.slots[index] = ActionButton::spell(spell.id, state);
                return true;
            }
        }

        let start = preferred % CharmConfig::PET_SPELL_SLOTS;
        for i in 0..CharmConfig::PET_SPELL_SLOTS {
            let index = BarSlot::spell(start + i).index();
            if self.slots[index].is_empty() {
                let state = request.resolve(spell.is_autocastable());
                tracing::debug!("{} placed in slot {} ({})", spell.id, index, state);
                self.slots[index] = ActionButton::spell(spell.id, state);
                return true;
            }
        }

        tracing::debug!("no free spell slot for {}", spell.id);
        false
    }

    /// Clears the spell-range slot holding any rank of `spell`'s chain.
    pub fn remove_spell<S>(&mut self, spell: SpellId, spells: &S) -> bool
    where
        S: SpellOracle + ?Sized,
    {
        let first_rank = spells.first_rank_in_chain(spell);
        match self.find_chain(first_rank, spells) {
            Some(index) => {
                tracing::debug!("{} removed from slot {}", spell, index);
                self.slots[index] = ActionButton::EMPTY;
                true
            }
            None => false,
        }
    }

    /// Sets the autocast state of every slot holding exactly `spell`.
    pub fn set_spell_autocast(&mut self, spell: SpellId, enable: bool) {
        for slot in &mut self.slots {
            if slot.spell_id() == Some(spell) {
                *slot = ActionButton::spell(spell, SpellState::autocast(enable));
            }
        }
    }

    /// Packed words in slot order, as sent to the client.
    pub fn serialize(&self) -> [u32; SLOTS] {
        self.slots.map(|slot| slot.packed())
    }

    /// Appends the packed words to an outbound packet body (little-endian).
    pub fn write_wire(&self, out: &mut Vec<u8>) {
        out.reserve(SLOTS * size_of::<u32>());
        for word in self.serialize() {
            out.extend_from_slice(&word.to_le_bytes());
        }
    }

    fn find_chain<S>(&self, first_rank: SpellId, spells: &S) -> Option<usize>
    where
        S: SpellOracle + ?Sized,
    {
        Self::SPELLS.into_iter().find(|&index| {
            self.slots[index]
                .spell_id()
                .is_some_and(|action| spells.first_rank_in_chain(action) == first_rank)
        })
    }
}

impl Default for ActionBar {
    fn default() -> Self {
        Self::cleared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ReactState;
    use crate::env::SpellAttributes;
    use crate::testing::SpellBook;

    const FIREBOLT_1: SpellId = SpellId(3110);
    const FIREBOLT_2: SpellId = SpellId(7799);
    const BITE: SpellId = SpellId(17_253);
    const CLAW: SpellId = SpellId(16_827);
    const GROWL: SpellId = SpellId(2649);
    const DASH: SpellId = SpellId(23_099);
    const SHELL: SpellId = SpellId(26_064);

    fn book() -> SpellBook {
        SpellBook::new()
            .with(SpellInfo::new(FIREBOLT_1, SpellAttributes::AUTOCASTABLE))
            .with(SpellInfo::ranked(
                FIREBOLT_2,
                FIREBOLT_1,
                SpellAttributes::AUTOCASTABLE,
            ))
            .with(SpellInfo::new(BITE, SpellAttributes::AUTOCASTABLE))
            .with(SpellInfo::new(CLAW, SpellAttributes::AUTOCASTABLE))
            .with(SpellInfo::new(GROWL, SpellAttributes::AUTOCASTABLE))
            .with(SpellInfo::new(DASH, SpellAttributes::empty()))
            .with(SpellInfo::new(SHELL, SpellAttributes::empty()))
    }

    fn info(book: &SpellBook, spell: SpellId) -> SpellInfo {
        book.spell_info(spell).unwrap()
    }

    #[test]
    fn slot_index_is_validated() {
        assert_eq!(BarSlot::new(9).map(BarSlot::index), Ok(9));
        assert_eq!(BarSlot::new(10), Err(SlotIndexError(10)));
        assert_eq!(BarSlot::try_from(3).unwrap(), BarSlot::spell(0));
        assert!(BarSlot::spell(0).is_spell_range());
        assert!(BarSlot::new(2).unwrap().is_command_range());
        assert!(BarSlot::new(7).unwrap().is_reaction_range());
    }

    #[test]
    fn empty_bar_with_and_without_attack() {
        let with = ActionBar::empty(true);
        assert_eq!(with.slots()[0], ActionButton::command(CommandState::Attack));
        assert!(with.slots()[1..].iter().all(|slot| *slot == ActionButton::EMPTY));

        let without = ActionBar::empty(false);
        assert!(without.slots().iter().all(|slot| *slot == ActionButton::EMPTY));
    }

    #[test]
    fn pet_layout_matches_client_expectations() {
        let bar = ActionBar::pet_layout();
        assert_eq!(
            bar.slots(),
            &[
                ActionButton::command(CommandState::Attack),
                ActionButton::command(CommandState::Follow),
                ActionButton::command(CommandState::Stay),
                ActionButton::EMPTY,
                ActionButton::EMPTY,
                ActionButton::EMPTY,
                ActionButton::EMPTY,
                ActionButton::reaction(ReactState::Aggressive),
                ActionButton::reaction(ReactState::Defensive),
                ActionButton::reaction(ReactState::Passive),
            ]
        );
    }

    #[test]
    fn decide_resolves_on_placement() {
        let book = book();
        let mut bar = ActionBar::pet_layout();

        assert!(bar.add_spell(&info(&book, BITE), SpellStateRequest::Decide, 0, &book));
        assert!(bar.add_spell(&info(&book, DASH), SpellStateRequest::Decide, 0, &book));

        assert_eq!(
            bar.get(BarSlot::spell(0)),
            ActionButton::spell(BITE, SpellState::Disabled)
        );
        assert_eq!(
            bar.get(BarSlot::spell(1)),
            ActionButton::spell(DASH, SpellState::Passive)
        );
    }

    #[test]
    fn higher_rank_replaces_lower_rank_in_place() {
        let book = book();
        let mut bar = ActionBar::pet_layout();
        bar.set(
            BarSlot::spell(2),
            ActionButton::spell(FIREBOLT_1, SpellState::Enabled),
        );

        assert!(bar.add_spell(
            &info(&book, FIREBOLT_2),
            SpellState::Passive.into(),
            0,
            &book
        ));

        assert_eq!(
            bar.get(BarSlot::spell(2)),
            ActionButton::spell(FIREBOLT_2, SpellState::Enabled)
        );
        assert_eq!(bar.get(BarSlot::spell(0)), ActionButton::EMPTY);
        assert_eq!(bar.slots().len(), CharmConfig::MAX_ACTION_BAR_SLOTS);
    }

    #[test]
    fn allocation_wraps_around_the_spell_range() {
        let book = book();
        let mut bar = ActionBar::pet_layout();
        bar.set(BarSlot::spell(0), ActionButton::spell(BITE, SpellState::Disabled));
        bar.set(BarSlot::spell(1), ActionButton::spell(CLAW, SpellState::Disabled));
        bar.set(BarSlot::spell(2), ActionButton::spell(GROWL, SpellState::Disabled));

        assert!(bar.add_spell(&info(&book, DASH), SpellStateRequest::Decide, 0, &book));
        assert_eq!(
            bar.get(BarSlot::spell(3)),
            ActionButton::spell(DASH, SpellState::Passive)
        );
    }

    #[test]
    fn allocation_starts_at_preferred_offset() {
        let book = book();
        let mut bar = ActionBar::pet_layout();
        bar.set(BarSlot::spell(2), ActionButton::spell(BITE, SpellState::Disabled));
        bar.set(BarSlot::spell(3), ActionButton::spell(CLAW, SpellState::Disabled));

        assert!(bar.add_spell(&info(&book, DASH), SpellStateRequest::Decide, 2, &book));
        assert_eq!(
            bar.get(BarSlot::spell(0)),
            ActionButton::spell(DASH, SpellState::Passive)
        );
    }

    #[test]
    fn full_spell_range_rejects_without_mutation() {
        let book = book();
        let mut bar = ActionBar::pet_layout();
        bar.set(BarSlot::spell(0), ActionButton::spell(BITE, SpellState::Disabled));
        bar.set(BarSlot::spell(1), ActionButton::spell(CLAW, SpellState::Enabled));
        bar.set(BarSlot::spell(2), ActionButton::spell(GROWL, SpellState::Disabled));
        bar.set(BarSlot::spell(3), ActionButton::spell(DASH, SpellState::Passive));
        let before = bar.serialize();

        assert!(!bar.add_spell(&info(&book, SHELL), SpellStateRequest::Decide, 1, &book));
        assert_eq!(bar.serialize(), before);
    }

    #[test]
    fn spells_never_land_outside_the_spell_range() {
        let book = book();
        let mut bar = ActionBar::empty(false);
        for spell in [BITE, CLAW, GROWL, DASH] {
            assert!(bar.add_spell(&info(&book, spell), SpellStateRequest::Decide, 0, &book));
        }
        assert!(!bar.add_spell(&info(&book, SHELL), SpellStateRequest::Decide, 0, &book));
        assert!(bar.iter().filter(|(slot, _)| !slot.is_spell_range()).all(
            |(_, button)| button == ActionButton::EMPTY
        ));
    }

    #[test]
    fn preferred_offset_is_reduced_before_scanning() {
        let book = book();
        let mut bar = ActionBar::pet_layout();

        assert!(bar.add_spell(&info(&book, BITE), SpellStateRequest::Decide, usize::MAX, &book));
        assert_eq!(
            bar.get(BarSlot::spell(usize::MAX % CharmConfig::PET_SPELL_SLOTS)),
            ActionButton::spell(BITE, SpellState::Disabled)
        );
    }

    #[test]
    fn spell_ids_wider_than_the_action_field_are_rejected() {
        let wide = SpellInfo::new(SpellId(ACTION_ID_MASK + 1), SpellAttributes::AUTOCASTABLE);
        let book = book().with(wide);
        let mut bar = ActionBar::pet_layout();
        bar.set(BarSlot::spell(1), ActionButton::spell(BITE, SpellState::Enabled));
        let before = bar;

        assert!(!bar.add_spell(&wide, SpellStateRequest::Decide, 0, &book));
        assert_eq!(bar, before);

        let mut reloaded = ActionBar::cleared();
        reloaded.load_from_text(&bar.to_text(), &book);
        assert_eq!(reloaded, before);
    }

    #[test]
    fn remove_matches_any_rank_of_the_chain() {
        let book = book();
        let mut bar = ActionBar::pet_layout();
        bar.set(
            BarSlot::spell(1),
            ActionButton::spell(FIREBOLT_2, SpellState::Enabled),
        );

        assert!(bar.remove_spell(FIREBOLT_1, &book));
        assert_eq!(bar.get(BarSlot::spell(1)), ActionButton::EMPTY);
        assert!(!bar.remove_spell(FIREBOLT_1, &book));
    }

    #[test]
    fn remove_ignores_command_slots_with_matching_numbers() {
        let book = book();
        let mut bar = ActionBar::pet_layout();
        assert!(!bar.remove_spell(SpellId(CommandState::Attack as u32), &book));
        assert_eq!(bar, ActionBar::pet_layout());
    }

    #[test]
    fn autocast_toggles_only_matching_spell_slots() {
        let mut bar = ActionBar::pet_layout();
        bar.set(BarSlot::spell(0), ActionButton::spell(BITE, SpellState::Disabled));
        bar.set(BarSlot::spell(1), ActionButton::spell(CLAW, SpellState::Disabled));
        bar.set(
            BarSlot::new(0).unwrap(),
            ActionButton::Command(CommandToken(BITE.0)),
        );

        bar.set_spell_autocast(BITE, true);

        assert_eq!(
            bar.get(BarSlot::spell(0)),
            ActionButton::spell(BITE, SpellState::Enabled)
        );
        assert_eq!(
            bar.get(BarSlot::spell(1)),
            ActionButton::spell(CLAW, SpellState::Disabled)
        );
        assert_eq!(
            bar.get(BarSlot::new(0).unwrap()),
            ActionButton::Command(CommandToken(BITE.0))
        );
    }

    #[test]
    fn serialize_emits_one_word_per_slot() {
        let bar = ActionBar::pet_layout();
        let words = bar.serialize();
        assert_eq!(words[0], 0x0380_0002);
        assert_eq!(words[3], 0x0080_0000);
        assert_eq!(words[9], 0x0300_0000);

        let mut packet = Vec::new();
        bar.write_wire(&mut packet);
        assert_eq!(packet.len(), 40);
        assert_eq!(&packet[..4], &[0x02, 0x00, 0x80, 0x03]);
    }
}
