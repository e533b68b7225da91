//! Lifecycle controller for a charmed, possessed or pet unit.
//!
//! [`CharmInfo`] lives exactly as long as the control relationship. Creating
//! it suspends the unit's own reactivity; [`CharmInfo::restore_state`] hands
//! it back when control ends. In between, one of the three initialization
//! policies fills the action bar, after which command handlers and spell
//! learn/unlearn events mutate it.
//!
//! The controlled unit is never stored. Every operation that needs it
//! borrows it for the duration of the call.

use arrayvec::ArrayVec;

use crate::bar::{ActionBar, BarSlot};
use crate::button::{ActionButton, SpellId, SpellState, SpellStateRequest};
use crate::charm_spells::{CharmSpell, CharmSpellTable};
use crate::command::{CommandTracker, ReactState};
use crate::config::CharmConfig;
use crate::env::{CharmEnv, ControlledUnit, SpellInfo, SpellOracle};

/// Action bar and command state of one controlled unit.
#[derive(Clone, Debug, PartialEq)]
pub struct CharmInfo {
    bar: ActionBar,
    charm_spells: CharmSpellTable,
    commands: CommandTracker,
    pet_number: u32,
    old_react_state: ReactState,
}

impl CharmInfo {
    /// Takes control of `unit`.
    ///
    /// Creatures are switched to passive reactivity; their previous mode is
    /// remembered for [`Self::restore_state`].
    pub fn new(unit: &mut dyn ControlledUnit) -> Self {
        let mut old_react_state = ReactState::Passive;
        if !unit.is_player_controlled() {
            old_react_state = unit.react_state();
            unit.set_react_state(ReactState::Passive);
            tracing::debug!(
                "{} suspended reactivity {}",
                unit.template_id(),
                old_react_state
            );
        }

        Self {
            bar: ActionBar::cleared(),
            charm_spells: CharmSpellTable::new(),
            commands: CommandTracker::new(),
            pet_number: 0,
            old_react_state,
        }
    }

    /// Gives the unit its reactivity back. Call when control ends.
    pub fn restore_state(&self, unit: &mut dyn ControlledUnit) {
        if !unit.is_player_controlled() {
            unit.set_react_state(self.old_react_state);
        }
    }

    /// Reactivity mode the unit had before control began.
    pub fn old_react_state(&self) -> ReactState {
        self.old_react_state
    }

    pub fn init_empty_action_bar(&mut self, with_attack: bool) {
        self.bar.init_empty(with_attack);
    }

    pub fn init_pet_action_bar(&mut self) {
        self.bar.init_pet_layout();
    }

    /// Fills the bar of a possessed unit.
    ///
    /// Active innate spells go on the bar as manual-use buttons; passive ones
    /// are applied to the unit instead.
    pub fn init_possess_create_spells(
        &mut self,
        unit: &mut dyn ControlledUnit,
        env: &CharmEnv<'_>,
    ) {
        if unit.is_player_controlled() {
            self.bar.init_empty(true);
            return;
        }

        let template = unit.template_id();
        if env.config().keeps_bar_on_possess(template) {
            tracing::debug!("{} keeps its bare possession bar", template);
        } else {
            self.bar.init_empty(true);
        }

        let innate: ArrayVec<SpellId, { CharmConfig::MAX_CREATURE_SPELLS }> = unit
            .innate_spells()
            .iter()
            .copied()
            .take(CharmConfig::MAX_CREATURE_SPELLS)
            .collect();

        for (index, spell) in innate.into_iter().enumerate() {
            if spell.is_none() {
                continue;
            }
            let Some(info) = env.spells().spell_info(spell) else {
                continue;
            };
            if info.is_unavailable_while_charmed() {
                continue;
            }

            if info.is_passive() {
                unit.cast_on_self(info.id);
            } else {
                self.bar.add_spell(
                    &info,
                    SpellState::Passive.into(),
                    index % CharmConfig::PET_SPELL_SLOTS,
                    env.spells(),
                );
            }
        }
    }

    /// Fills the bar and charm-spell table of a charmed creature or pet.
    pub fn init_charm_create_spells(
        &mut self,
        unit: &mut dyn ControlledUnit,
        env: &CharmEnv<'_>,
    ) {
        if unit.is_player_controlled() {
            // Players have no innate spellbook to offer.
            self.bar.init_empty(false);
            return;
        }

        self.bar.init_pet_layout();

        for index in 0..CharmConfig::MAX_CHARM_SPELLS {
            let spell = unit
                .innate_spells()
                .get(index)
                .copied()
                .unwrap_or(SpellId::NONE);

            let Some(info) = env.spells().spell_info(spell) else {
                self.charm_spells
                    .set(index, CharmSpell::new(spell, SpellState::Disabled));
                continue;
            };
            if info.is_unavailable_while_charmed() {
                continue;
            }

            if info.is_passive() {
                unit.cast_on_self(info.id);
                self.charm_spells
                    .set(index, CharmSpell::new(spell, SpellState::Passive));
                continue;
            }

            self.charm_spells
                .set(index, CharmSpell::new(spell, SpellState::Disabled));

            let state = if !info.is_autocastable() {
                SpellState::Passive
            } else if info.needs_explicit_target() {
                SpellState::Enabled
            } else {
                // Autocast stays off until the player enables it.
                SpellState::Disabled
            };

            self.bar.add_spell(&info, state.into(), 0, env.spells());
            if state == SpellState::Enabled {
                self.charm_spells.set_autocast(info.id, true);
            }
        }
    }

    /// See [`ActionBar::add_spell`].
    pub fn add_spell_to_action_bar<S>(
        &mut self,
        spell: &SpellInfo,
        request: SpellStateRequest,
        preferred: usize,
        spells: &S,
    ) -> bool
    where
        S: SpellOracle + ?Sized,
    {
        self.bar.add_spell(spell, request, preferred, spells)
    }

    /// See [`ActionBar::remove_spell`].
    pub fn remove_spell_from_action_bar<S>(&mut self, spell: SpellId, spells: &S) -> bool
    where
        S: SpellOracle + ?Sized,
    {
        self.bar.remove_spell(spell, spells)
    }

    /// Places a newly learned spell, letting the allocator pick its state.
    ///
    /// Returns false for unknown spells and when the bar is full.
    pub fn learn_spell<S>(&mut self, spell: SpellId, preferred: usize, spells: &S) -> bool
    where
        S: SpellOracle + ?Sized,
    {
        match spells.spell_info(spell) {
            Some(info) => self
                .bar
                .add_spell(&info, SpellStateRequest::Decide, preferred, spells),
            None => false,
        }
    }

    /// Clears any rank of a forgotten spell from the bar.
    ///
    /// Returns false for unknown spells and when no rank was on the bar.
    pub fn unlearn_spell<S>(&mut self, spell: SpellId, spells: &S) -> bool
    where
        S: SpellOracle + ?Sized,
    {
        if spells.spell_info(spell).is_none() {
            return false;
        }
        self.bar.remove_spell(spell, spells)
    }

    /// Switches autocast for `spell` on the bar and in the charm-spell table.
    /// Passive spells are ignored.
    pub fn toggle_autocast(&mut self, spell: &SpellInfo, enable: bool) {
        if spell.is_passive() {
            return;
        }
        self.bar.set_spell_autocast(spell.id, enable);
        self.charm_spells.set_autocast(spell.id, enable);
    }

    pub fn set_action_bar(&mut self, slot: BarSlot, button: ActionButton) {
        self.bar.set(slot, button);
    }

    pub fn action_bar_entry(&self, slot: BarSlot) -> ActionButton {
        self.bar.get(slot)
    }

    pub fn action_bar(&self) -> &ActionBar {
        &self.bar
    }

    pub fn charm_spell(&self, index: usize) -> Option<CharmSpell> {
        self.charm_spells.get(index)
    }

    pub fn charm_spells(&self) -> &CharmSpellTable {
        &self.charm_spells
    }

    /// Packed bar words for the pet spells packet.
    pub fn build_action_bar(&self) -> [u32; CharmConfig::MAX_ACTION_BAR_SLOTS] {
        self.bar.serialize()
    }

    pub fn write_action_bar(&self, out: &mut Vec<u8>) {
        self.bar.write_wire(out);
    }

    pub fn save_action_bar(&self) -> String {
        self.bar.to_text()
    }

    /// See [`ActionBar::load_from_text`].
    pub fn load_action_bar<S>(&mut self, text: &str, spells: &S)
    where
        S: SpellOracle + ?Sized,
    {
        self.bar.load_from_text(text, spells);
    }

    /// Stores the pet number and publishes it to the client; units without
    /// a stat window publish 0.
    pub fn set_pet_number(
        &mut self,
        unit: &mut dyn ControlledUnit,
        pet_number: u32,
        stat_window: bool,
    ) {
        self.pet_number = pet_number;
        unit.set_pet_number_for_client(if stat_window { pet_number } else { 0 });
    }

    pub fn pet_number(&self) -> u32 {
        self.pet_number
    }

    pub fn commands(&self) -> &CommandTracker {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandTracker {
        &mut self.commands
    }
}
