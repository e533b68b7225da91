//! In-crate fakes for unit tests.

use std::collections::HashMap;

use crate::button::SpellId;
use crate::command::ReactState;
use crate::env::{
    ControlledUnit, MovementDestination, SpellInfo, SpellOracle, TemplateId, TransportFrame,
};

#[derive(Default)]
pub struct SpellBook {
    spells: HashMap<SpellId, SpellInfo>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, info: SpellInfo) -> Self {
        self.spells.insert(info.id, info);
        self
    }
}

impl SpellOracle for SpellBook {
    fn spell_info(&self, spell: SpellId) -> Option<SpellInfo> {
        self.spells.get(&spell).copied()
    }
}

pub struct FakeUnit {
    pub player: bool,
    pub template: TemplateId,
    pub spells: Vec<SpellId>,
    pub react: ReactState,
    pub self_casts: Vec<SpellId>,
    pub destination: MovementDestination,
    pub transport: Option<Box<dyn TransportFrame>>,
    pub client_pet_number: Option<u32>,
}

impl FakeUnit {
    pub fn creature(template: u32) -> Self {
        Self {
            player: false,
            template: TemplateId(template),
            spells: Vec::new(),
            react: ReactState::Aggressive,
            self_casts: Vec::new(),
            destination: MovementDestination::default(),
            transport: None,
            client_pet_number: None,
        }
    }

    pub fn player() -> Self {
        Self {
            player: true,
            template: TemplateId(0),
            ..Self::creature(0)
        }
    }
}

impl ControlledUnit for FakeUnit {
    fn is_player_controlled(&self) -> bool {
        self.player
    }

    fn template_id(&self) -> TemplateId {
        self.template
    }

    fn innate_spells(&self) -> &[SpellId] {
        &self.spells
    }

    fn react_state(&self) -> ReactState {
        self.react
    }

    fn set_react_state(&mut self, state: ReactState) {
        self.react = state;
    }

    fn cast_on_self(&mut self, spell: SpellId) {
        self.self_casts.push(spell);
    }

    fn movement_destination(&self) -> MovementDestination {
        self.destination
    }

    fn transport(&self) -> Option<&dyn TransportFrame> {
        self.transport.as_deref()
    }

    fn set_pet_number_for_client(&mut self, pet_number: u32) {
        self.client_pet_number = Some(pet_number);
    }
}
