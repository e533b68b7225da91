//! Controlled-unit collaborator interface.
//!
//! The controller does not own the unit it governs. Operations that need the
//! unit borrow it for the duration of the call through [`ControlledUnit`],
//! which exposes only the facets the controller touches: reactivity, innate
//! spells, self-casting, planned movement and the client-visible pet number.

use core::fmt;

use crate::button::SpellId;
use crate::command::ReactState;

/// Creature template (entry) identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template#{}", self.0)
    }
}

/// World-space point (or platform-local before transformation).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn to_tuple(self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }
}

/// Final point of the unit's current movement plan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementDestination {
    pub position: WorldPosition,
    /// Set when `position` is relative to the transport the unit rides.
    pub on_transport: bool,
}

impl MovementDestination {
    pub const fn new(position: WorldPosition, on_transport: bool) -> Self {
        Self {
            position,
            on_transport,
        }
    }
}

/// Moving platform reference frame.
pub trait TransportFrame {
    /// Converts a passenger-local position into world coordinates.
    fn passenger_to_world(&self, local: WorldPosition) -> WorldPosition;
}

/// The unit under control.
pub trait ControlledUnit {
    /// True when the unit is a player character (no template, no innate
    /// spellbook, no reactivity mode).
    fn is_player_controlled(&self) -> bool;

    fn template_id(&self) -> TemplateId;

    /// Innate creature spell list; null entries are [`SpellId::NONE`].
    fn innate_spells(&self) -> &[SpellId];

    fn react_state(&self) -> ReactState;

    fn set_react_state(&mut self, state: ReactState);

    /// Casts a spell on the unit itself, triggered (no cost, no cast time).
    fn cast_on_self(&mut self, spell: SpellId);

    fn movement_destination(&self) -> MovementDestination;

    /// Transport the unit is riding, if any.
    fn transport(&self) -> Option<&dyn TransportFrame>;

    /// Publishes the pet number shown in the client's pet frame.
    fn set_pet_number_for_client(&mut self, pet_number: u32);
}
