//! Command mode, movement intent and the stay anchor of a controlled unit.
//!
//! The tracker only stores what command handlers tell it. Interpreting the
//! combination of flags (for example "returning while following") is the job
//! of the AI loop that reads them.

use bitflags::bitflags;

use crate::env::{ControlledUnit, WorldPosition};

/// Command mode selected by the controlling player.
///
/// Discriminants double as command tokens on the action bar.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum CommandState {
    Stay = 0,
    #[default]
    Follow = 1,
    Attack = 2,
    Abandon = 3,
    MoveTo = 4,
}

/// Reactivity mode: how a creature responds to threats on its own.
///
/// Discriminants double as reaction tokens on the action bar.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum ReactState {
    #[default]
    Passive = 0,
    Defensive = 1,
    Aggressive = 2,
    Assist = 3,
}

bitflags! {
    /// Movement intents set by command handlers.
    ///
    /// The flags are independent: any combination may be set at once, and no
    /// setter clears another flag.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MovementIntent: u8 {
        const COMMAND_ATTACK = 1 << 0;
        const COMMAND_FOLLOW = 1 << 1;
        const AT_STAY        = 1 << 2;
        const FOLLOWING      = 1 << 3;
        const RETURNING      = 1 << 4;
    }
}

/// Command mode, intent flags and stay anchor for one controlled unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommandTracker {
    state: CommandState,
    intent: MovementIntent,
    stay: WorldPosition,
}

impl CommandTracker {
    pub fn new() -> Self {
        Self {
            state: CommandState::Follow,
            intent: MovementIntent::empty(),
            stay: WorldPosition::ORIGIN,
        }
    }

    pub fn set_command_state(&mut self, state: CommandState) {
        self.state = state;
    }

    pub fn command_state(&self) -> CommandState {
        self.state
    }

    pub fn has_command_state(&self, state: CommandState) -> bool {
        self.state == state
    }

    /// All intent flags at once.
    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    pub fn set_is_command_attack(&mut self, value: bool) {
        self.intent.set(MovementIntent::COMMAND_ATTACK, value);
    }

    pub fn is_command_attack(&self) -> bool {
        self.intent.contains(MovementIntent::COMMAND_ATTACK)
    }

    pub fn set_is_command_follow(&mut self, value: bool) {
        self.intent.set(MovementIntent::COMMAND_FOLLOW, value);
    }

    pub fn is_command_follow(&self) -> bool {
        self.intent.contains(MovementIntent::COMMAND_FOLLOW)
    }

    pub fn set_is_at_stay(&mut self, value: bool) {
        self.intent.set(MovementIntent::AT_STAY, value);
    }

    pub fn is_at_stay(&self) -> bool {
        self.intent.contains(MovementIntent::AT_STAY)
    }

    pub fn set_is_following(&mut self, value: bool) {
        self.intent.set(MovementIntent::FOLLOWING, value);
    }

    pub fn is_following(&self) -> bool {
        self.intent.contains(MovementIntent::FOLLOWING)
    }

    pub fn set_is_returning(&mut self, value: bool) {
        self.intent.set(MovementIntent::RETURNING, value);
    }

    pub fn is_returning(&self) -> bool {
        self.intent.contains(MovementIntent::RETURNING)
    }

    /// Stores the unit's final movement destination as the stay anchor.
    ///
    /// Destinations planned on a moving platform are platform-relative; they
    /// are converted through the platform's passenger transform first.
    pub fn save_stay_position(&mut self, unit: &dyn ControlledUnit) {
        let destination = unit.movement_destination();
        let mut position = destination.position;
        if destination.on_transport {
            if let Some(transport) = unit.transport() {
                position = transport.passenger_to_world(position);
            }
        }
        tracing::debug!("stay anchor saved at {:?}", position);
        self.stay = position;
    }

    /// Last saved stay anchor. Meaningless until [`Self::save_stay_position`]
    /// has run at least once.
    pub fn stay_position(&self) -> WorldPosition {
        self.stay
    }
}

impl Default for CommandTracker {
    fn default() -> Self {
        Self::new()
    }
}
