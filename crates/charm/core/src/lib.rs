//! Action bar and command state of charmed, possessed and pet units.
//!
//! `charm-core` owns the state a controlling player sees for a unit under
//! their control: the ten-slot action bar, the creature's charm-spell table
//! and the command/movement intent consumed by the AI loop. Spell metadata,
//! configuration and the unit itself are reached through the traits in
//! [`env`], so the crate never depends on a concrete world server.
pub mod bar;
pub mod button;
pub mod charm_spells;
pub mod command;
pub mod config;
pub mod controller;
pub mod env;
pub mod error;

#[cfg(test)]
mod testing;

pub use bar::{ActionBar, BarSlot, BarTextError, SlotIndexError};
pub use button::{
    ActionButton, ActiveState, CodecError, CommandToken, SpellId, SpellState, SpellStateRequest,
};
pub use charm_spells::{CharmSpell, CharmSpellTable};
pub use command::{CommandState, CommandTracker, MovementIntent, ReactState};
pub use config::CharmConfig;
pub use controller::CharmInfo;
pub use env::{
    CharmEnv, ConfigOracle, ControlledUnit, Env, MovementDestination, SpellAttributes, SpellInfo,
    SpellOracle, TemplateId, TransportFrame, WorldPosition,
};
pub use error::{CharmError, ErrorSeverity};
