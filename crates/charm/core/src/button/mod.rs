//! Action bar buttons and their activation states.
//!
//! A button is either a spell reference or a command token. On the wire both
//! share one packed `u32` whose state code decides how the low bits are read;
//! in memory the distinction is carried by the [`ActionButton`] variant, and
//! the packed form is produced only by [`codec`].
//!
//! # Design
//!
//! - **Spell**: a spell id plus its autocast state (Disabled/Passive/Enabled).
//!   Spell id `0` is an empty slot.
//! - **Command**: a pet command token (attack, follow, stay).
//! - **Reaction**: a reactivity stance token (aggressive, defensive, passive).

pub mod codec;

pub use codec::{ACTION_ID_BITS, ACTION_ID_MASK, CodecError, pack, unpack};

use core::fmt;

use crate::command::{CommandState, ReactState};

/// Identifier of a spell in the external spell system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellId(pub u32);

impl SpellId {
    /// Null spell reference; marks an empty spell slot.
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spell#{}", self.0)
    }
}

/// State code stored in the high bits of a packed button.
///
/// The discriminants are the wire codes and must not change.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ActiveState {
    /// Request-only: let the allocator choose. Never stored in a slot.
    Decide = 0x00,
    Passive = 0x01,
    Reaction = 0x06,
    Command = 0x07,
    Disabled = 0x81,
    Enabled = 0xC1,
}

impl ActiveState {
    /// Returns the 8-bit wire code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// True for the states of a slot holding a spell reference.
    pub const fn is_spell(self) -> bool {
        matches!(self, Self::Disabled | Self::Enabled | Self::Passive)
    }

    /// True for the states of a slot holding a command token.
    pub const fn is_command(self) -> bool {
        matches!(self, Self::Command | Self::Reaction)
    }
}

/// Autocast state of a spell slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpellState {
    /// Autocastable but switched off.
    Disabled,
    /// Manual use only.
    Passive,
    /// Autocast switched on.
    Enabled,
}

impl SpellState {
    pub const fn active_state(self) -> ActiveState {
        match self {
            Self::Disabled => ActiveState::Disabled,
            Self::Passive => ActiveState::Passive,
            Self::Enabled => ActiveState::Enabled,
        }
    }

    pub const fn from_active_state(state: ActiveState) -> Option<Self> {
        match state {
            ActiveState::Disabled => Some(Self::Disabled),
            ActiveState::Passive => Some(Self::Passive),
            ActiveState::Enabled => Some(Self::Enabled),
            _ => None,
        }
    }

    /// Autocast toggle result.
    pub const fn autocast(enable: bool) -> Self {
        if enable { Self::Enabled } else { Self::Disabled }
    }
}

/// State requested when placing a spell on the bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpellStateRequest {
    /// Disabled for autocastable spells, Passive otherwise.
    Decide,
    Exactly(SpellState),
}

impl SpellStateRequest {
    /// Resolves the request for a spell with the given autocast capability.
    pub const fn resolve(self, autocastable: bool) -> SpellState {
        match self {
            Self::Decide if autocastable => SpellState::Disabled,
            Self::Decide => SpellState::Passive,
            Self::Exactly(state) => state,
        }
    }
}

impl From<SpellState> for SpellStateRequest {
    fn from(state: SpellState) -> Self {
        Self::Exactly(state)
    }
}

/// Raw command or reaction token carried by a command-class button.
///
/// Command slots read the token as a [`CommandState`], reaction slots as a
/// [`ReactState`]. Tokens outside the known range are kept verbatim so that a
/// decoded word always re-encodes to itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CommandToken(pub u32);

impl CommandToken {
    pub fn as_command_state(self) -> Option<CommandState> {
        u8::try_from(self.0).ok().and_then(CommandState::from_repr)
    }

    pub fn as_react_state(self) -> Option<ReactState> {
        u8::try_from(self.0).ok().and_then(ReactState::from_repr)
    }
}

impl From<CommandState> for CommandToken {
    fn from(state: CommandState) -> Self {
        Self(state as u32)
    }
}

impl From<ReactState> for CommandToken {
    fn from(state: ReactState) -> Self {
        Self(state as u32)
    }
}

/// One slot of a controlled unit's action bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionButton {
    Spell { spell: SpellId, state: SpellState },
    Command(CommandToken),
    Reaction(CommandToken),
}

impl ActionButton {
    /// Free spell slot.
    pub const EMPTY: Self = Self::Spell {
        spell: SpellId::NONE,
        state: SpellState::Passive,
    };

    /// Zeroed slot written when a controller is created.
    pub const CLEARED: Self = Self::Spell {
        spell: SpellId::NONE,
        state: SpellState::Disabled,
    };

    pub const fn spell(spell: SpellId, state: SpellState) -> Self {
        Self::Spell { spell, state }
    }

    pub fn command(state: CommandState) -> Self {
        Self::Command(state.into())
    }

    pub fn reaction(state: ReactState) -> Self {
        Self::Reaction(state.into())
    }

    /// Numeric action id as it appears on the wire.
    pub const fn action(&self) -> u32 {
        match self {
            Self::Spell { spell, .. } => spell.0,
            Self::Command(token) | Self::Reaction(token) => token.0,
        }
    }

    pub const fn active_state(&self) -> ActiveState {
        match self {
            Self::Spell { state, .. } => state.active_state(),
            Self::Command(_) => ActiveState::Command,
            Self::Reaction(_) => ActiveState::Reaction,
        }
    }

    pub const fn is_spell(&self) -> bool {
        matches!(self, Self::Spell { .. })
    }

    pub const fn is_command(&self) -> bool {
        matches!(self, Self::Command(_) | Self::Reaction(_))
    }

    /// True for a spell slot that holds no spell.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Spell { spell, .. } if spell.is_none())
    }

    /// Returns the referenced spell, if this is a non-empty spell slot.
    pub const fn spell_id(&self) -> Option<SpellId> {
        match self {
            Self::Spell { spell, .. } if !spell.is_none() => Some(*spell),
            _ => None,
        }
    }

    pub const fn spell_state(&self) -> Option<SpellState> {
        match self {
            Self::Spell { state, .. } => Some(*state),
            _ => None,
        }
    }
}

impl Default for ActionButton {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for ActionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spell { spell, .. } if spell.is_none() => write!(f, "<empty>"),
            Self::Spell { spell, state } => write!(f, "{spell} ({state})"),
            Self::Command(token) => match token.as_command_state() {
                Some(command) => write!(f, "command {command}"),
                None => write!(f, "command #{}", token.0),
            },
            Self::Reaction(token) => match token.as_react_state() {
                Some(react) => write!(f, "reaction {react}"),
                None => write!(f, "reaction #{}", token.0),
            },
        }
    }
}
