//! Packed wire form of an action button.
//!
//! Layout (least-significant bit = bit 0):
//!
//! - bits 0..=22  : action id (spell id or command token)
//! - bits 23..=30 : [`ActiveState`] code
//! - bit 31       : always zero for the defined state codes
//!
//! Treat the layout as a wire format: the client decodes the same bits.

use crate::error::{CharmError, ErrorSeverity};

use super::{ActionButton, ActiveState, CommandToken, SpellId, SpellState};

/// Width of the action id field.
pub const ACTION_ID_BITS: u32 = 23;
/// Mask selecting the action id field.
pub const ACTION_ID_MASK: u32 = (1 << ACTION_ID_BITS) - 1;

/// Errors produced when a packed word does not describe a storable button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unknown action state code {0:#x}")]
    UnknownState(u32),

    #[error("action state `decide` is request-only and cannot be stored")]
    UnstorableState,

    #[error("action id {0} does not fit in {ACTION_ID_BITS} bits")]
    ActionOutOfRange(u32),
}

impl CharmError for CodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownState(_) => "CODEC_UNKNOWN_STATE",
            Self::UnstorableState => "CODEC_UNSTORABLE_STATE",
            Self::ActionOutOfRange(_) => "CODEC_ACTION_OUT_OF_RANGE",
        }
    }
}

/// Packs an action id and state code into one word.
///
/// The caller keeps `action` within [`ACTION_ID_MASK`]; wider ids are a
/// contract violation.
#[inline]
pub const fn pack(action: u32, state: ActiveState) -> u32 {
    debug_assert!(action <= ACTION_ID_MASK, "action id exceeds 23 bits");
    (action & ACTION_ID_MASK) | ((state.code() as u32) << ACTION_ID_BITS)
}

/// Splits a word into action id and state.
pub fn unpack(packed: u32) -> Result<(u32, ActiveState), CodecError> {
    let action = packed & ACTION_ID_MASK;
    let code = packed >> ACTION_ID_BITS;
    let state = u8::try_from(code)
        .ok()
        .and_then(ActiveState::from_repr)
        .ok_or(CodecError::UnknownState(code))?;
    Ok((action, state))
}

impl ActionButton {
    /// Builds a button from an action id and a stored state.
    pub fn from_parts(action: u32, state: ActiveState) -> Result<Self, CodecError> {
        if action > ACTION_ID_MASK {
            return Err(CodecError::ActionOutOfRange(action));
        }
        let button = match state {
            ActiveState::Decide => return Err(CodecError::UnstorableState),
            ActiveState::Command => Self::Command(CommandToken(action)),
            ActiveState::Reaction => Self::Reaction(CommandToken(action)),
            ActiveState::Passive => Self::spell(SpellId(action), SpellState::Passive),
            ActiveState::Disabled => Self::spell(SpellId(action), SpellState::Disabled),
            ActiveState::Enabled => Self::spell(SpellId(action), SpellState::Enabled),
        };
        Ok(button)
    }

    /// Packed wire form of this button.
    #[inline]
    pub const fn packed(&self) -> u32 {
        pack(self.action(), self.active_state())
    }

    /// Decodes a packed wire word.
    pub fn from_packed(packed: u32) -> Result<Self, CodecError> {
        let (action, state) = unpack(packed)?;
        Self::from_parts(action, state)
    }
}
