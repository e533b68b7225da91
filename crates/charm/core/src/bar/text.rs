//! Text dump of an action bar, as stored with a saved pet.
//!
//! Format: one `"<state> <action>"` pair per slot in bar order, all tokens
//! separated by single spaces. The state is the numeric wire code of
//! [`ActiveState`](crate::button::ActiveState).

use arrayvec::ArrayVec;

use crate::button::{ActionButton, ActiveState, CodecError, SpellState};
use crate::env::SpellOracle;
use crate::error::{CharmError, ErrorSeverity};

use super::{ActionBar, SLOTS};

/// Reasons a text dump cannot be applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BarTextError {
    #[error("expected {expected} tokens, found {found}")]
    TokenCount { expected: usize, found: usize },

    #[error("token `{token}` of slot {slot} is not a number")]
    NotANumber { slot: usize, token: String },

    #[error("slot {slot}: {source}")]
    InvalidButton {
        slot: usize,
        #[source]
        source: CodecError,
    },
}

impl CharmError for BarTextError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TokenCount { .. } => "BAR_TEXT_TOKEN_COUNT",
            Self::NotANumber { .. } => "BAR_TEXT_NOT_A_NUMBER",
            Self::InvalidButton { .. } => "BAR_TEXT_INVALID_BUTTON",
        }
    }
}

impl ActionBar {
    /// Renders the bar as a text dump.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(SLOTS * 12);
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&slot.active_state().code().to_string());
            text.push(' ');
            text.push_str(&slot.action().to_string());
        }
        text
    }

    /// Parses a text dump without consulting spell metadata.
    pub fn parse_text(text: &str) -> Result<Self, BarTextError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != SLOTS * 2 {
            return Err(BarTextError::TokenCount {
                expected: SLOTS * 2,
                found: tokens.len(),
            });
        }

        let mut slots = ArrayVec::<ActionButton, SLOTS>::new();
        for (slot, pair) in tokens.chunks_exact(2).enumerate() {
            let code = parse_number(slot, pair[0])?;
            let action = parse_number(slot, pair[1])?;
            let button = u8::try_from(code)
                .ok()
                .and_then(ActiveState::from_repr)
                .ok_or(CodecError::UnknownState(code))
                .and_then(|state| ActionButton::from_parts(action, state))
                .map_err(|source| BarTextError::InvalidButton { slot, source })?;
            slots.push(button);
        }

        match slots.into_inner() {
            Ok(slots) => Ok(Self::from_slots(slots)),
            Err(slots) => Err(BarTextError::TokenCount {
                expected: SLOTS * 2,
                found: slots.len() * 2,
            }),
        }
    }

    /// Replaces the bar with a saved text dump.
    ///
    /// The pet layout is applied first and stays in place when the dump is
    /// malformed. Spell slots are checked against current metadata: unknown
    /// spells are dropped and spells that can no longer autocast are forced
    /// to passive.
    pub fn load_from_text<S>(&mut self, text: &str, spells: &S)
    where
        S: SpellOracle + ?Sized,
    {
        if let Err(err) = self.try_load_from_text(text, spells) {
            tracing::warn!(
                "ignoring saved action bar ({}): {}",
                err.error_code(),
                err
            );
        }
    }

    /// Same as [`Self::load_from_text`], but hands the parse failure back
    /// instead of logging it. The bar holds the pet layout on error.
    pub fn try_load_from_text<S>(&mut self, text: &str, spells: &S) -> Result<(), BarTextError>
    where
        S: SpellOracle + ?Sized,
    {
        self.init_pet_layout();
        let loaded = Self::parse_text(text)?;

        for (index, button) in loaded.slots.into_iter().enumerate() {
            self.slots[index] = match button {
                ActionButton::Spell { spell, state } => match spells.spell_info(spell) {
                    None => {
                        if !spell.is_none() {
                            tracing::trace!("slot {}: unknown {} dropped", index, spell);
                        }
                        ActionButton::EMPTY
                    }
                    Some(info) if !info.is_autocastable() => {
                        if state != SpellState::Passive {
                            tracing::trace!("slot {}: {} forced passive", index, spell);
                        }
                        ActionButton::spell(spell, SpellState::Passive)
                    }
                    Some(_) => button,
                },
                command => command,
            };
        }
        Ok(())
    }
}

fn parse_number(slot: usize, token: &str) -> Result<u32, BarTextError> {
    token.parse().map_err(|_| BarTextError::NotANumber {
        slot,
        token: token.to_owned(),
    })
}
