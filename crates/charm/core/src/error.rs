//! Common error infrastructure for charm-core.
//!
//! The controller itself reports outcomes through `bool` results and silent
//! no-ops (a full bar, an unknown spell, a malformed dump). Typed errors only
//! exist at the boundaries where raw data enters the crate: packed wire words,
//! raw slot indices and persisted text. Those errors are defined next to the
//! code that produces them and share the [`CharmError`] trait below.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid external input; the caller falls back to a default.
    ///
    /// Examples: corrupted persisted bar, unknown state code on the wire
    Validation,

    /// Caller bug; the request can never be valid.
    ///
    /// Examples: slot index outside the bar
    Contract,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Contract => "contract",
        }
    }

    /// Returns true if this error indicates a bug in the calling code.
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract)
    }
}

/// Common trait for all charm-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who is at fault, not on impact
pub trait CharmError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
