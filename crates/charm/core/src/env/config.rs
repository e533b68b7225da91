//! Configuration oracle for exposing controller configuration.

use super::TemplateId;

/// Provides access to controller configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Returns true if possessing a creature of this template must keep the
    /// constructed (all-empty) bar instead of adding the attack command.
    fn keeps_bar_on_possess(&self, template: TemplateId) -> bool;
}
