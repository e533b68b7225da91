//! Traits describing data and collaborators the controller does not own.
//!
//! Oracles expose read-only spell metadata and controller configuration. The
//! [`Env`] aggregate bundles them so the controller can reach everything it
//! needs without hard coupling to concrete implementations. The controlled
//! unit itself is passed separately, borrowed per call.
mod config;
mod spells;
mod unit;

pub use config::ConfigOracle;
pub use spells::{SpellAttributes, SpellInfo, SpellOracle};
pub use unit::{
    ControlledUnit, MovementDestination, TemplateId, TransportFrame, WorldPosition,
};

/// Aggregates read-only oracles required by the lifecycle controller.
pub struct Env<'a, S, C>
where
    S: SpellOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    spells: &'a S,
    config: &'a C,
}

impl<S, C> Clone for Env<'_, S, C>
where
    S: SpellOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, C> Copy for Env<'_, S, C>
where
    S: SpellOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
}

pub type CharmEnv<'a> = Env<'a, dyn SpellOracle + 'a, dyn ConfigOracle + 'a>;

impl<'a, S, C> Env<'a, S, C>
where
    S: SpellOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(spells: &'a S, config: &'a C) -> Self {
        Self { spells, config }
    }

    pub fn spells(&self) -> &'a S {
        self.spells
    }

    pub fn config(&self) -> &'a C {
        self.config
    }
}

impl<'a, S, C> Env<'a, S, C>
where
    S: SpellOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `CharmEnv`.
    pub fn as_charm_env(&self) -> CharmEnv<'a> {
        let spells: &'a dyn SpellOracle = self.spells;
        let config: &'a dyn ConfigOracle = self.config;
        Env::new(spells, config)
    }
}
