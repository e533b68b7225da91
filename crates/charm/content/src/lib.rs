//! Data-driven content for the charm controller.
//!
//! Provides loaders for the RON/TOML files a world server ships alongside the
//! controller:
//! - Spell catalog (RON), usable directly as the controller's spell oracle
//! - Controller configuration (TOML)
//!
//! Content is consumed through the `charm-core` oracle traits and never
//! appears in controller state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, SpellCatalog, SpellLoader, SpellSpec};
