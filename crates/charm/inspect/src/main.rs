//! Decodes a saved pet action bar against the current spell catalog.
//!
//! Usage: `charm-inspect <FILE | ->`
//!
//! Reads the stored text dump, reports whether it parses, applies the same
//! load-time corrections a world server would, and prints the resulting
//! slots together with the packed words sent to the client.
mod config;

use std::io::Read;

use anyhow::{Context, Result};
use charm_content::{ContentFactory, SpellCatalog};
use charm_core::{ActionBar, BarSlot, CharmError};
use config::InspectConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = std::env::args()
        .nth(1)
        .context("usage: charm-inspect <FILE | ->")?;
    let text = read_source(&source)?;

    let config = InspectConfig::from_env();
    let factory = ContentFactory::new(&config.data_dir);
    let spells = factory
        .load_spells()
        .with_context(|| format!("loading spells from {}", config.data_dir.display()))?;
    tracing::info!(
        "{} spells loaded from {}",
        spells.len(),
        config.data_dir.display()
    );

    let mut bar = ActionBar::default();
    if let Err(err) = bar.try_load_from_text(&text, &spells) {
        tracing::warn!(
            "{} [{}, {}]: falling back to the pet layout",
            err,
            err.error_code(),
            err.severity().as_str()
        );
    }

    print!("{}", render_slots(&bar, &spells));
    if config.show_wire {
        let mut wire = Vec::new();
        bar.write_wire(&mut wire);
        println!("wire: {}", hex::encode(&wire));
    }

    Ok(())
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading action bar from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("reading {source}"))
}

fn range_label(slot: BarSlot) -> &'static str {
    if slot.is_command_range() {
        "command"
    } else if slot.is_spell_range() {
        "spell"
    } else {
        "reaction"
    }
}

fn render_slots(bar: &ActionBar, spells: &SpellCatalog) -> String {
    let mut out = String::new();
    for (slot, button) in bar.iter() {
        let name = button
            .spell_id()
            .and_then(|spell| spells.name(spell))
            .map(|name| format!("  {name}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>2} {:<8} {:#010x}  {}{}\n",
            slot.index(),
            range_label(slot),
            button.packed(),
            button,
            name
        ));
    }
    out
}
