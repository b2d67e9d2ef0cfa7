//! Subsector maps: an 8 by 10 hex grid where each hex may hold a world.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_WORLD_NAME, GAS_GIANT_CEILING, SUBSECTOR_COLUMNS, SUBSECTOR_ROWS, WORLD_PRESENCE_TARGET,
};
use crate::dice::Dice;
use crate::summary::WorldSummary;
use crate::tables::{DataError, WorldSource};
use crate::world::{GeneratorScheme, generate_world};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SubsectorWorld {
    #[serde(rename = "world")]
    pub summary: WorldSummary,
    pub has_gas_giant: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsector {
    pub name: String,
    pub worlds: Vec<SubsectorWorld>,
}

impl Subsector {
    /// Directory name used when each world is written out separately.
    #[must_use]
    pub fn directory_name(&self) -> String {
        format!("sector-{}", self.name)
    }
}

/// Pool of unused world names. Each name is handed out at most once.
#[derive(Debug, Clone, Default)]
pub struct WorldNames {
    available: Vec<String>,
}

impl WorldNames {
    /// Names from a newline separated list; blank lines are skipped.
    #[must_use]
    pub fn from_lines(text: &str) -> Self {
        Self {
            available: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.available.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Take a random name out of the pool, or the placeholder name once the
    /// pool is exhausted.
    pub fn draw(&mut self, dice: &mut dyn Dice) -> String {
        if self.available.is_empty() {
            log::warn!("world names exhausted, using {DEFAULT_WORLD_NAME}");
            return DEFAULT_WORLD_NAME.to_string();
        }
        let pick = dice.dx(self.available.len()).saturating_sub(1);
        self.available.swap_remove(pick)
    }
}

/// Trim, drop blanks, dedupe and sort a names list.
#[must_use]
pub fn polish_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Roll every hex of a subsector and generate the worlds found.
///
/// # Errors
///
/// Returns an error if a generated world cannot be summarised against
/// `source`.
pub fn generate_subsector(
    name: &str,
    scheme: &GeneratorScheme,
    source: &WorldSource,
    names: &mut WorldNames,
    dice: &mut dyn Dice,
) -> Result<Subsector, DataError> {
    log::info!("generating subsector {name} ({} scheme)", scheme.kind());
    let mut worlds = Vec::new();

    for column in 1..=SUBSECTOR_COLUMNS {
        for row in 1..=SUBSECTOR_ROWS {
            if dice.d6() < WORLD_PRESENCE_TARGET {
                continue;
            }
            let world = generate_world(scheme, dice);
            let summary = WorldSummary::build(&world, source)?
                .with_identity(names.draw(dice), format!("{column:02}{row:02}"));
            let has_gas_giant = dice.sum(2) < GAS_GIANT_CEILING;
            log::info!("{}", summary.uwp);
            worlds.push(SubsectorWorld {
                summary,
                has_gas_giant,
            });
        }
    }

    log::info!("subsector {name} has {} worlds", worlds.len());
    Ok(Subsector {
        name: name.to_string(),
        worlds,
    })
}
