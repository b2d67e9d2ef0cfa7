//! Runs a scheme's steps against a fresh world.

use super::WorldDefinition;
use super::scheme::GeneratorScheme;
use crate::dice::Dice;

/// Generate one world by running every registered step in order.
#[must_use]
pub fn generate_world(scheme: &GeneratorScheme, dice: &mut dyn Dice) -> WorldDefinition {
    log::info!("generating world ({} scheme)", scheme.kind());
    let mut world = WorldDefinition::default();
    for (step, imp) in scheme.ordered() {
        log::trace!("step {} from {}", step.key(), imp.origin);
        (imp.run)(&mut world, dice);
    }
    log::info!("world generation complete");
    world
}
