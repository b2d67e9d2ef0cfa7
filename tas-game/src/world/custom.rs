//! House-rule replacements for two standard steps.
//!
//! Hydrographics no longer leaves liquid on airless worlds, and tech level is
//! derived from the minimum technology a population would need to live with
//! its world rather than from a modifier sum.

use super::WorldDefinition;
use super::standard::{apply_atmosphere_tech_floor, hydrographics_temperature_dm};
use crate::constants::{HYDROGRAPHICS_BOUNDS, TECH_BOUNDS};
use crate::dice::Dice;
use crate::dm::{Predicate, adjust_dm};

pub(super) const ORIGIN: &str = "custom";

/// Floor for a settled world before any environment is considered.
const BASE_TECH: i32 = 7;

pub(super) fn hydrographics(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.hydrographics = 0;
    if world.size > 1 && world.atmosphere > 1 {
        let atmo_dm = adjust_dm(0, -4, world.atmosphere, Predicate::Ge, &[10]);
        let temp_dm = hydrographics_temperature_dm(world);
        world.hydrographics =
            HYDROGRAPHICS_BOUNDS.clamp(dice.sum(2) - 7 + world.atmosphere + atmo_dm + temp_dm);
    }
    log::debug!("hydrographics (custom): {}", world.hydrographics);
}

pub(super) fn tech_level(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    let floors = [
        size_floor(world.size),
        atmosphere_floor(world.atmosphere),
        hydrographics_floor(world.hydrographics),
        temperature_floor(world.temperature),
        population_floor(world.population),
        starport_floor(world.starport.value),
    ];
    let floor = floors.into_iter().fold(BASE_TECH, i32::max);

    let drift = match dice.d6() {
        1 => -1,
        6 => 1,
        _ => 0,
    };
    let tech = apply_atmosphere_tech_floor(TECH_BOUNDS.clamp(floor + drift), world.atmosphere);

    world.tech_level = if world.population == 0 { 0 } else { tech };
    log::debug!("tech level (custom): {}", world.tech_level);
}

const fn size_floor(size: i32) -> i32 {
    match size {
        0 | 1 | 10 => 8,
        _ => 0,
    }
}

const fn atmosphere_floor(atmosphere: i32) -> i32 {
    match atmosphere {
        2 | 4 | 7 | 9 => 8,
        13 => 9,
        10 | 11 | 12 | 15 => 10,
        _ => 0,
    }
}

const fn hydrographics_floor(hydrographics: i32) -> i32 {
    match hydrographics {
        0 => 9,
        10 => 10,
        _ => 0,
    }
}

const fn temperature_floor(temperature: i32) -> i32 {
    match temperature {
        2 | 12 => 8,
        _ => 0,
    }
}

const fn population_floor(population: i32) -> i32 {
    match population {
        1 | 2 => 8,
        4 | 5 => 9,
        6 | 7 => 10,
        8 => 11,
        9..=12 => 12,
        _ => 0,
    }
}

const fn starport_floor(starport: i32) -> i32 {
    match starport {
        5 | 6 => 9,
        7 | 8 => 10,
        9 | 10 => 11,
        11 => 12,
        _ => 0,
    }
}
