//! Rule-book derivation steps.

use smallvec::SmallVec;

use super::scheme::{GenerationStep, StepFn};
use super::{BaseKind, Faction, HabitabilityZone, TradeCode, TravelZone, WorldDefinition};
use crate::constants::{
    ATMOSPHERE_BOUNDS, FACTION_STYLE_BOUNDS, GOVERNMENT_BOUNDS, HYDROGRAPHICS_BOUNDS, LAW_BOUNDS,
    NO_ATMOSPHERE_TEMPERATURE, NO_CULTURE, POPULATION_BOUNDS, SIZE_BOUNDS, STARPORT_BOUNDS,
    TECH_BOUNDS, TEMPERATURE_BOUNDS,
};
use crate::dice::Dice;
use crate::dm::{Predicate, adjust_dm};

pub(super) const ORIGIN: &str = "standard";

pub(super) fn step_fn(step: GenerationStep) -> StepFn {
    match step {
        GenerationStep::Size => size,
        GenerationStep::Atmosphere => atmosphere,
        GenerationStep::Temperature => temperature,
        GenerationStep::Hydrographics => hydrographics,
        GenerationStep::Population => population,
        GenerationStep::Government => government,
        GenerationStep::Factions => factions,
        GenerationStep::Culture => culture,
        GenerationStep::LawLevel => law_level,
        GenerationStep::Starport => starport,
        GenerationStep::TechLevel => tech_level,
        GenerationStep::Highport => highport,
        GenerationStep::Bases => bases,
        GenerationStep::TravelZone => travel_zone,
        GenerationStep::TradeCodes => trade_codes,
    }
}

// Size 2D-2
fn size(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.size = SIZE_BOUNDS.clamp(dice.sum(2) - 2);
    log::debug!("size: {}", world.size);
}

// Atmosphere 2D-7+Size, none on the smallest worlds
fn atmosphere(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.atmosphere = 0;
    if world.size > 1 {
        world.atmosphere = ATMOSPHERE_BOUNDS.clamp(dice.sum(2) - 7 + world.size);
    }
    log::debug!("atmosphere: {}", world.atmosphere);
}

fn temperature(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    if world.atmosphere <= 1 {
        world.temperature = NO_ATMOSPHERE_TEMPERATURE;
        world.habitability_zone = HabitabilityZone::Standard;
        log::debug!("temperature: none (no atmosphere)");
        return;
    }

    let atmo = world.atmosphere;
    let mut atmo_dm = 0;
    atmo_dm = adjust_dm(atmo_dm, -2, atmo, Predicate::InRange, &[2, 3]);
    atmo_dm = adjust_dm(atmo_dm, -1, atmo, Predicate::IsOneOf, &[4, 5, 14]);
    atmo_dm = adjust_dm(atmo_dm, 1, atmo, Predicate::InRange, &[8, 9]);
    atmo_dm = adjust_dm(atmo_dm, 6, atmo, Predicate::InRange, &[11, 12]);
    atmo_dm = adjust_dm(atmo_dm, 2, atmo, Predicate::IsOneOf, &[10, 13, 15]);

    let (zone_dm, zone) = match dice.sum(2) {
        2 => (-4, HabitabilityZone::ExtremeCold),
        3 => (-2, HabitabilityZone::Cold),
        11 => (2, HabitabilityZone::Hot),
        12 => (4, HabitabilityZone::ExtremeHot),
        _ => (0, HabitabilityZone::Standard),
    };

    world.temperature = TEMPERATURE_BOUNDS.clamp(dice.sum(2) + atmo_dm + zone_dm);
    world.habitability_zone = zone;
    log::debug!(
        "temperature: {} ({})",
        world.temperature,
        world.habitability_zone.key()
    );
}

/// Temperature DM on hydrographics; dense and exotic atmospheres keep their
/// liquid regardless.
pub(super) fn hydrographics_temperature_dm(world: &WorldDefinition) -> i32 {
    if matches!(world.atmosphere, 13 | 15) {
        return 0;
    }
    let mut dm = 0;
    dm = adjust_dm(dm, -2, world.temperature, Predicate::InRange, &[10, 11]);
    adjust_dm(dm, -6, world.temperature, Predicate::Eq, &[12])
}

fn hydrographics(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.hydrographics = 0;
    if world.size > 1 {
        let atmo_dm = adjust_dm(
            0,
            -4,
            world.atmosphere,
            Predicate::IsOneOf,
            &[0, 1, 10, 11, 12, 13, 14, 15],
        );
        let temp_dm = hydrographics_temperature_dm(world);
        world.hydrographics =
            HYDROGRAPHICS_BOUNDS.clamp(dice.sum(2) - 7 + world.atmosphere + atmo_dm + temp_dm);
    }
    log::debug!("hydrographics: {}", world.hydrographics);
}

fn population(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.population = POPULATION_BOUNDS.clamp(dice.sum(2) - 2);
    log::debug!("population: {}", world.population);
}

fn government(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.government = 0;
    if world.population > 0 {
        world.government = GOVERNMENT_BOUNDS.clamp(dice.sum(2) - 7 + world.population);
    }
    log::debug!("government: {}", world.government);
}

fn factions(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.factions.clear();
    if world.population > 0 {
        let mut count_dm = 0;
        count_dm = adjust_dm(count_dm, 1, world.government, Predicate::IsOneOf, &[0, 7]);
        count_dm = adjust_dm(count_dm, -1, world.government, Predicate::Ge, &[10]);

        let count = (dice.d3() + count_dm).max(0);
        for _ in 0..count {
            let government_style = FACTION_STYLE_BOUNDS.clamp(dice.sum(2) - 7 + world.population);
            let relative_strength = dice.sum(2);
            world.factions.push(Faction {
                government_style,
                relative_strength,
            });
        }
    }
    log::debug!("factions: {}", world.factions.len());
}

fn culture(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.culture = NO_CULTURE;
    if world.population > 0 {
        world.culture = dice.d66();
    }
    log::debug!("culture: {}", world.culture);
}

fn law_level(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    world.law_level = 0;
    if world.population > 0 {
        world.law_level = LAW_BOUNDS.clamp(dice.sum(2) - 7 + world.government);
    }
    log::debug!("law level: {}", world.law_level);
}

fn starport(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    let pop = world.population;
    let mut pop_dm = 0;
    pop_dm = adjust_dm(pop_dm, 1, pop, Predicate::InRange, &[8, 9]);
    pop_dm = adjust_dm(pop_dm, 2, pop, Predicate::Ge, &[10]);
    pop_dm = adjust_dm(pop_dm, -1, pop, Predicate::InRange, &[3, 4]);
    pop_dm = adjust_dm(pop_dm, -2, pop, Predicate::Le, &[2]);

    let value = STARPORT_BOUNDS.clamp(dice.sum(2) + pop_dm);
    let multiplier = match value {
        5 | 6 => 10,
        7 | 8 => 100,
        9 | 10 => 500,
        11 => 1000,
        _ => 0,
    };
    let berthing_cost = if multiplier > 0 {
        dice.d6() * multiplier
    } else {
        0
    };

    world.starport.value = value;
    world.starport.berthing_cost = berthing_cost;
    world.starport.has_highport = false;
    log::debug!("starport: {value} (berthing {berthing_cost})");
}

fn tech_level(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    if world.population == 0 {
        world.tech_level = 0;
        log::debug!("tech level: 0 (uninhabited)");
        return;
    }

    let starport = world.starport.value;
    let mut mods = 0;
    mods = adjust_dm(mods, -4, starport, Predicate::Eq, &[2]);
    mods = adjust_dm(mods, 2, starport, Predicate::InRange, &[7, 8]);
    mods = adjust_dm(mods, 4, starport, Predicate::InRange, &[9, 10]);
    mods = adjust_dm(mods, 6, starport, Predicate::Eq, &[11]);

    mods = adjust_dm(mods, 2, world.size, Predicate::Le, &[1]);
    mods = adjust_dm(mods, 1, world.size, Predicate::InRange, &[2, 4]);

    mods = adjust_dm(mods, 1, world.atmosphere, Predicate::Le, &[3]);
    mods = adjust_dm(mods, 1, world.atmosphere, Predicate::Ge, &[10]);

    mods = adjust_dm(mods, 1, world.hydrographics, Predicate::IsOneOf, &[0, 9]);
    mods = adjust_dm(mods, 2, world.hydrographics, Predicate::Eq, &[10]);

    mods = adjust_dm(mods, 1, world.population, Predicate::IsOneOf, &[1, 2, 3, 4, 5, 8]);
    mods = adjust_dm(mods, 2, world.population, Predicate::Eq, &[9]);
    mods = adjust_dm(mods, 4, world.population, Predicate::Eq, &[10]);

    mods = adjust_dm(mods, 1, world.government, Predicate::IsOneOf, &[0, 4]);
    mods = adjust_dm(mods, 2, world.government, Predicate::Eq, &[7]);
    mods = adjust_dm(mods, -2, world.government, Predicate::InRange, &[13, 14]);

    let raw = dice.d6() + mods;
    if raw < 1 + mods || raw > 6 + mods {
        log::warn!("suspicious tech calculation: {raw} with modifiers {mods}");
    }

    let bounded = TECH_BOUNDS.clamp(raw);
    world.tech_level = apply_atmosphere_tech_floor(bounded, world.atmosphere);
    log::debug!("tech level: {}", world.tech_level);
}

/// Minimum tech a population needs to survive its atmosphere.
pub(super) fn apply_atmosphere_tech_floor(tech: i32, atmosphere: i32) -> i32 {
    let floor = match atmosphere {
        0 | 1 | 10 | 15 => 8,
        2 | 3 | 13 | 14 => 5,
        4 | 7 | 9 => 3,
        11 => 9,
        12 => 10,
        _ => 0,
    };
    tech.max(floor)
}

fn highport(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    let target = match world.starport.value {
        5 | 6 => Some(12),
        7 | 8 => Some(10),
        9 | 10 => Some(8),
        11 => Some(6),
        _ => None,
    };
    let Some(target) = target else {
        world.starport.has_highport = false;
        log::debug!("highport: not possible at starport {}", world.starport.value);
        return;
    };

    let mut dm = 0;
    dm = adjust_dm(dm, 1, world.tech_level, Predicate::InRange, &[9, 11]);
    dm = adjust_dm(dm, 2, world.tech_level, Predicate::Ge, &[12]);
    dm = adjust_dm(dm, 1, world.population, Predicate::Ge, &[9]);
    dm = adjust_dm(dm, -1, world.population, Predicate::Le, &[6]);

    world.starport.has_highport = dice.sum(2) + dm >= target;
    log::debug!("highport: {}", world.starport.has_highport);
}

fn bases(world: &mut WorldDefinition, dice: &mut dyn Dice) {
    let mut corsair_dm = 0;
    corsair_dm = adjust_dm(corsair_dm, 2, world.law_level, Predicate::Eq, &[0]);
    corsair_dm = adjust_dm(corsair_dm, -2, world.law_level, Predicate::Ge, &[2]);

    // (base, target, applies the corsair law DM)
    let checks: &[(BaseKind, i32, bool)] = match world.starport.value {
        2..=4 => &[(BaseKind::Corsair, 10, true)],
        5 | 6 => &[(BaseKind::Corsair, 12, true), (BaseKind::Scout, 8, false)],
        7 | 8 => &[(BaseKind::Military, 10, false), (BaseKind::Scout, 9, false)],
        9 | 10 => &[
            (BaseKind::Military, 8, false),
            (BaseKind::Naval, 8, false),
            (BaseKind::Scout, 9, false),
        ],
        11 => &[
            (BaseKind::Military, 8, false),
            (BaseKind::Naval, 8, false),
            (BaseKind::Scout, 10, false),
        ],
        _ => &[],
    };

    let mut found = SmallVec::new();
    for &(kind, target, uses_law) in checks {
        let dm = if uses_law { corsair_dm } else { 0 };
        if dice.sum(2) + dm >= target {
            found.push(kind);
        }
    }
    world.bases = found;
    log::debug!("bases: {}", world.bases.len());
}

fn travel_zone(world: &mut WorldDefinition, _dice: &mut dyn Dice) {
    let hostile_atmosphere = world.atmosphere >= 10;
    let unstable_regime = matches!(world.government, 0 | 7 | 10)
        && (world.law_level == 0 || world.law_level >= 9);
    world.travel_zone = if hostile_atmosphere || unstable_regime {
        TravelZone::Amber
    } else {
        TravelZone::Green
    };
    log::debug!("travel zone: {}", world.travel_zone.key());
}

fn trade_codes(world: &mut WorldDefinition, _dice: &mut dyn Dice) {
    world.trade_codes = TradeCode::ALL
        .into_iter()
        .filter(|&code| qualifies(world, code))
        .collect();
    log::debug!("trade codes: {}", world.trade_codes.len());
}

fn qualifies(world: &WorldDefinition, code: TradeCode) -> bool {
    let size = world.size;
    let atmo = world.atmosphere;
    let hydro = world.hydrographics;
    let pop = world.population;
    let gov = world.government;
    match code {
        TradeCode::Agricultural => {
            (4..=9).contains(&atmo) && (4..=8).contains(&hydro) && (5..=7).contains(&pop)
        }
        TradeCode::Asteroid => size == 0 && atmo == 0 && hydro == 0,
        TradeCode::Barren => pop == 0 && gov == 0 && world.law_level == 0,
        TradeCode::Desert => (2..=9).contains(&atmo) && hydro == 0,
        TradeCode::FluidOceans => atmo >= 10 && hydro >= 1,
        TradeCode::Garden => {
            (6..=8).contains(&size) && matches!(atmo, 5 | 6 | 8) && (5..=7).contains(&hydro)
        }
        TradeCode::HighPopulation => pop >= 9,
        TradeCode::HighTech => world.tech_level >= 12,
        TradeCode::IceCapped => atmo <= 1 && hydro >= 1,
        TradeCode::Industrial => matches!(atmo, 0 | 1 | 2 | 4 | 7 | 9 | 10 | 11 | 12) && pop >= 9,
        TradeCode::LowPopulation => pop <= 3,
        TradeCode::LowTech => pop >= 1 && world.tech_level <= 5,
        TradeCode::NonAgricultural => atmo <= 3 && hydro <= 3 && pop >= 6,
        TradeCode::NonIndustrial => (4..=6).contains(&pop),
        TradeCode::Poor => (2..=5).contains(&atmo) && hydro <= 3,
        TradeCode::Rich => {
            matches!(atmo, 6 | 8) && (6..=8).contains(&pop) && (4..=9).contains(&gov)
        }
        TradeCode::Vacuum => atmo == 0,
        TradeCode::Waterworld => matches!(atmo, 3..=9 | 13) && hydro >= 10,
    }
}
