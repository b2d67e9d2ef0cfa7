//! Attribute averages over many generated worlds.

use serde::Serialize;

use super::WorldDefinition;
use super::pipeline::generate_world;
use super::scheme::GeneratorScheme;
use crate::dice::Dice;
use crate::numbers::mean;

/// Mean value of each coded attribute across a batch of worlds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AttributeAverages {
    pub runs: u32,
    pub size: f64,
    pub atmosphere: f64,
    pub temperature: f64,
    pub hydrographics: f64,
    pub population: f64,
    pub government: f64,
    pub law_level: f64,
    pub starport: f64,
    pub tech_level: f64,
}

#[derive(Debug, Default)]
struct Totals {
    count: usize,
    size: i64,
    atmosphere: i64,
    temperature: i64,
    hydrographics: i64,
    population: i64,
    government: i64,
    law_level: i64,
    starport: i64,
    tech_level: i64,
}

impl Totals {
    fn add(&mut self, world: &WorldDefinition) {
        self.count += 1;
        self.size += i64::from(world.size);
        self.atmosphere += i64::from(world.atmosphere);
        self.temperature += i64::from(world.temperature);
        self.hydrographics += i64::from(world.hydrographics);
        self.population += i64::from(world.population);
        self.government += i64::from(world.government);
        self.law_level += i64::from(world.law_level);
        self.starport += i64::from(world.starport.value);
        self.tech_level += i64::from(world.tech_level);
    }

    fn averages(&self, runs: u32) -> AttributeAverages {
        AttributeAverages {
            runs,
            size: mean(self.size, self.count),
            atmosphere: mean(self.atmosphere, self.count),
            temperature: mean(self.temperature, self.count),
            hydrographics: mean(self.hydrographics, self.count),
            population: mean(self.population, self.count),
            government: mean(self.government, self.count),
            law_level: mean(self.law_level, self.count),
            starport: mean(self.starport, self.count),
            tech_level: mean(self.tech_level, self.count),
        }
    }
}

/// Generate `runs` worlds and average their attributes.
///
/// Temperature averages include the no-atmosphere sentinel as rolled.
#[must_use]
pub fn run_debug(scheme: &GeneratorScheme, runs: u32, dice: &mut dyn Dice) -> AttributeAverages {
    let mut totals = Totals::default();
    for _ in 0..runs {
        let world = generate_world(scheme, dice);
        totals.add(&world);
    }
    log::info!("averaged {runs} worlds");
    totals.averages(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::RollStream;

    #[test]
    fn averages_land_inside_bounds() {
        let mut dice = RollStream::seeded(7);
        let stats = run_debug(GeneratorScheme::standard(), 500, &mut dice);
        assert_eq!(stats.runs, 500);
        // 2D-2 centres on 5
        assert!((4.0..=6.0).contains(&stats.size), "size {}", stats.size);
        assert!((4.0..=6.0).contains(&stats.population));
        assert!((2.0..=11.0).contains(&stats.starport));
        assert!((0.0..=15.0).contains(&stats.tech_level));
    }

    #[test]
    fn zero_runs_report_zero() {
        let mut dice = RollStream::seeded(1);
        let stats = run_debug(GeneratorScheme::custom(), 0, &mut dice);
        assert_eq!(stats, AttributeAverages::default());
    }
}
