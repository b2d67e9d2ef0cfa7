//! World generation: the data model, the scheme registry and the pipeline
//! that runs the fifteen derivation steps.

mod custom;
pub mod pipeline;
pub mod scheme;
mod standard;
pub mod stats;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{NO_ATMOSPHERE_TEMPERATURE, NO_CULTURE};

pub use pipeline::generate_world;
pub use scheme::{GenerationStep, GeneratorScheme, SchemeBuilder, SchemeError, SchemeKind, StepFn};
pub use stats::{AttributeAverages, run_debug};

/// Starport record derived by the starport and highport steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StarportInfo {
    pub value: i32,
    pub has_highport: bool,
    pub berthing_cost: i32,
}

/// Group opposing the primary government.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Faction {
    pub government_style: i32,
    pub relative_strength: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseKind {
    Corsair,
    Scout,
    Military,
    Naval,
}

impl BaseKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Corsair => "corsair",
            Self::Scout => "scout",
            Self::Military => "military",
            Self::Naval => "naval",
        }
    }

    /// Capital initial used in the world profile.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Corsair => 'C',
            Self::Scout => 'S',
            Self::Military => 'M',
            Self::Naval => 'N',
        }
    }
}

/// Trade classifications derived from the finished world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TradeCode {
    Agricultural,
    Asteroid,
    Barren,
    Desert,
    FluidOceans,
    Garden,
    HighPopulation,
    HighTech,
    IceCapped,
    Industrial,
    LowPopulation,
    LowTech,
    NonAgricultural,
    NonIndustrial,
    Poor,
    Rich,
    Vacuum,
    Waterworld,
}

impl TradeCode {
    pub const ALL: [Self; 18] = [
        Self::Agricultural,
        Self::Asteroid,
        Self::Barren,
        Self::Desert,
        Self::FluidOceans,
        Self::Garden,
        Self::HighPopulation,
        Self::HighTech,
        Self::IceCapped,
        Self::Industrial,
        Self::LowPopulation,
        Self::LowTech,
        Self::NonAgricultural,
        Self::NonIndustrial,
        Self::Poor,
        Self::Rich,
        Self::Vacuum,
        Self::Waterworld,
    ];

    /// Name used by the trade-code reference table.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Agricultural => "agricultural",
            Self::Asteroid => "asteroid",
            Self::Barren => "barren",
            Self::Desert => "desert",
            Self::FluidOceans => "fluid oceans",
            Self::Garden => "garden",
            Self::HighPopulation => "high population",
            Self::HighTech => "high tech",
            Self::IceCapped => "ice-capped",
            Self::Industrial => "industrial",
            Self::LowPopulation => "low population",
            Self::LowTech => "low tech",
            Self::NonAgricultural => "non-agricultural",
            Self::NonIndustrial => "non-industrial",
            Self::Poor => "poor",
            Self::Rich => "rich",
            Self::Vacuum => "vacuum",
            Self::Waterworld => "waterworld",
        }
    }

    /// Two-letter code as printed in profiles (`AG`, `HT`, ...).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Agricultural => "AG",
            Self::Asteroid => "AS",
            Self::Barren => "BA",
            Self::Desert => "DE",
            Self::FluidOceans => "FL",
            Self::Garden => "GA",
            Self::HighPopulation => "HI",
            Self::HighTech => "HT",
            Self::IceCapped => "IC",
            Self::Industrial => "IN",
            Self::LowPopulation => "LO",
            Self::LowTech => "LT",
            Self::NonAgricultural => "NA",
            Self::NonIndustrial => "NI",
            Self::Poor => "PO",
            Self::Rich => "RI",
            Self::Vacuum => "VA",
            Self::Waterworld => "WA",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code().eq_ignore_ascii_case(code))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelZone {
    #[default]
    Green,
    Amber,
    Red,
}

impl TravelZone {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }

    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Green => 'G',
            Self::Amber => 'A',
            Self::Red => 'R',
        }
    }
}

/// Position within the star's habitable band, from the temperature step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HabitabilityZone {
    ExtremeCold,
    Cold,
    #[default]
    Standard,
    Hot,
    ExtremeHot,
}

impl HabitabilityZone {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ExtremeCold => "extreme cold",
            Self::Cold => "cold",
            Self::Standard => "standard",
            Self::Hot => "hot",
            Self::ExtremeHot => "extreme hot",
        }
    }
}

/// Everything the pipeline derives for one world.
///
/// A fresh value is owned by [`generate_world`] for the length of a run;
/// each step writes only its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorldDefinition {
    pub starport: StarportInfo,
    pub size: i32,
    pub atmosphere: i32,
    pub hydrographics: i32,
    pub population: i32,
    pub government: i32,
    pub law_level: i32,
    pub tech_level: i32,
    pub bases: SmallVec<[BaseKind; 4]>,
    pub trade_codes: SmallVec<[TradeCode; 8]>,
    pub travel_zone: TravelZone,
    pub temperature: i32,
    pub habitability_zone: HabitabilityZone,
    pub factions: Vec<Faction>,
    pub culture: i32,
}

impl Default for WorldDefinition {
    fn default() -> Self {
        Self {
            starport: StarportInfo::default(),
            size: 0,
            atmosphere: 0,
            hydrographics: 0,
            population: 0,
            government: 0,
            law_level: 0,
            tech_level: 0,
            bases: SmallVec::new(),
            trade_codes: SmallVec::new(),
            travel_zone: TravelZone::Green,
            temperature: NO_ATMOSPHERE_TEMPERATURE,
            habitability_zone: HabitabilityZone::Standard,
            factions: Vec::new(),
            culture: NO_CULTURE,
        }
    }
}

impl WorldDefinition {
    #[must_use]
    pub const fn is_uninhabited(&self) -> bool {
        self.population == 0
    }

    #[must_use]
    pub fn has_trade_code(&self, code: TradeCode) -> bool {
        self.trade_codes.contains(&code)
    }
}
