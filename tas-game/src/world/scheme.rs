//! Generation step registry.
//!
//! A [`GeneratorScheme`] maps every [`GenerationStep`] to the function that
//! derives it. Schemes are immutable once built; alternative rule sets are
//! produced with [`SchemeBuilder`] by starting from the standard table and
//! replacing individual entries, so step order never changes.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{WorldDefinition, custom, standard};
use crate::dice::Dice;

/// Signature shared by every derivation step.
pub type StepFn = fn(&mut WorldDefinition, &mut dyn Dice);

/// The fifteen derivation steps, declared in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStep {
    Size,
    Atmosphere,
    Temperature,
    Hydrographics,
    Population,
    Government,
    Factions,
    Culture,
    LawLevel,
    Starport,
    TechLevel,
    Highport,
    Bases,
    TravelZone,
    TradeCodes,
}

pub const STEP_COUNT: usize = 15;

impl GenerationStep {
    /// Execution order. Later steps read what earlier steps wrote.
    pub const ORDER: [Self; STEP_COUNT] = [
        Self::Size,
        Self::Atmosphere,
        Self::Temperature,
        Self::Hydrographics,
        Self::Population,
        Self::Government,
        Self::Factions,
        Self::Culture,
        Self::LawLevel,
        Self::Starport,
        Self::TechLevel,
        Self::Highport,
        Self::Bases,
        Self::TravelZone,
        Self::TradeCodes,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Atmosphere => "atmosphere",
            Self::Temperature => "temperature",
            Self::Hydrographics => "hydrographics",
            Self::Population => "population",
            Self::Government => "government",
            Self::Factions => "factions",
            Self::Culture => "culture",
            Self::LawLevel => "law-level",
            Self::Starport => "starport",
            Self::TechLevel => "tech-level",
            Self::Highport => "highport",
            Self::Bases => "bases",
            Self::TravelZone => "travel-zone",
            Self::TradeCodes => "trade-codes",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    #[error("unknown generation scheme '{0}' (expected 'standard' or 'custom')")]
    Unknown(String),
}

/// Named rule sets the registry can build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeKind {
    #[default]
    Standard,
    /// Standard rules with the airless-water-world and tech-floor fixes.
    Custom,
}

impl SchemeKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SchemeKind {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "standard" => Ok(Self::Standard),
            "custom" => Ok(Self::Custom),
            _ => Err(SchemeError::Unknown(s.to_string())),
        }
    }
}

/// One registered step: the function plus the name of the rule set that
/// supplied it.
#[derive(Debug, Clone, Copy)]
pub struct StepImpl {
    pub origin: &'static str,
    pub run: StepFn,
}

/// Immutable step table.
#[derive(Debug, Clone)]
pub struct GeneratorScheme {
    kind: SchemeKind,
    steps: [StepImpl; STEP_COUNT],
}

impl GeneratorScheme {
    /// The rule-book scheme.
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<GeneratorScheme> = OnceLock::new();
        STANDARD.get_or_init(|| SchemeBuilder::standard().build())
    }

    /// Standard scheme with the custom hydrographics and tech-level steps.
    #[must_use]
    pub fn custom() -> &'static Self {
        static CUSTOM: OnceLock<GeneratorScheme> = OnceLock::new();
        CUSTOM.get_or_init(|| {
            SchemeBuilder::from_scheme(Self::standard())
                .kind(SchemeKind::Custom)
                .with_step(GenerationStep::Hydrographics, custom::ORIGIN, custom::hydrographics)
                .with_step(GenerationStep::TechLevel, custom::ORIGIN, custom::tech_level)
                .build()
        })
    }

    #[must_use]
    pub fn for_kind(kind: SchemeKind) -> &'static Self {
        match kind {
            SchemeKind::Standard => Self::standard(),
            SchemeKind::Custom => Self::custom(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> SchemeKind {
        self.kind
    }

    /// Resolve a step to its registered implementation without running it.
    #[must_use]
    pub const fn step(&self, step: GenerationStep) -> StepImpl {
        self.steps[step.index()]
    }

    /// Steps paired with their implementations, in execution order.
    pub fn ordered(&self) -> impl Iterator<Item = (GenerationStep, StepImpl)> + '_ {
        GenerationStep::ORDER
            .into_iter()
            .map(|step| (step, self.step(step)))
    }
}

/// Assembles a [`GeneratorScheme`]. Always starts from a complete table.
#[derive(Debug, Clone)]
pub struct SchemeBuilder {
    kind: SchemeKind,
    steps: [StepImpl; STEP_COUNT],
}

impl SchemeBuilder {
    #[must_use]
    pub fn standard() -> Self {
        let steps = GenerationStep::ORDER.map(|step| StepImpl {
            origin: standard::ORIGIN,
            run: standard::step_fn(step),
        });
        Self {
            kind: SchemeKind::Standard,
            steps,
        }
    }

    #[must_use]
    pub fn from_scheme(scheme: &GeneratorScheme) -> Self {
        Self {
            kind: scheme.kind,
            steps: scheme.steps,
        }
    }

    #[must_use]
    pub const fn kind(mut self, kind: SchemeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace one entry; every other step keeps its current function.
    #[must_use]
    pub fn with_step(mut self, step: GenerationStep, origin: &'static str, run: StepFn) -> Self {
        self.steps[step.index()] = StepImpl { origin, run };
        self
    }

    #[must_use]
    pub fn build(self) -> GeneratorScheme {
        GeneratorScheme {
            kind: self.kind,
            steps: self.steps,
        }
    }
}
