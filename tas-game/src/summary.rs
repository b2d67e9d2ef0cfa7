//! Printable summary of a generated world.
//!
//! The compact profile reads `Name Hex SSAHPGL-T bases codes zone`, e.g.
//! `Corgi 0101 CA6A643-9 N RI WA A`: starport, size, atmosphere,
//! hydrographics, population, government and law as single hex digits,
//! then tech level after the dash. Base initials run together, trade codes
//! are space separated and a green zone is left out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bounds::int_as_hex;
use crate::constants::{CREDITS_ABBREVIATION, DEFAULT_HEX_LOCATION, DEFAULT_WORLD_NAME};
use crate::tables::{
    ATMOSPHERES_FILE, CULTURES_FILE, DataError, FACTION_STRENGTHS_FILE, GOVERNMENTS_FILE,
    GovernmentEntry, HYDROGRAPHICS_FILE, LAW_LEVELS_FILE, POPULATIONS_FILE, SIZES_FILE,
    STARPORTS_FILE, TECH_LEVELS_FILE, TEMPERATURES_FILE, WorldSource,
};
use crate::world::{TravelZone, WorldDefinition};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StarportDetails {
    pub quality: String,
    pub fuel: String,
    pub facilities: String,
    pub has_highport: bool,
    pub berthing_cost: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SizeDetails {
    pub diameter: String,
    pub gravity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AtmosphereDetails {
    pub composition: String,
    pub pressure: String,
    pub gear_required: String,
    pub temperature_classification: String,
    pub average_temperature: String,
    pub temperature_description: String,
    pub habitability_zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HydrographicsDetails {
    pub percentage: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GovernmentDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub example: String,
    pub contraband: String,
}

impl From<&GovernmentEntry> for GovernmentDetails {
    fn from(entry: &GovernmentEntry) -> Self {
        Self {
            kind: entry.kind.clone(),
            description: entry.description.clone(),
            example: entry.example.clone(),
            contraband: entry.contraband.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FactionDetails {
    pub government: char,
    pub relative_strength: String,
    pub government_details: GovernmentDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CultureDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LawDetails {
    pub banned_weapons: String,
    pub banned_armour: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TechDetails {
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BaseDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Table text for every coded attribute, plus the long description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtendedData {
    pub starport: StarportDetails,
    pub size: SizeDetails,
    pub atmosphere: AtmosphereDetails,
    pub hydrographics: HydrographicsDetails,
    pub population: String,
    pub government: GovernmentDetails,
    pub factions: Vec<FactionDetails>,
    pub culture: CultureDetails,
    pub law_level: LawDetails,
    pub tech_level: TechDetails,
    pub bases: Vec<BaseDetails>,
    pub long_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorldSummary {
    pub uwp: String,
    pub name: String,
    pub hex_location: String,
    pub starport: String,
    pub size: char,
    pub atmosphere: char,
    pub hydrographics: char,
    pub population: char,
    pub government: char,
    pub law_level: char,
    pub tech_level: char,
    pub bases: Vec<char>,
    pub trade_codes: Vec<String>,
    pub travel_zone: TravelZone,
    pub extended_data: ExtendedData,
}

/// Single hex digit for a bounded attribute; `?` marks a value no table covers.
fn hex(value: i32) -> char {
    int_as_hex(value).unwrap_or_else(|err| {
        log::warn!("{err}");
        '?'
    })
}

fn lookup<'a, T>(
    map: &'a BTreeMap<i32, T>,
    table: &'static str,
    key: i32,
) -> Result<&'a T, DataError> {
    map.get(&key).ok_or_else(|| DataError::MissingEntry {
        table,
        key: key.to_string(),
    })
}

impl WorldSummary {
    /// Resolve every coded attribute of `world` against the reference tables.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingEntry`] if a table lacks a value the world
    /// carries.
    pub fn build(world: &WorldDefinition, source: &WorldSource) -> Result<Self, DataError> {
        log::info!("building world summary");
        let starport = lookup(&source.starports, STARPORTS_FILE, world.starport.value)?;
        let size = lookup(&source.sizes, SIZES_FILE, world.size)?;
        let atmosphere = lookup(&source.atmospheres, ATMOSPHERES_FILE, world.atmosphere)?;
        let temperature = lookup(&source.temperatures, TEMPERATURES_FILE, world.temperature)?;
        let hydrographics = lookup(
            &source.hydrographics,
            HYDROGRAPHICS_FILE,
            world.hydrographics,
        )?;
        let population = lookup(&source.populations, POPULATIONS_FILE, world.population)?;
        let government = lookup(&source.governments, GOVERNMENTS_FILE, world.government)?;
        let culture = lookup(&source.cultures, CULTURES_FILE, world.culture)?;
        let law = lookup(&source.law_levels, LAW_LEVELS_FILE, world.law_level)?;
        let tech = lookup(&source.tech_levels, TECH_LEVELS_FILE, world.tech_level)?;

        let factions = world
            .factions
            .iter()
            .map(|faction| {
                let style = lookup(&source.governments, GOVERNMENTS_FILE, faction.government_style)?;
                let strength = lookup(
                    &source.faction_strengths,
                    FACTION_STRENGTHS_FILE,
                    faction.relative_strength,
                )?;
                Ok(FactionDetails {
                    government: hex(faction.government_style),
                    relative_strength: strength.relative_strength.clone(),
                    government_details: style.into(),
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        let bases = world
            .bases
            .iter()
            .map(|base| BaseDetails {
                kind: base.key().to_string(),
                description: source
                    .bases
                    .get(base.key())
                    .map(|entry| entry.description.clone())
                    .unwrap_or_default(),
            })
            .collect();

        let extended_data = ExtendedData {
            starport: StarportDetails {
                quality: starport.quality.clone(),
                fuel: starport.fuel.clone(),
                facilities: starport.facilities.clone(),
                has_highport: world.starport.has_highport,
                berthing_cost: format!("{}{CREDITS_ABBREVIATION}", world.starport.berthing_cost),
            },
            size: SizeDetails {
                diameter: size.diameter.clone(),
                gravity: size.gravity.clone(),
            },
            atmosphere: AtmosphereDetails {
                composition: atmosphere.composition.clone(),
                pressure: atmosphere.pressure.clone(),
                gear_required: atmosphere.gear_required.clone(),
                temperature_classification: temperature.kind.clone(),
                average_temperature: temperature.average_temperature.clone(),
                temperature_description: temperature.description.clone(),
                habitability_zone: world.habitability_zone.key().to_string(),
            },
            hydrographics: HydrographicsDetails {
                percentage: hydrographics.percentage.clone(),
                description: hydrographics.description.clone(),
            },
            population: population.inhabitants.clone(),
            government: government.into(),
            factions,
            culture: CultureDetails {
                kind: culture.kind.clone(),
                description: culture.description.clone(),
            },
            law_level: LawDetails {
                banned_weapons: law.banned_weapons.clone(),
                banned_armour: law.banned_armour.clone(),
            },
            tech_level: TechDetails {
                category: tech.category.clone(),
                description: tech.description.clone(),
            },
            bases,
            long_description: String::new(),
        };

        let mut summary = Self {
            uwp: String::new(),
            name: DEFAULT_WORLD_NAME.to_string(),
            hex_location: DEFAULT_HEX_LOCATION.to_string(),
            starport: starport.code.clone(),
            size: hex(world.size),
            atmosphere: hex(world.atmosphere),
            hydrographics: hex(world.hydrographics),
            population: hex(world.population),
            government: hex(world.government),
            law_level: hex(world.law_level),
            tech_level: hex(world.tech_level),
            bases: world.bases.iter().map(|base| base.initial()).collect(),
            trade_codes: world
                .trade_codes
                .iter()
                .map(|code| source.trade_code_abbreviation(*code))
                .collect(),
            travel_zone: world.travel_zone,
            extended_data,
        };
        summary.uwp = summary.to_uwp();
        summary.extended_data.long_description = summary.long_description();
        log::info!("world summary complete: {}", summary.uwp);
        Ok(summary)
    }

    /// Give the world a name and map position.
    #[must_use]
    pub fn with_identity(mut self, name: impl Into<String>, hex_location: impl Into<String>) -> Self {
        self.name = name.into();
        self.hex_location = hex_location.into();
        self.uwp = self.to_uwp();
        self
    }

    /// The `SSAHPGL-T` block of the profile.
    #[must_use]
    pub fn profile(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}-{}",
            self.starport,
            self.size,
            self.atmosphere,
            self.hydrographics,
            self.population,
            self.government,
            self.law_level,
            self.tech_level
        )
    }

    #[must_use]
    pub fn to_uwp(&self) -> String {
        let mut uwp = format!("{} {} {}", self.name, self.hex_location, self.profile());
        if !self.bases.is_empty() {
            uwp.push(' ');
            uwp.extend(self.bases.iter());
        }
        for code in &self.trade_codes {
            uwp.push(' ');
            uwp.push_str(code);
        }
        if self.travel_zone != TravelZone::Green {
            uwp.push(' ');
            uwp.push(self.travel_zone.initial());
        }
        uwp
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.profile())
    }

    #[must_use]
    pub fn long_file_name(&self) -> String {
        format!("{} {} {}.json", self.hex_location, self.name, self.profile())
    }

    fn long_description(&self) -> String {
        let data = &self.extended_data;
        let mut text = Description::default();

        text.heading(format!("Starport: {}", self.starport));
        text.line(1, "Quality", &data.starport.quality);
        text.line(1, "Berthing cost", &data.starport.berthing_cost);
        text.line(1, "Fuel", &data.starport.fuel);
        text.line(1, "Facilities", &data.starport.facilities);
        text.line(1, "Highport", if data.starport.has_highport { "yes" } else { "no" });
        text.line(1, "Travel zone", self.travel_zone.key());
        if !data.bases.is_empty() {
            text.line(1, "Bases", &data.bases.len().to_string());
            for base in &data.bases {
                text.line(2, &base.kind, &base.description);
            }
        }

        text.heading(format!("Size: {}", self.size));
        text.line(1, "Diameter", &data.size.diameter);
        text.line(1, "Gravity", &data.size.gravity);

        text.heading(format!("Atmosphere: {}", self.atmosphere));
        text.line(1, "Composition", &data.atmosphere.composition);
        text.line(1, "Pressure", &data.atmosphere.pressure);
        text.line(1, "Gear required", &data.atmosphere.gear_required);
        text.line(1, "Temperature", &data.atmosphere.temperature_classification);
        text.line(1, "Average temperature", &data.atmosphere.average_temperature);
        text.line(1, "Climate", &data.atmosphere.temperature_description);
        text.line(1, "Habitability zone", &data.atmosphere.habitability_zone);

        text.heading(format!("Hydrographics: {}", self.hydrographics));
        text.line(1, "Surface liquid", &data.hydrographics.percentage);
        text.line(1, "Description", &data.hydrographics.description);

        text.heading(format!("Population: {}", self.population));
        text.line(1, "Inhabitants", &data.population);
        text.line(1, "Culture", &data.culture.kind);
        text.line(1, "Cultural influence", &data.culture.description);

        text.heading(format!("Government: {}", self.government));
        text.government(1, &data.government);
        if !data.factions.is_empty() {
            text.line(1, "Opposing factions", &data.factions.len().to_string());
            for (idx, faction) in data.factions.iter().enumerate() {
                text.line(2, &format!("Faction {}", idx + 1), &faction.government.to_string());
                text.line(3, "Strength", &faction.relative_strength);
                text.government(3, &faction.government_details);
            }
        }

        text.heading(format!("Law level: {}", self.law_level));
        text.line(1, "Banned weapons", &data.law_level.banned_weapons);
        text.line(1, "Banned armour", &data.law_level.banned_armour);

        text.heading(format!("Tech level: {}", self.tech_level));
        text.line(1, "Category", &data.tech_level.category);
        text.line(1, "Description", &data.tech_level.description);

        if !self.trade_codes.is_empty() {
            text.heading(format!("Trade codes: {}", self.trade_codes.join(" ")));
        }
        text.finish()
    }
}

#[derive(Default)]
struct Description {
    lines: Vec<String>,
}

impl Description {
    fn heading(&mut self, title: String) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(title);
    }

    fn line(&mut self, depth: usize, label: &str, value: &str) {
        self.lines.push(format!("{}{label}: {value}", "  ".repeat(depth)));
    }

    fn government(&mut self, depth: usize, details: &GovernmentDetails) {
        self.line(depth, "Type", &details.kind);
        self.line(depth, "Description", &details.description);
        self.line(depth, "Examples", &details.example);
        self.line(depth, "Contraband", &details.contraband);
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
