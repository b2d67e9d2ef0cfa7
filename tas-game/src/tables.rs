//! World description reference tables.
//!
//! Each table is a JSON document of the form `{"entries": [...]}`. The
//! defaults are embedded in the crate; front ends may serve replacements
//! through their own [`DataLoader`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DataLoader;
use crate::constants::{
    ATMOSPHERE_BOUNDS, GOVERNMENT_BOUNDS, HYDROGRAPHICS_BOUNDS, LAW_BOUNDS,
    NO_ATMOSPHERE_TEMPERATURE, NO_CULTURE, POPULATION_BOUNDS, SIZE_BOUNDS, STARPORT_BOUNDS,
    TECH_BOUNDS, TEMPERATURE_BOUNDS,
};
use crate::world::{BaseKind, TradeCode};

pub const TECH_LEVELS_FILE: &str = "tech-levels.json";
pub const ATMOSPHERES_FILE: &str = "atmospheres.json";
pub const BASES_FILE: &str = "bases.json";
pub const CULTURES_FILE: &str = "cultures.json";
pub const FACTION_STRENGTHS_FILE: &str = "faction-strengths.json";
pub const GOVERNMENTS_FILE: &str = "governments.json";
pub const HYDROGRAPHICS_FILE: &str = "hydrographics.json";
pub const LAW_LEVELS_FILE: &str = "law-levels.json";
pub const POPULATIONS_FILE: &str = "populations.json";
pub const SIZES_FILE: &str = "sizes.json";
pub const STARPORTS_FILE: &str = "starports.json";
pub const TEMPERATURES_FILE: &str = "temperatures.json";
pub const TRADE_CODES_FILE: &str = "trade-codes.json";

/// Every table [`WorldSource`] needs, in load order.
pub const WORLD_TABLE_FILES: [&str; 13] = [
    TECH_LEVELS_FILE,
    ATMOSPHERES_FILE,
    BASES_FILE,
    CULTURES_FILE,
    FACTION_STRENGTHS_FILE,
    GOVERNMENTS_FILE,
    HYDROGRAPHICS_FILE,
    LAW_LEVELS_FILE,
    POPULATIONS_FILE,
    SIZES_FILE,
    STARPORTS_FILE,
    TEMPERATURES_FILE,
    TRADE_CODES_FILE,
];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data table named '{0}'")]
    MissingAsset(String),
    #[error("failed to parse {table}: {source}")]
    Json {
        table: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{table} has no entry for {key}")]
    MissingEntry { table: &'static str, key: String },
    #[error("{table} is invalid: {reason}")]
    InvalidEntry { table: &'static str, reason: String },
}

/// Serves the tables compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedData;

impl EmbeddedData {
    /// Raw JSON of an embedded table.
    #[must_use]
    pub fn asset(name: &str) -> Option<&'static str> {
        let raw = match name {
            TECH_LEVELS_FILE => include_str!("../assets/data/tech-levels.json"),
            ATMOSPHERES_FILE => include_str!("../assets/data/atmospheres.json"),
            BASES_FILE => include_str!("../assets/data/bases.json"),
            CULTURES_FILE => include_str!("../assets/data/cultures.json"),
            FACTION_STRENGTHS_FILE => include_str!("../assets/data/faction-strengths.json"),
            GOVERNMENTS_FILE => include_str!("../assets/data/governments.json"),
            HYDROGRAPHICS_FILE => include_str!("../assets/data/hydrographics.json"),
            LAW_LEVELS_FILE => include_str!("../assets/data/law-levels.json"),
            POPULATIONS_FILE => include_str!("../assets/data/populations.json"),
            SIZES_FILE => include_str!("../assets/data/sizes.json"),
            STARPORTS_FILE => include_str!("../assets/data/starports.json"),
            TEMPERATURES_FILE => include_str!("../assets/data/temperatures.json"),
            TRADE_CODES_FILE => include_str!("../assets/data/trade-codes.json"),
            crate::trade::goods::TRADE_GOODS_FILE => {
                include_str!("../assets/data/trade-goods.json")
            }
            _ => return None,
        };
        Some(raw)
    }
}

impl DataLoader for EmbeddedData {
    type Error = DataError;

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let raw =
            Self::asset(config_name).ok_or_else(|| DataError::MissingAsset(config_name.to_string()))?;
        parse_table(config_name, raw)
    }
}

pub(crate) fn parse_table<T: DeserializeOwned>(table: &str, raw: &str) -> Result<T, DataError> {
    serde_json::from_str(raw).map_err(|source| DataError::Json {
        table: table.to_string(),
        source,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table<T> {
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TechLevelEntry {
    pub value: i32,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AtmosphereEntry {
    pub value: i32,
    pub composition: String,
    pub pressure: String,
    pub gear_required: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BaseEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CultureEntry {
    pub value: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FactionStrengthEntry {
    pub value: i32,
    pub relative_strength: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GovernmentEntry {
    pub value: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub example: String,
    pub contraband: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HydrographicsEntry {
    pub value: i32,
    pub percentage: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LawLevelEntry {
    pub value: i32,
    pub banned_weapons: String,
    pub banned_armour: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PopulationEntry {
    pub value: i32,
    pub inhabitants: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SizeEntry {
    pub value: i32,
    pub example: String,
    pub diameter: String,
    pub gravity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StarportEntry {
    pub value: i32,
    pub code: String,
    pub quality: String,
    pub fuel: String,
    pub facilities: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemperatureEntry {
    pub value: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub average_temperature: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TradeCodeEntry {
    pub name: String,
    pub abbreviation: String,
}

/// All world description tables, indexed for lookup by coded value.
#[derive(Debug, Clone, Default)]
pub struct WorldSource {
    pub tech_levels: BTreeMap<i32, TechLevelEntry>,
    pub atmospheres: BTreeMap<i32, AtmosphereEntry>,
    pub bases: BTreeMap<String, BaseEntry>,
    pub cultures: BTreeMap<i32, CultureEntry>,
    pub faction_strengths: BTreeMap<i32, FactionStrengthEntry>,
    pub governments: BTreeMap<i32, GovernmentEntry>,
    pub hydrographics: BTreeMap<i32, HydrographicsEntry>,
    pub law_levels: BTreeMap<i32, LawLevelEntry>,
    pub populations: BTreeMap<i32, PopulationEntry>,
    pub sizes: BTreeMap<i32, SizeEntry>,
    pub starports: BTreeMap<i32, StarportEntry>,
    pub temperatures: BTreeMap<i32, TemperatureEntry>,
    pub trade_codes: BTreeMap<String, TradeCodeEntry>,
}

fn by_value<T>(table: Table<T>, key: impl Fn(&T) -> i32) -> BTreeMap<i32, T> {
    table.entries.into_iter().map(|entry| (key(&entry), entry)).collect()
}

fn by_name<T>(table: Table<T>, key: impl Fn(&T) -> String) -> BTreeMap<String, T> {
    table.entries.into_iter().map(|entry| (key(&entry), entry)).collect()
}

impl WorldSource {
    /// Load and validate every table through `loader`.
    ///
    /// # Errors
    ///
    /// Returns the loader's error for unreadable tables, or a
    /// [`DataError::MissingEntry`] when a value the generator can produce has
    /// no description.
    pub fn load<L>(loader: &L) -> Result<Self, L::Error>
    where
        L: DataLoader + ?Sized,
        L::Error: From<DataError>,
    {
        log::info!("loading world source tables");
        let source = Self {
            tech_levels: by_value(loader.load_config(TECH_LEVELS_FILE)?, |e: &TechLevelEntry| e.value),
            atmospheres: by_value(loader.load_config(ATMOSPHERES_FILE)?, |e: &AtmosphereEntry| {
                e.value
            }),
            bases: by_name(loader.load_config(BASES_FILE)?, |e: &BaseEntry| e.name.clone()),
            cultures: by_value(loader.load_config(CULTURES_FILE)?, |e: &CultureEntry| e.value),
            faction_strengths: by_value(
                loader.load_config(FACTION_STRENGTHS_FILE)?,
                |e: &FactionStrengthEntry| e.value,
            ),
            governments: by_value(loader.load_config(GOVERNMENTS_FILE)?, |e: &GovernmentEntry| {
                e.value
            }),
            hydrographics: by_value(
                loader.load_config(HYDROGRAPHICS_FILE)?,
                |e: &HydrographicsEntry| e.value,
            ),
            law_levels: by_value(loader.load_config(LAW_LEVELS_FILE)?, |e: &LawLevelEntry| e.value),
            populations: by_value(loader.load_config(POPULATIONS_FILE)?, |e: &PopulationEntry| {
                e.value
            }),
            sizes: by_value(loader.load_config(SIZES_FILE)?, |e: &SizeEntry| e.value),
            starports: by_value(loader.load_config(STARPORTS_FILE)?, |e: &StarportEntry| e.value),
            temperatures: by_value(loader.load_config(TEMPERATURES_FILE)?, |e: &TemperatureEntry| {
                e.value
            }),
            trade_codes: by_name(loader.load_config(TRADE_CODES_FILE)?, |e: &TradeCodeEntry| {
                e.name.clone()
            }),
        };
        source.validate()?;
        log::info!("world source tables loaded");
        Ok(source)
    }

    /// The embedded default tables.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded table is malformed.
    pub fn default_tables() -> Result<Self, DataError> {
        Self::load(&EmbeddedData)
    }

    /// Shared copy of the embedded tables, parsed on first use.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure if an embedded table is malformed.
    pub fn embedded() -> Result<&'static Self, String> {
        static SOURCE: OnceLock<Result<WorldSource, String>> = OnceLock::new();
        SOURCE
            .get_or_init(|| Self::default_tables().map_err(|err| err.to_string()))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Check that every value the generator can produce has an entry.
    ///
    /// # Errors
    ///
    /// Returns the first missing entry found.
    pub fn validate(&self) -> Result<(), DataError> {
        require_range(&self.tech_levels, TECH_LEVELS_FILE, TECH_BOUNDS.min..=TECH_BOUNDS.max)?;
        require_range(
            &self.atmospheres,
            ATMOSPHERES_FILE,
            ATMOSPHERE_BOUNDS.min..=ATMOSPHERE_BOUNDS.max,
        )?;
        require_range(&self.governments, GOVERNMENTS_FILE, GOVERNMENT_BOUNDS.min..=GOVERNMENT_BOUNDS.max)?;
        require_range(
            &self.hydrographics,
            HYDROGRAPHICS_FILE,
            HYDROGRAPHICS_BOUNDS.min..=HYDROGRAPHICS_BOUNDS.max,
        )?;
        require_range(&self.law_levels, LAW_LEVELS_FILE, LAW_BOUNDS.min..=LAW_BOUNDS.max)?;
        require_range(
            &self.populations,
            POPULATIONS_FILE,
            POPULATION_BOUNDS.min..=POPULATION_BOUNDS.max,
        )?;
        require_range(&self.sizes, SIZES_FILE, SIZE_BOUNDS.min..=SIZE_BOUNDS.max)?;
        require_range(&self.starports, STARPORTS_FILE, STARPORT_BOUNDS.min..=STARPORT_BOUNDS.max)?;
        require_range(
            &self.temperatures,
            TEMPERATURES_FILE,
            TEMPERATURE_BOUNDS.min..=TEMPERATURE_BOUNDS.max,
        )?;
        require_range(&self.temperatures, TEMPERATURES_FILE, [NO_ATMOSPHERE_TEMPERATURE])?;
        require_range(&self.faction_strengths, FACTION_STRENGTHS_FILE, 2..=12)?;

        let d66 = (1..=6).flat_map(|tens| (1..=6).map(move |ones| tens * 10 + ones));
        require_range(&self.cultures, CULTURES_FILE, d66)?;
        require_range(&self.cultures, CULTURES_FILE, [NO_CULTURE])?;

        for base in [BaseKind::Corsair, BaseKind::Scout, BaseKind::Military, BaseKind::Naval] {
            require_name(&self.bases, BASES_FILE, base.key())?;
        }
        for code in TradeCode::ALL {
            require_name(&self.trade_codes, TRADE_CODES_FILE, code.key())?;
        }
        Ok(())
    }

    /// Printed abbreviation for a trade code, uppercased; falls back to the
    /// built-in code when the table has been overridden without it.
    #[must_use]
    pub fn trade_code_abbreviation(&self, code: TradeCode) -> String {
        self.trade_codes
            .get(code.key())
            .map_or_else(|| code.code().to_string(), |entry| entry.abbreviation.to_uppercase())
    }
}

fn require_range<T>(
    map: &BTreeMap<i32, T>,
    table: &'static str,
    keys: impl IntoIterator<Item = i32>,
) -> Result<(), DataError> {
    for key in keys {
        if !map.contains_key(&key) {
            return Err(DataError::MissingEntry {
                table,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn require_name<T>(map: &BTreeMap<String, T>, table: &'static str, key: &str) -> Result<(), DataError> {
    if map.contains_key(key) {
        Ok(())
    } else {
        Err(DataError::MissingEntry {
            table,
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_are_complete() {
        let source = WorldSource::default_tables().expect("embedded tables parse");
        assert_eq!(source.sizes.len(), 11);
        assert_eq!(source.atmospheres.len(), 16);
        assert_eq!(source.cultures.len(), 37);
        assert_eq!(source.trade_codes.len(), 18);
        assert_eq!(source.starports[&11].code, "A");
        assert_eq!(source.starports[&2].code, "X");
        assert!(WorldSource::embedded().is_ok());
    }

    #[test]
    fn abbreviations_are_uppercased() {
        let source = WorldSource::default_tables().expect("embedded tables parse");
        assert_eq!(source.trade_code_abbreviation(TradeCode::LowTech), "LT");
        assert_eq!(source.trade_code_abbreviation(TradeCode::Waterworld), "WA");

        let empty = WorldSource::default();
        assert_eq!(empty.trade_code_abbreviation(TradeCode::Garden), "GA");
    }

    #[test]
    fn validate_flags_missing_values() {
        let mut source = WorldSource::default_tables().expect("embedded tables parse");
        source.law_levels.remove(&9);
        let err = source.validate().expect_err("law level 9 missing");
        assert!(matches!(
            err,
            DataError::MissingEntry { table: LAW_LEVELS_FILE, ref key } if key == "9"
        ));
    }

    #[test]
    fn unknown_asset_is_rejected() {
        let err = EmbeddedData
            .load_config::<Table<SizeEntry>>("moons.json")
            .expect_err("no such table");
        assert!(matches!(err, DataError::MissingAsset(_)));
    }
}
