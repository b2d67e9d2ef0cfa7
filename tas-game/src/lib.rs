//! TAS rules engine
//!
//! Platform-agnostic world generation and trade calculations for a 2D6
//! science-fiction role-playing game. This crate has no I/O of its own:
//! reference tables arrive through a [`DataLoader`] and every roll goes
//! through a [`Dice`] implementation.

pub mod bounds;
pub mod constants;
pub mod dice;
pub mod dm;
pub mod numbers;
pub mod sector;
pub mod summary;
pub mod tables;
pub mod trade;
pub mod world;

pub use bounds::{AttributeBounds, HexError, bound_to, hex_as_int, int_as_hex};
pub use dice::{Dice, LoadedDice, RollStream, derive_stream_seed};
pub use dm::{Predicate, adjust_dm, adjust_starport_dm, adjust_zone_dm};
pub use sector::{Subsector, SubsectorWorld, WorldNames, generate_subsector, polish_names};
pub use summary::WorldSummary;
pub use tables::{DataError, EmbeddedData, WorldSource};
pub use trade::{
    CharacterData, FreightCoreDm, GoodsClass, ParsedTradeFacts, SpeculativeTradeLot,
    SpeculativeTradeSummary, StandardTradeModifiers, TradeError, TradeFacts, TradeFactsError,
    TradeGood, TradeGoodsTable, Transaction, WorldTradeInfo, generate_speculative_trade,
    generate_standard_trade,
};
pub use world::{
    BaseKind, Faction, GenerationStep, GeneratorScheme, HabitabilityZone, SchemeBuilder,
    SchemeError, SchemeKind, StarportInfo, TradeCode, TravelZone, WorldDefinition,
    generate_world,
};

/// Trait for abstracting reference data loading.
/// Front ends provide the storage; the engine only names the tables.
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load and parse one named JSON table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;

    /// Load every world description table.
    ///
    /// # Errors
    ///
    /// Returns an error if any table fails to load or lacks a required entry.
    fn load_world_source(&self) -> Result<WorldSource, Self::Error>
    where
        Self::Error: From<DataError>,
    {
        WorldSource::load(self)
    }

    /// Load the speculative trade goods table.
    ///
    /// # Errors
    ///
    /// Returns an error if the goods table fails to load or is incomplete.
    fn load_trade_goods(&self) -> Result<TradeGoodsTable, Self::Error>
    where
        Self::Error: From<DataError>,
    {
        TradeGoodsTable::load(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FixtureLoader {
        tables: HashMap<String, String>,
    }

    impl FixtureLoader {
        fn with_embedded() -> Self {
            let mut tables = HashMap::new();
            for name in tables::WORLD_TABLE_FILES
                .into_iter()
                .chain([trade::goods::TRADE_GOODS_FILE])
            {
                let raw = EmbeddedData::asset(name).expect("embedded asset");
                tables.insert(name.to_string(), raw.to_string());
            }
            Self { tables }
        }
    }

    impl DataLoader for FixtureLoader {
        type Error = DataError;

        fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
        where
            T: serde::de::DeserializeOwned,
        {
            let raw = self
                .tables
                .get(config_name)
                .ok_or_else(|| DataError::MissingAsset(config_name.to_string()))?;
            serde_json::from_str(raw).map_err(|source| DataError::Json {
                table: config_name.to_string(),
                source,
            })
        }
    }

    #[test]
    fn fixture_loader_serves_every_table() {
        let loader = FixtureLoader::with_embedded();
        let source = loader.load_world_source().expect("world tables");
        assert_eq!(source.starports.len(), 10);
        let goods = loader.load_trade_goods().expect("goods table");
        assert_eq!(goods.len(), 36);
    }

    #[test]
    fn missing_table_is_reported_by_name() {
        let loader = FixtureLoader::default();
        let err = loader.load_world_source().expect_err("no tables loaded");
        assert!(matches!(err, DataError::MissingAsset(ref name) if name == tables::TECH_LEVELS_FILE));
    }

    #[test]
    fn broken_table_names_the_file() {
        let mut loader = FixtureLoader::with_embedded();
        loader
            .tables
            .insert(tables::SIZES_FILE.to_string(), "{\"entries\": 7}".to_string());
        let err = loader.load_world_source().expect_err("sizes table is broken");
        assert!(err.to_string().contains(tables::SIZES_FILE), "{err}");
    }
}
