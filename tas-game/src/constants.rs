//! Rule-book constants shared by world generation and trade.
//!
//! Attribute bounds and sentinels live here so every step and every consumer
//! reads the same limits.

use crate::bounds::AttributeBounds;

// Attribute bounds ---------------------------------------------------------
pub const SIZE_BOUNDS: AttributeBounds = AttributeBounds::new(0, 10);
pub const ATMOSPHERE_BOUNDS: AttributeBounds = AttributeBounds::new(0, 15);
pub const TEMPERATURE_BOUNDS: AttributeBounds = AttributeBounds::new(2, 12);
pub const HYDROGRAPHICS_BOUNDS: AttributeBounds = AttributeBounds::new(0, 10);
pub const POPULATION_BOUNDS: AttributeBounds = AttributeBounds::new(0, 12);
pub const GOVERNMENT_BOUNDS: AttributeBounds = AttributeBounds::new(0, 15);
pub const LAW_BOUNDS: AttributeBounds = AttributeBounds::new(0, 9);
pub const STARPORT_BOUNDS: AttributeBounds = AttributeBounds::new(2, 11);
pub const TECH_BOUNDS: AttributeBounds = AttributeBounds::new(0, 15);
pub const FACTION_STYLE_BOUNDS: AttributeBounds = AttributeBounds::new(0, 15);

// Sentinels ----------------------------------------------------------------
/// Temperature recorded for worlds with no meaningful atmosphere.
pub const NO_ATMOSPHERE_TEMPERATURE: i32 = -1;
/// Culture recorded for uninhabited worlds.
pub const NO_CULTURE: i32 = 0;
pub const DEFAULT_WORLD_NAME: &str = "UNK";
pub const DEFAULT_HEX_LOCATION: &str = "0000";
pub const CREDITS_ABBREVIATION: &str = "CR";

// Trade --------------------------------------------------------------------
pub const COMMON_GOODS_MIN: i32 = 11;
pub const COMMON_GOODS_MAX: i32 = 16;
/// Broker skill assumed for the other side of every speculative deal.
pub const ASSUMED_BROKER_SKILL: i32 = 2;
pub const AMBER_ZONE_TAG: &str = "Amber Zone";
pub const RED_ZONE_TAG: &str = "Red Zone";

// Subsector ----------------------------------------------------------------
pub const SUBSECTOR_COLUMNS: u8 = 8;
pub const SUBSECTOR_ROWS: u8 = 10;
/// A hex holds a world when 1D meets this target.
pub const WORLD_PRESENCE_TARGET: i32 = 4;
/// A world has a gas giant when 2D stays below this value.
pub const GAS_GIANT_CEILING: i32 = 10;

// Run limits ---------------------------------------------------------------
pub const MAX_WORLDS_PER_RUN: u16 = 1000;
pub const DEBUG_RUNS: u32 = 10_000;
pub const MAX_DEBUG_RUNS: u32 = 100_000;
