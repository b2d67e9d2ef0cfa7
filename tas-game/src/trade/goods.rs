//! Speculative trade goods table.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::DataLoader;
use crate::constants::{COMMON_GOODS_MAX, COMMON_GOODS_MIN};
use crate::tables::{DataError, EmbeddedData, parse_table};

pub const TRADE_GOODS_FILE: &str = "trade-goods.json";

/// Section of the goods table an entry was listed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoodsClass {
    #[default]
    Common,
    Advanced,
    Illegal,
}

impl GoodsClass {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Advanced => "advanced",
            Self::Illegal => "illegal",
        }
    }
}

/// Price modifier granted when a world carries `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeDm {
    pub code: String,
    #[serde(rename = "mod")]
    pub modifier: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TradeGood {
    /// D66 identifier.
    pub value: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub tons_dice: u32,
    #[serde(rename = "tons-multi")]
    pub tons_multiplier: i32,
    pub base_price: i64,
    pub examples: String,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub purchase_dms: Vec<TradeDm>,
    #[serde(default)]
    pub sale_dms: Vec<TradeDm>,
    #[serde(skip)]
    pub class: GoodsClass,
}

impl TradeGood {
    /// Common goods are offered on every world.
    #[must_use]
    pub const fn is_common(&self) -> bool {
        self.value >= COMMON_GOODS_MIN && self.value <= COMMON_GOODS_MAX
    }

    /// Whether any of the world's codes appears in this good's availability tags.
    #[must_use]
    pub fn is_available_with(&self, codes: &BTreeSet<String>) -> bool {
        self.availability.iter().any(|tag| codes.contains(tag))
    }

    /// Highest purchase DM among the codes the world carries.
    #[must_use]
    pub fn best_purchase_dm(&self, codes: &BTreeSet<String>) -> Option<i32> {
        best_match(&self.purchase_dms, codes)
    }

    /// Highest sale DM among the codes the world carries.
    #[must_use]
    pub fn best_sale_dm(&self, codes: &BTreeSet<String>) -> Option<i32> {
        best_match(&self.sale_dms, codes)
    }
}

fn best_match(dms: &[TradeDm], codes: &BTreeSet<String>) -> Option<i32> {
    dms.iter()
        .filter(|dm| codes.contains(&dm.code))
        .map(|dm| dm.modifier)
        .max()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TradeGoodsFile {
    common_goods: Vec<TradeGood>,
    advanced_goods: Vec<TradeGood>,
    illegal_goods: Vec<TradeGood>,
}

/// Goods keyed by D66 value.
#[derive(Debug, Clone, Default)]
pub struct TradeGoodsTable {
    goods: BTreeMap<i32, TradeGood>,
}

impl TradeGoodsTable {
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or lists a value twice.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Self::from_file(parse_table(TRADE_GOODS_FILE, json)?)
    }

    fn from_file(file: TradeGoodsFile) -> Result<Self, DataError> {
        let sections = [
            (GoodsClass::Common, file.common_goods),
            (GoodsClass::Advanced, file.advanced_goods),
            (GoodsClass::Illegal, file.illegal_goods),
        ];
        let mut goods = BTreeMap::new();
        for (class, entries) in sections {
            for mut good in entries {
                good.class = class;
                let value = good.value;
                if goods.insert(value, good).is_some() {
                    return Err(DataError::InvalidEntry {
                        table: TRADE_GOODS_FILE,
                        reason: format!("goods value {value} is listed more than once"),
                    });
                }
            }
        }
        Ok(Self { goods })
    }

    /// Load the goods table through `loader`.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, or [`DataError::InvalidEntry`] on duplicates.
    pub fn load<L>(loader: &L) -> Result<Self, L::Error>
    where
        L: DataLoader + ?Sized,
        L::Error: From<DataError>,
    {
        let file: TradeGoodsFile = loader.load_config(TRADE_GOODS_FILE)?;
        Ok(Self::from_file(file)?)
    }

    /// # Errors
    ///
    /// Returns an error if the embedded table is malformed.
    pub fn default_table() -> Result<Self, DataError> {
        Self::load(&EmbeddedData)
    }

    /// Shared copy of the embedded table, parsed on first use.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure if the embedded table is malformed.
    pub fn embedded() -> Result<&'static Self, String> {
        static TABLE: OnceLock<Result<TradeGoodsTable, String>> = OnceLock::new();
        TABLE
            .get_or_init(|| Self::default_table().map_err(|err| err.to_string()))
            .as_ref()
            .map_err(Clone::clone)
    }

    #[must_use]
    pub fn get(&self, value: i32) -> Option<&TradeGood> {
        self.goods.get(&value)
    }

    /// Goods in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = &TradeGood> {
        self.goods.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.goods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goods.is_empty()
    }
}

impl FromIterator<TradeGood> for TradeGoodsTable {
    fn from_iter<I: IntoIterator<Item = TradeGood>>(iter: I) -> Self {
        Self {
            goods: iter.into_iter().map(|good| (good.value, good)).collect(),
        }
    }
}
