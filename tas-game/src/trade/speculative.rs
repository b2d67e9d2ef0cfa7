//! Speculative trade: what a world offers for sale, or what it pays for
//! whatever the crew is carrying.
//!
//! Buying generates candidate lots in two passes (goods the world qualifies
//! for, then population-many random filler picks) and consolidates them to
//! one lot per goods kind. Selling lists a price DM for every good in the
//! table because the crew's cargo is not known in advance.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TradeError;
use super::facts::WorldTradeInfo;
use super::goods::{TradeGood, TradeGoodsTable};
use crate::constants::ASSUMED_BROKER_SKILL;
use crate::dice::Dice;
use crate::numbers::usize_to_i32;

/// Which side of the deal the crew is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transaction {
    Buy,
    Sell,
}

impl Transaction {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    #[must_use]
    pub const fn is_buying(self) -> bool {
        matches!(self, Self::Buy)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Transaction {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(TradeError::UnknownTransaction(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpeculativeTradeLot {
    pub lot_id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub example: String,
    #[serde(rename = "tons-avail")]
    pub tons_available: i32,
    pub base_price: i64,
    pub offer_price_dm: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpeculativeTradeSummary {
    pub world: String,
    pub transaction_type: Transaction,
    #[serde(rename = "find-supplier-broker")]
    pub find_supplier_broker: i32,
    pub trade_lots: Vec<SpeculativeTradeLot>,
    pub notes: Vec<String>,
}

impl SpeculativeTradeSummary {
    /// JSON output file name; `timestamp` is supplied by the caller.
    #[must_use]
    pub fn file_name(&self, timestamp: &str) -> String {
        format!(
            "spectrade_{}_{}-{timestamp}.json",
            self.transaction_type.key(),
            self.world
        )
    }
}

const NOTES: [&str; 6] = [
    "Use the supplier DM above when searching for a supplier or broker. The search takes time.",
    "A hired broker adds DM+2 to price rolls and uses their own skill, for 10-20% of the order price.",
    "Price each lot with its DM, the Broker skill in use and a 3D roll against the price table.",
    "Sellers see a DM for every good because the cargo on offer is not known in advance.",
    "The opposing trader is assumed to have Broker 2, already included in each DM.",
    "Illegal goods can only change hands through roleplay or a local broker.",
];

/// Quantity modifier from the world's population.
#[must_use]
pub const fn availability_dm(population: i32) -> i32 {
    if population <= 3 {
        -3
    } else if population >= 9 {
        3
    } else {
        0
    }
}

/// DM to find a supplier or broker, by starport letter.
#[must_use]
pub fn find_supplier_dm(starport: &str) -> i32 {
    match starport {
        "A" => 6,
        "B" => 4,
        "C" => 2,
        _ => 0,
    }
}

/// Net price DM for one good on this world.
///
/// Starts from the opposing broker's assumed skill, then offsets the best
/// matching purchase DM against the best matching sale DM. Zone tags only
/// count when the crew is selling.
#[must_use]
pub fn offer_price_dm(world: &WorldTradeInfo, good: &TradeGood, transaction: Transaction) -> i32 {
    let codes = match transaction {
        Transaction::Buy => world.trade_codes.clone(),
        Transaction::Sell => world.codes_with_zones(),
    };
    let purchase = good.best_purchase_dm(&codes).unwrap_or(0);
    let sale = good.best_sale_dm(&codes).unwrap_or(0);
    match transaction {
        Transaction::Buy => ASSUMED_BROKER_SKILL + purchase - sale,
        Transaction::Sell => ASSUMED_BROKER_SKILL + sale - purchase,
    }
}

/// Roll one candidate lot. The quantity is rolled before qualification so
/// every table entry costs the same dice on the first pass.
fn roll_lot(
    world: &WorldTradeInfo,
    good: &TradeGood,
    availability: i32,
    must_qualify: bool,
    dice: &mut dyn Dice,
) -> Option<SpeculativeTradeLot> {
    let quantity = dice.sum(good.tons_dice) - availability;
    if quantity <= 0 {
        log::debug!("no {} available", good.kind);
        return None;
    }
    if must_qualify && !good.is_common() && !good.is_available_with(&world.trade_codes) {
        log::debug!("world does not qualify for {}", good.kind);
        return None;
    }
    Some(SpeculativeTradeLot {
        lot_id: 0,
        kind: good.kind.clone(),
        example: good.examples.clone(),
        tons_available: quantity * good.tons_multiplier,
        base_price: good.base_price,
        offer_price_dm: offer_price_dm(world, good, Transaction::Buy),
    })
}

/// Generate and consolidate the lots a world offers to buyers.
#[must_use]
pub fn generate_trade_lots(
    world: &WorldTradeInfo,
    goods: &TradeGoodsTable,
    dice: &mut dyn Dice,
) -> Vec<SpeculativeTradeLot> {
    let availability = availability_dm(world.population);
    let mut raw = Vec::new();

    for good in goods.iter() {
        if let Some(lot) = roll_lot(world, good, availability, true, dice) {
            raw.push(lot);
        }
    }
    log::debug!("first pass produced {} lots", raw.len());

    for _ in 0..world.population.max(0) {
        let pick = dice.d66();
        let Some(good) = goods.get(pick) else {
            log::debug!("no goods listed for {pick}");
            continue;
        };
        if let Some(lot) = roll_lot(world, good, availability, false, dice) {
            raw.push(lot);
        }
    }

    for (idx, lot) in raw.iter_mut().enumerate() {
        lot.lot_id = usize_to_i32(idx + 1);
    }
    consolidate_lots(raw)
}

/// Merge lots of the same goods kind, summing tonnage.
///
/// The merged set is ordered by the first raw lot id of each kind and then
/// renumbered from 1.
#[must_use]
pub fn consolidate_lots(raw: Vec<SpeculativeTradeLot>) -> Vec<SpeculativeTradeLot> {
    let before = raw.len();
    let mut by_kind: BTreeMap<String, SpeculativeTradeLot> = BTreeMap::new();
    for lot in raw {
        match by_kind.get_mut(&lot.kind) {
            Some(existing) => existing.tons_available += lot.tons_available,
            None => {
                by_kind.insert(lot.kind.clone(), lot);
            }
        }
    }

    let mut merged: Vec<SpeculativeTradeLot> = by_kind.into_values().collect();
    merged.sort_by_key(|lot| lot.lot_id);
    for (idx, lot) in merged.iter_mut().enumerate() {
        lot.lot_id = usize_to_i32(idx + 1);
    }
    log::debug!("consolidated {before} lots into {}", merged.len());
    merged
}

/// One entry per good, identified by its D66 value, with the sale-side DM.
#[must_use]
pub fn build_sale_table(world: &WorldTradeInfo, goods: &TradeGoodsTable) -> Vec<SpeculativeTradeLot> {
    let mut lots: Vec<SpeculativeTradeLot> = goods
        .iter()
        .map(|good| SpeculativeTradeLot {
            lot_id: good.value,
            kind: good.kind.clone(),
            example: good.examples.clone(),
            tons_available: 0,
            base_price: good.base_price,
            offer_price_dm: offer_price_dm(world, good, Transaction::Sell),
        })
        .collect();
    lots.sort_by_key(|lot| lot.lot_id);
    lots
}

#[must_use]
pub fn generate_speculative_trade(
    world_name: &str,
    world: &WorldTradeInfo,
    goods: &TradeGoodsTable,
    transaction: Transaction,
    dice: &mut dyn Dice,
) -> SpeculativeTradeSummary {
    log::info!("speculative trade ({transaction}) on {world_name}");
    let trade_lots = match transaction {
        Transaction::Buy => generate_trade_lots(world, goods, dice),
        Transaction::Sell => build_sale_table(world, goods),
    };
    log::info!("{} trade lots listed", trade_lots.len());
    SpeculativeTradeSummary {
        world: world_name.to_string(),
        transaction_type: transaction,
        find_supplier_broker: find_supplier_dm(&world.starport),
        trade_lots,
        notes: NOTES.iter().map(|note| (*note).to_string()).collect(),
    }
}
