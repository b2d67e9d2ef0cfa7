//! Trade calculations: speculative cargo lots and the standard passenger,
//! freight and mail modifiers.

pub mod facts;
pub mod goods;
pub mod speculative;
pub mod standard;

use thiserror::Error;

pub use facts::{
    CharacterData, ParseWarning, ParsedTradeFacts, TradeFacts, TradeFactsError, ValidationProblem,
    WorldEntry, WorldTradeInfo,
};
pub use goods::{GoodsClass, TradeDm, TradeGood, TradeGoodsTable};
pub use speculative::{
    SpeculativeTradeLot, SpeculativeTradeSummary, Transaction, generate_speculative_trade,
};
pub use standard::{
    CargoKind, FreightCoreDm, PassageKind, StandardTradeModifiers, generate_standard_trade,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("the {role} world '{name}' is not defined in the trade data")]
    UnknownWorld { role: &'static str, name: String },
    #[error("unknown transaction '{0}' (expected 'buy' or 'sell')")]
    UnknownTransaction(String),
}
