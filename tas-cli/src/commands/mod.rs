pub mod polish;
pub mod sector;
pub mod trade;
pub mod world;

use tas_game::RollStream;

use crate::loader::FsDataLoader;
use crate::output::JsonSink;

pub const DEFAULT_TRADE_FILE: &str = "trade-data.json";
pub const WORLD_NAMES_FILE: &str = "world-names.txt";

/// Shared state for one invocation.
pub struct RunContext {
    pub loader: FsDataLoader,
    pub json: JsonSink,
    seed: Option<u64>,
}

impl RunContext {
    pub const fn new(loader: FsDataLoader, json: JsonSink, seed: Option<u64>) -> Self {
        Self { loader, json, seed }
    }

    /// Dice for a command; `domain` keeps seeded commands independent.
    pub fn dice(&self, domain: &str) -> RollStream {
        match self.seed {
            Some(seed) => {
                log::info!("seeded run: {seed} ({domain})");
                RollStream::for_domain(seed, domain.as_bytes())
            }
            None => RollStream::from_entropy(),
        }
    }
}
