mod commands;
mod loader;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use tas_game::{SchemeKind, Transaction};

use commands::{DEFAULT_TRADE_FILE, RunContext};
use loader::FsDataLoader;
use output::{JsonSink, OutputTarget};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Off => Self::Off,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tas", version)]
#[command(about = "World generation and trade modifiers for a 2D6 science-fiction RPG")]
struct Cli {
    /// Log verbosity (RUST_LOG overrides)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Also write results as JSON files
    #[arg(long, global = true)]
    to_file: bool,

    /// Directory holding table overrides, trade data and world names
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Directory JSON results are written to
    #[arg(long, global = true, default_value = "output")]
    output_dir: PathBuf,

    /// Seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate one or more worlds
    World {
        /// Number of worlds (1-1000)
        #[arg(default_value_t = 1)]
        count: u16,
        /// Generation rules: standard or custom
        #[arg(long, default_value = "standard")]
        scheme: SchemeKind,
        /// Print the full description of each world
        #[arg(long)]
        long: bool,
    },
    /// Report attribute averages over many generated worlds
    WorldDebug {
        #[arg(long, default_value = "standard")]
        scheme: SchemeKind,
        /// Use the larger run count
        #[arg(long)]
        max: bool,
    },
    /// Passenger, freight and mail modifiers between two worlds
    Trade {
        from: String,
        to: String,
        /// Trade data file inside the data directory
        #[arg(long, default_value = DEFAULT_TRADE_FILE)]
        file: String,
    },
    /// Speculative trade lots for buying or selling on a world
    Spec {
        world: String,
        transaction: Transaction,
        #[arg(long, default_value = DEFAULT_TRADE_FILE)]
        file: String,
    },
    /// Generate a subsector of worlds
    Sector {
        name: String,
        #[arg(long, default_value = "standard")]
        scheme: SchemeKind,
    },
    /// Dedupe and sort the world names file
    Polish,
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.into())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn announce_banner() {
    println!("{}", "TAS - Traveller Aid Software".bright_cyan().bold());
    println!("{}", "============================".cyan());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let ctx = RunContext::new(
        FsDataLoader::new(&cli.data_dir),
        JsonSink::new(cli.to_file, &cli.output_dir),
        cli.seed,
    );
    log::debug!("data directory: {}", ctx.loader.dir().display());
    if ctx.json.is_enabled() {
        log::info!("writing JSON results to {}", cli.output_dir.display());
    }

    if !matches!(cli.command, Command::Polish) {
        announce_banner();
    }

    let mut out = OutputTarget::stdout();
    let writer = out.writer();
    match cli.command {
        Command::World {
            count,
            scheme,
            long,
        } => commands::world::run(&ctx, count, scheme, long, writer)?,
        Command::WorldDebug { scheme, max } => commands::world::run_stats(&ctx, scheme, max, writer)?,
        Command::Trade { from, to, file } => {
            commands::trade::run_standard(&ctx, &from, &to, &file, writer)?;
        }
        Command::Spec {
            world,
            transaction,
            file,
        } => commands::trade::run_speculative(&ctx, &world, transaction, &file, writer)?,
        Command::Sector { name, scheme } => commands::sector::run(&ctx, &name, scheme, writer)?,
        Command::Polish => commands::polish::run(&ctx, writer)?,
    }
    out.flush_inner()?;
    Ok(())
}
