use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use tas_game::{
    DataLoader, ParsedTradeFacts, SpeculativeTradeSummary, StandardTradeModifiers, TradeFacts,
    Transaction, generate_speculative_trade, generate_standard_trade,
};

use super::RunContext;
use crate::output::timestamp;

fn load_facts(ctx: &RunContext, file: &str) -> Result<ParsedTradeFacts> {
    let text = ctx.loader.read_text(file)?;
    let facts = TradeFacts::from_json(&text).with_context(|| format!("failed to read {file}"))?;
    facts
        .parse()
        .with_context(|| format!("trade data in {file} is not usable"))
}

pub fn run_standard(
    ctx: &RunContext,
    from: &str,
    to: &str,
    file: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let facts = load_facts(ctx, file)?;
    let mut dice = ctx.dice("trade");
    let modifiers = generate_standard_trade(&facts, from, to, &mut dice)?;
    render_standard(out, &modifiers)?;
    ctx.json
        .write(None, &modifiers.file_name(&timestamp()), &modifiers)?;
    Ok(())
}

pub fn render_standard(out: &mut dyn Write, modifiers: &StandardTradeModifiers) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!(
            "Standard trade from {} to {}",
            modifiers.from_world, modifiers.to_world
        )
        .bold()
    )?;

    writeln!(out)?;
    writeln!(out, "{}", "Passengers".cyan())?;
    for passage in &modifiers.passenger_trade.dms {
        writeln!(out, "  {:<10} DM {:+}", passage.kind.key(), passage.dm)?;
        writeln!(out, "    {}", passage.requirements)?;
    }
    for note in &modifiers.passenger_trade.notes {
        writeln!(out, "  {note}")?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Freight".cyan())?;
    for cargo in &modifiers.freight_trade.dms {
        writeln!(out, "  {:<10} DM {:+}", cargo.lot_type.key(), cargo.dm)?;
    }
    for note in &modifiers.freight_trade.notes {
        writeln!(out, "  {note}")?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Mail".cyan())?;
    writeln!(out, "  DM {:+}", modifiers.mail_trade.dm)?;
    writeln!(out, "  Lots available: {}", modifiers.mail_trade.lots_avail)?;
    for note in &modifiers.mail_trade.notes {
        writeln!(out, "  {note}")?;
    }
    Ok(())
}

pub fn run_speculative(
    ctx: &RunContext,
    world_name: &str,
    transaction: Transaction,
    file: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let facts = load_facts(ctx, file)?;
    let world = facts.world("local", world_name)?;
    let goods = ctx
        .loader
        .load_trade_goods()
        .context("failed to load trade goods")?;
    let mut dice = ctx.dice("spec");
    let summary = generate_speculative_trade(world_name, world, &goods, transaction, &mut dice);
    render_speculative(out, &summary)?;
    ctx.json
        .write(None, &summary.file_name(&timestamp()), &summary)?;
    Ok(())
}

pub fn render_speculative(out: &mut dyn Write, summary: &SpeculativeTradeSummary) -> Result<()> {
    let buying = summary.transaction_type.is_buying();
    let title = if buying {
        format!("Goods for sale on {}", summary.world)
    } else {
        format!("Prices paid for cargo on {}", summary.world)
    };
    writeln!(out, "{}", title.bold())?;
    writeln!(
        out,
        "DM to find a supplier or broker: {:+}",
        summary.find_supplier_broker
    )?;
    writeln!(out)?;

    for lot in &summary.trade_lots {
        writeln!(out, "{}", format!("Lot {}: {}", lot.lot_id, lot.kind).cyan())?;
        if buying {
            writeln!(out, "  Examples: {}", lot.example)?;
            writeln!(out, "  Tons available: {}", lot.tons_available)?;
        }
        writeln!(out, "  Base price: Cr{}", lot.base_price)?;
        let label = if buying { "Purchase DM" } else { "Sale DM" };
        writeln!(out, "  {label}: {:+}", lot.offer_price_dm)?;
    }

    writeln!(out)?;
    for note in &summary.notes {
        writeln!(out, "{note}")?;
    }
    Ok(())
}
