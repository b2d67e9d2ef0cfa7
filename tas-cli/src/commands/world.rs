use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use tas_game::constants::{DEBUG_RUNS, MAX_DEBUG_RUNS, MAX_WORLDS_PER_RUN};
use tas_game::world::{AttributeAverages, run_debug};
use tas_game::{DataLoader, GeneratorScheme, SchemeKind, WorldSummary, generate_world};

use super::RunContext;
use crate::output::timestamp;

/// Requested world count, with zero read as one.
pub const fn world_count(requested: u16) -> u16 {
    if requested == 0 {
        1
    } else if requested > MAX_WORLDS_PER_RUN {
        MAX_WORLDS_PER_RUN
    } else {
        requested
    }
}

pub fn run(
    ctx: &RunContext,
    count: u16,
    kind: SchemeKind,
    long: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let source = ctx
        .loader
        .load_world_source()
        .context("failed to load world tables")?;
    let scheme = GeneratorScheme::for_kind(kind);
    let mut dice = ctx.dice("world");

    for _ in 0..world_count(count) {
        let world = generate_world(scheme, &mut dice);
        let summary = WorldSummary::build(&world, &source).context("failed to summarise world")?;
        render_world(out, &summary, long)?;
        ctx.json.write(None, &summary.file_name(), &summary)?;
    }
    Ok(())
}

pub fn render_world(out: &mut dyn Write, summary: &WorldSummary, long: bool) -> Result<()> {
    if long {
        writeln!(out, "{}", summary.uwp.bold())?;
        writeln!(out, "{}", summary.extended_data.long_description)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", summary.uwp)?;
    }
    Ok(())
}

pub fn run_stats(ctx: &RunContext, kind: SchemeKind, max: bool, out: &mut dyn Write) -> Result<()> {
    let runs = if max { MAX_DEBUG_RUNS } else { DEBUG_RUNS };
    let mut dice = ctx.dice("world-debug");
    let averages = run_debug(GeneratorScheme::for_kind(kind), runs, &mut dice);
    render_averages(out, kind, &averages)?;
    ctx.json.write(
        None,
        &format!("world-debug_{}-{}.json", kind.key(), timestamp()),
        &averages,
    )?;
    Ok(())
}

pub fn render_averages(
    out: &mut dyn Write,
    kind: SchemeKind,
    averages: &AttributeAverages,
) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!("Attribute averages over {} {kind} worlds", averages.runs).bold()
    )?;
    let rows = [
        ("size", averages.size),
        ("atmosphere", averages.atmosphere),
        ("temperature", averages.temperature),
        ("hydrographics", averages.hydrographics),
        ("population", averages.population),
        ("government", averages.government),
        ("law level", averages.law_level),
        ("starport", averages.starport),
        ("tech level", averages.tech_level),
    ];
    for (label, value) in rows {
        writeln!(out, "  {label:<14} {value:>6.2}")?;
    }
    Ok(())
}
