use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use tas_game::{DataLoader, GeneratorScheme, SchemeKind, Subsector, WorldNames, generate_subsector};

use super::{RunContext, WORLD_NAMES_FILE};

pub fn run(ctx: &RunContext, name: &str, kind: SchemeKind, out: &mut dyn Write) -> Result<()> {
    let source = ctx
        .loader
        .load_world_source()
        .context("failed to load world tables")?;
    let mut names = WorldNames::from_lines(&ctx.loader.read_text(WORLD_NAMES_FILE)?);
    log::info!("{} world names available", names.len());

    let mut dice = ctx.dice("sector");
    let subsector = generate_subsector(
        name,
        GeneratorScheme::for_kind(kind),
        &source,
        &mut names,
        &mut dice,
    )
    .with_context(|| format!("failed to generate subsector {name}"))?;

    render_subsector(out, &subsector)?;
    let directory = subsector.directory_name();
    for world in &subsector.worlds {
        ctx.json
            .write(Some(directory.as_str()), &world.summary.long_file_name(), world)?;
    }
    Ok(())
}

pub fn render_subsector(out: &mut dyn Write, subsector: &Subsector) -> Result<()> {
    let heading = format!(
        "Subsector {} ({} worlds)",
        subsector.name,
        subsector.worlds.len()
    );
    writeln!(out, "{}", heading.bold())?;
    writeln!(out, "{}", "=".repeat(heading.len()))?;
    for world in &subsector.worlds {
        let marker = if world.has_gas_giant { " *" } else { "" };
        writeln!(out, "{}{marker}", world.summary.uwp)?;
    }
    if subsector.worlds.iter().any(|world| world.has_gas_giant) {
        writeln!(out)?;
        writeln!(out, "* gas giant present")?;
    }
    Ok(())
}
