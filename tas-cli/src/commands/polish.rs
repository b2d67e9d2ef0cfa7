use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tas_game::polish_names;

use super::{RunContext, WORLD_NAMES_FILE};

pub fn run(ctx: &RunContext, out: &mut dyn Write) -> Result<()> {
    let path = ctx.loader.path_for(WORLD_NAMES_FILE);
    let (before, after) = polish_file(&path)?;
    writeln!(
        out,
        "{}: {before} names in, {after} names out",
        path.display()
    )?;
    Ok(())
}

/// Dedupe and sort a names file in place. The new list is written to a
/// sibling temp file first and then renamed over the original.
pub fn polish_file(path: &Path) -> Result<(usize, usize)> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let before = raw.lines().filter(|line| !line.trim().is_empty()).count();
    let polished = polish_names(&raw);

    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    fs::write(&temp, polished.join("\n"))
        .with_context(|| format!("failed to write {}", Path::new(&temp).display()))?;
    fs::rename(&temp, path).with_context(|| format!("failed to replace {}", path.display()))?;

    log::info!("polished {}: {before} -> {}", path.display(), polished.len());
    Ok((before, polished.len()))
}
