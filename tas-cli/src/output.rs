//! Console rendering and JSON file output.

use std::fs;
use std::io::{BufWriter, Stdout, Write, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Timestamp suffix for output file names.
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Buffered console writer.
pub struct OutputTarget {
    writer: BufWriter<Stdout>,
}

impl OutputTarget {
    pub fn stdout() -> Self {
        Self {
            writer: BufWriter::new(stdout()),
        }
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        &mut self.writer
    }

    pub fn flush_inner(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

/// Where JSON results land when `--to-file` is set.
#[derive(Debug, Clone)]
pub struct JsonSink {
    dir: Option<PathBuf>,
}

impl JsonSink {
    pub fn new(enabled: bool, dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: enabled.then(|| dir.into()),
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Write `value` as pretty JSON to `file_name`, optionally inside
    /// `subdir`. Returns the path written, or `None` when disabled.
    pub fn write<T: Serialize>(
        &self,
        subdir: Option<&str>,
        file_name: &str,
        value: &T,
    ) -> Result<Option<PathBuf>> {
        let Some(base) = &self.dir else {
            return Ok(None);
        };
        let dir = subdir.map_or_else(|| base.clone(), |sub| base.join(sub));
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(file_name);
        write_json(&path, value)?;
        log::info!("wrote {}", path.display());
        Ok(Some(path))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value).context("failed to serialize output")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
