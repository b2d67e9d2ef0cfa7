//! Reference data from a local directory, falling back to the tables built
//! into `tas-game`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tas_game::{DataError, DataLoader, EmbeddedData};

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Reads table overrides from `dir`; any table not present there comes from
/// the embedded defaults.
#[derive(Debug, Clone)]
pub struct FsDataLoader {
    dir: PathBuf,
}

impl FsDataLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Raw text of a file that has no embedded default.
    pub fn read_text(&self, name: &str) -> Result<String, LoaderError> {
        let path = self.path_for(name);
        fs::read_to_string(&path).map_err(|source| LoaderError::Io { path, source })
    }
}

impl DataLoader for FsDataLoader {
    type Error = LoaderError;

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let path = self.path_for(config_name);
        if !path.is_file() {
            log::debug!("using embedded {config_name}");
            return Ok(EmbeddedData.load_config(config_name)?);
        }
        log::info!("loading {} from disk", path.display());
        let raw = fs::read_to_string(&path).map_err(|source| LoaderError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| LoaderError::Json { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let dir = std::env::temp_dir().join(format!("tas-loader-{tag}-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_directory_uses_embedded_tables() {
        let loader = FsDataLoader::new("/nonexistent/tas-data");
        let source = loader.load_world_source().unwrap();
        assert_eq!(source.sizes.len(), 11);
        assert_eq!(loader.load_trade_goods().unwrap().len(), 36);
    }

    #[test]
    fn override_file_replaces_embedded_table() {
        let dir = scratch_dir("override");
        let goods = r#"{
            "common-goods": [
                {"value": 11, "type": "Only Good", "tons-dice": 1, "tons-multi": 1, "base-price": 5, "examples": "x"}
            ],
            "advanced-goods": [],
            "illegal-goods": []
        }"#;
        fs::write(dir.join(tas_game::trade::goods::TRADE_GOODS_FILE), goods).unwrap();
        let loader = FsDataLoader::new(&dir);
        let table = loader.load_trade_goods().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(11).unwrap().kind, "Only Good");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn broken_override_names_the_path() {
        let dir = scratch_dir("broken");
        fs::write(dir.join("sizes.json"), "{ nope").unwrap();
        let err = FsDataLoader::new(&dir).load_world_source().unwrap_err();
        assert!(matches!(err, LoaderError::Json { .. }));
        assert!(err.to_string().contains("sizes.json"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn read_text_reports_missing_files() {
        let err = FsDataLoader::new("/nonexistent/tas-data")
            .read_text("world-names.txt")
            .unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }
}
