//! File-backed persistence: the catalogue file and the settings file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bookcase_application::Catalogue;
use bookcase_core::{AuthorId, Book, GenreId, LookupTable, Settings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const SETTINGS_FILE: &str = "settings.json";
const BUNDLED_CATALOGUE: &str = include_str!("../data/catalogue.json");

/// On-disk shape of a catalogue: the books in display order plus the
/// author and genre tables they reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueFile {
    pub books: Vec<Book>,
    pub authors: LookupTable<AuthorId>,
    pub genres: LookupTable<GenreId>,
}

impl CatalogueFile {
    pub fn into_catalogue(self) -> anyhow::Result<Catalogue> {
        Catalogue::load(self.books, self.authors, self.genres).context("validate catalogue")
    }
}

pub fn parse_catalogue(json: &str) -> anyhow::Result<Catalogue> {
    let file: CatalogueFile = serde_json::from_str(json).context("decode catalogue json")?;
    file.into_catalogue()
}

pub fn load_catalogue(path: impl AsRef<Path>) -> anyhow::Result<Catalogue> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("read catalogue {}", path.display()))?;
    let catalogue =
        parse_catalogue(&json).with_context(|| format!("load catalogue {}", path.display()))?;
    info!(path = %path.display(), books = catalogue.len(), "catalogue read from file");
    Ok(catalogue)
}

/// The sample catalogue compiled into the binary.
pub fn bundled_catalogue() -> anyhow::Result<Catalogue> {
    parse_catalogue(BUNDLED_CATALOGUE).context("load bundled catalogue")
}

#[derive(Debug)]
pub struct Storage {
    config_dir: PathBuf,
}

impl Storage {
    pub fn open(config_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("create config dir {}", config_dir.display()))?;
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Missing file gives defaults; an unreadable one is logged and replaced
    /// by defaults so the browser can still start.
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        let path = self.settings_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read settings {}", path.display()));
            }
        };

        let mut settings = match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "invalid settings file, using defaults"
                );
                Settings::default()
            }
        };
        settings.normalize();
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> anyhow::Result<()> {
        let mut settings = settings.clone();
        settings.normalize();
        let json = serde_json::to_string_pretty(&settings)?;
        let path = self.settings_path();
        fs::write(&path, json).with_context(|| format!("write settings {}", path.display()))?;
        Ok(())
    }
}
