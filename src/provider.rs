//! Dictionary loading and snapshot publication.
//!
//! The engine never performs I/O. This module adapts the JSON shapes
//! dictionaries are published in, caches a loaded file until its modification
//! time changes, and publishes fully built [`Engine`]s to readers.
//!
//! ## Accepted JSON shapes
//!
//! ```text
//! { "version": "db.v3", "items": [ ... ] }    object, both fields optional
//! [ ... ]                                     bare array of rows
//!
//! row := { "inci": "...", "aliases": [...], "status": "green", "why": "...", "tags": [...] }
//!      | "glycerin"                             bare name, status unknown
//! ```
//!
//! Status labels accept `green|yellow|red|unknown` and `safe|caution|avoid`.
//! Names and aliases are lower-cased. A missing version becomes
//! [`DEFAULT_VERSION`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use arc_swap::ArcSwap;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{Dictionary, DictionaryEntry, Engine, Options, Status};

/// Version reported for dictionaries that do not carry one.
pub const DEFAULT_VERSION: &str = "ingredient-db.v1";

/// Errors raised while loading a dictionary or an options file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dictionary JSON")]
    Json(#[from] serde_json::Error),
    #[error("invalid options TOML")]
    Config(#[from] toml::de::Error),
}

// --- JSON adaptation --------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDictionary {
    Bare(Vec<RawRow>),
    Wrapped {
        #[serde(default)]
        version: Option<String>,
        #[serde(default)]
        items: Option<Vec<RawRow>>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRow {
    Name(String),
    Entry(RawEntry),
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    inci: Option<String>,
    #[serde(default)]
    aliases: Option<Vec<String>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    why: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl RawRow {
    fn into_entry(self) -> Option<DictionaryEntry> {
        match self {
            RawRow::Name(name) => {
                let inci = name.trim().to_lowercase();
                (!inci.is_empty()).then(|| DictionaryEntry::new(inci, Status::Unknown))
            }
            RawRow::Entry(raw) => {
                let status = match raw.status.as_deref() {
                    None => Status::Unknown,
                    Some(label) => label.parse().unwrap_or_else(|err| {
                        warn!(%err, inci = raw.inci.as_deref().unwrap_or(""), "treating entry as unknown");
                        Status::Unknown
                    }),
                };
                Some(DictionaryEntry {
                    inci: raw.inci.unwrap_or_default().to_lowercase(),
                    aliases: raw.aliases.unwrap_or_default().into_iter().map(|a| a.to_lowercase()).collect(),
                    status,
                    why: raw.why.unwrap_or_default(),
                    tags: raw.tags.unwrap_or_default(),
                })
            }
        }
    }
}

/// Parse a dictionary from any of the accepted JSON shapes.
///
/// ```
/// use ingredientiq::Status;
/// use ingredientiq::provider::dictionary_from_json;
///
/// let dict = dictionary_from_json(r#"[{"inci": "Aqua", "status": "safe"}, "Glycerin"]"#).unwrap();
///
/// assert_eq!(dict.version, "ingredient-db.v1");
/// assert_eq!(dict.entries[0].inci, "aqua");
/// assert_eq!(dict.entries[0].status, Status::Green);
/// assert_eq!(dict.entries[1].status, Status::Unknown);
/// ```
pub fn dictionary_from_json(json: &str) -> Result<Dictionary, LoadError> {
    let (version, rows) = match serde_json::from_str::<RawDictionary>(json)? {
        RawDictionary::Bare(rows) => (None, rows),
        RawDictionary::Wrapped { version, items } => (version, items.unwrap_or_default()),
    };

    let version = version.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| DEFAULT_VERSION.to_string());
    let entries: Vec<DictionaryEntry> = rows.into_iter().filter_map(RawRow::into_entry).collect();
    debug!(%version, entries = entries.len(), "parsed dictionary");

    Ok(Dictionary::new(version, entries))
}

/// Read and parse a dictionary file.
pub fn load_dictionary(path: impl AsRef<Path>) -> Result<Dictionary, LoadError> {
    let path = path.as_ref();
    dictionary_from_json(&read(path)?)
}

/// Read an [`Options`] TOML file.
pub fn load_options(path: impl AsRef<Path>) -> Result<Options, LoadError> {
    let path = path.as_ref();
    Ok(Options::from_toml_str(&read(path)?)?)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

// --- File provider ----------------------------------------------------------

#[derive(Debug)]
struct Cached {
    modified: Option<SystemTime>,
    len: u64,
    dictionary: Arc<Dictionary>,
}

/// Loads a dictionary file and re-reads it only when it changed on disk.
///
/// A file counts as changed when its modification time or length differs from
/// the cached read.
#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
    cached: Mutex<Option<Cached>>,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), cached: Mutex::new(None) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current dictionary, from cache when the file is unchanged.
    pub fn load(&self) -> Result<Arc<Dictionary>, LoadError> {
        Ok(self.refresh()?.0)
    }

    /// `Some` with the new dictionary when the file changed since the last
    /// successful load (or was never loaded), `None` otherwise.
    pub fn load_if_changed(&self) -> Result<Option<Arc<Dictionary>>, LoadError> {
        let (dictionary, changed) = self.refresh()?;
        Ok(changed.then_some(dictionary))
    }

    fn refresh(&self) -> Result<(Arc<Dictionary>, bool), LoadError> {
        let meta = fs::metadata(&self.path).map_err(|source| LoadError::Io { path: self.path.clone(), source })?;
        let modified = meta.modified().ok();
        let len = meta.len();

        let mut cached = self.cached.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(c) = cached.as_ref() {
            if modified.is_some() && c.modified == modified && c.len == len {
                return Ok((Arc::clone(&c.dictionary), false));
            }
        }

        let dictionary = Arc::new(load_dictionary(&self.path)?);
        debug!(path = %self.path.display(), version = %dictionary.version, "loaded dictionary file");
        *cached = Some(Cached { modified, len, dictionary: Arc::clone(&dictionary) });
        Ok((dictionary, true))
    }
}

// --- Snapshot handle --------------------------------------------------------

/// Atomically swappable [`Engine`] snapshot.
///
/// Readers call [`SnapshotHandle::load`] and keep the returned `Arc` for the
/// duration of one analysis; a concurrent [`SnapshotHandle::replace`] never
/// affects an analysis already in flight.
#[derive(Debug)]
pub struct SnapshotHandle {
    current: ArcSwap<Engine>,
}

impl SnapshotHandle {
    pub fn new(engine: Engine) -> Self {
        Self { current: ArcSwap::from_pointee(engine) }
    }

    /// Build the first snapshot from `provider`.
    pub fn from_provider(provider: &FileProvider, options: Options) -> Result<Self, LoadError> {
        let dictionary = provider.load()?;
        Ok(Self::new(Engine::new(&dictionary, options)))
    }

    pub fn load(&self) -> Arc<Engine> {
        self.current.load_full()
    }

    /// Publish `engine`, returning the previous snapshot.
    pub fn replace(&self, engine: Engine) -> Arc<Engine> {
        let to = engine.version().to_string();
        let previous = self.current.swap(Arc::new(engine));
        info!(from = %previous.version(), %to, "dictionary snapshot replaced");
        previous
    }

    /// Rebuild from `provider` if its file changed. Returns whether a new
    /// snapshot was published. On error the current snapshot stays in place.
    pub fn reload_from(&self, provider: &FileProvider, options: &Options) -> Result<bool, LoadError> {
        match provider.load_if_changed()? {
            Some(dictionary) => {
                self.replace(Engine::new(&dictionary, options.clone()));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
