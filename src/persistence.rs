//! Persistence bridge between the layout store and stored venue layouts.
//!
//! The store only sees two boundary calls: `load`/`restore` on startup or
//! open, and `save` on an explicit user save. Where the bytes go is behind
//! [`LayoutRepository`]; the desktop app uses [`JsonFileRepository`].

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{GridConfig, LayoutElement, ViewportState};
use crate::store::LayoutStore;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid venue id {0:?}")]
    InvalidVenueId(String),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed layout in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("layout encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VenueId(String);

impl VenueId {
    /// Accepts any non-empty id that cannot escape the data directory.
    pub fn new(raw: impl Into<String>) -> Result<Self, PersistError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.contains(['/', '\\'])
            || trimmed.contains("..")
            || trimmed.chars().any(char::is_control)
        {
            return Err(PersistError::InvalidVenueId(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a save hands to the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLayout {
    pub elements: Vec<LayoutElement>,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub viewport: ViewportState,
}

/// Shapes accepted when reading a layout file.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLayout {
    Elements(Vec<LayoutElement>),
    Full(SavedLayout),
    #[serde(rename_all = "camelCase")]
    Legacy {
        table_layout: Vec<LayoutElement>,
    },
}

impl From<StoredLayout> for SavedLayout {
    fn from(stored: StoredLayout) -> Self {
        match stored {
            StoredLayout::Full(layout) => layout,
            StoredLayout::Elements(elements) | StoredLayout::Legacy { table_layout: elements } => {
                SavedLayout {
                    elements,
                    ..SavedLayout::default()
                }
            }
        }
    }
}

pub trait LayoutRepository {
    /// The stored layout, or `None` if the venue has never been saved.
    fn fetch(&self, venue: &VenueId) -> Result<Option<SavedLayout>, PersistError>;

    fn store(&self, venue: &VenueId, layout: &SavedLayout) -> Result<(), PersistError>;
}

/// One pretty-printed JSON file per venue under `dir`.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, venue: &VenueId) -> PathBuf {
        self.dir.join(format!("{}.json", venue.as_str()))
    }
}

impl LayoutRepository for JsonFileRepository {
    fn fetch(&self, venue: &VenueId) -> Result<Option<SavedLayout>, PersistError> {
        let path = self.path_for(venue);
        match std::fs::metadata(&path) {
            Ok(_) => read_file(&path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(venue = %venue, path = %path.display(), "no stored layout");
                Ok(None)
            }
            Err(source) => Err(PersistError::Io { path, source }),
        }
    }

    fn store(&self, venue: &VenueId, layout: &SavedLayout) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| PersistError::Io {
            path: self.dir.clone(),
            source,
        })?;
        write_file(&self.path_for(venue), layout)
    }
}

pub fn read_file(path: &Path) -> Result<SavedLayout, PersistError> {
    let text = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stored: StoredLayout =
        serde_json::from_str(&text).map_err(|source| PersistError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let layout = SavedLayout::from(stored);
    info!(path = %path.display(), elements = layout.elements.len(), "layout read");
    Ok(layout)
}

/// Write `layout` to `path` through a sibling temp file and a rename.
pub fn write_file(path: &Path, layout: &SavedLayout) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(layout)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|source| PersistError::Io {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), elements = layout.elements.len(), "layout written");
    Ok(())
}

/// Seed the store from previously persisted elements. `None` means an empty
/// canvas.
pub fn load(store: &mut LayoutStore, elements: Option<Vec<LayoutElement>>) {
    store.load_layout(elements.unwrap_or_default());
}

/// Seed the store from a full saved layout, including grid and viewport.
pub fn restore(store: &mut LayoutStore, layout: SavedLayout) {
    let SavedLayout {
        elements,
        grid,
        viewport,
    } = layout;
    store.set_grid(grid);
    store.set_viewport(viewport);
    store.load_layout(elements);
}

pub fn save(store: &LayoutStore) -> SavedLayout {
    SavedLayout {
        elements: store.elements().to_vec(),
        grid: *store.grid(),
        viewport: *store.viewport(),
    }
}
