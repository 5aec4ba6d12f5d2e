//! Flat-file metadata store.
//!
//! Album records live in one `;`-delimited file with a header row; each album's
//! photo list lives in its own file under a directory named after the album id:
//!
//! ```text
//! content/
//! ├── albums-meta.csv      # id;name;description;cover;updated;urlFormat
//! ├── trip/
//! │   └── index.csv        # photo;title;description;tags;extra
//! └── city/
//!     └── index.csv
//! ```
//!
//! Fields are quoted CSV-style when they contain the delimiter, quotes, or
//! newlines, so free text never breaks a row. The `extra` column holds a
//! compact JSON object owned by external tooling.
//!
//! [`MetadataStore`] is the only I/O boundary for metadata: the importer loads
//! a [`Catalog`] once, mutates it in memory, and hands it back to `save`.
//! Whole files are overwritten on every save.

use crate::types::{Album, Catalog, Extra, Photo};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Name of the album metadata file inside the content directory.
pub const ALBUMS_FILENAME: &str = "albums-meta.csv";
/// Name of the per-album photo metadata file.
pub const PHOTOS_FILENAME: &str = "index.csv";

const DELIMITER: u8 = b';';
const PHOTO_COLUMNS: [&str; 5] = ["photo", "title", "description", "tags", "extra"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load/persist boundary for album and photo metadata.
pub trait MetadataStore {
    /// Read every album and its photo list. Missing files are empty, not errors.
    fn load(&self) -> Result<Catalog, StoreError>;

    /// Overwrite the stored metadata with `catalog`.
    fn save(&self, catalog: &Catalog) -> Result<(), StoreError>;
}

/// [`MetadataStore`] backed by `;`-delimited files under a content directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    content_dir: PathBuf,
}

impl CsvStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    pub fn albums_path(&self) -> PathBuf {
        self.content_dir.join(ALBUMS_FILENAME)
    }

    pub fn photos_path(&self, album_id: &str) -> PathBuf {
        self.content_dir.join(album_id).join(PHOTOS_FILENAME)
    }
}

/// On-disk shape of a photo row. `extra` stays a string here and is decoded
/// separately so a malformed payload degrades instead of failing the row.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct PhotoRow {
    photo: String,
    title: String,
    description: String,
    tags: String,
    extra: String,
}

impl PhotoRow {
    fn from_photo(photo: &Photo) -> Result<Self, StoreError> {
        Ok(Self {
            photo: photo.photo.clone(),
            title: photo.title.clone(),
            description: photo.description.clone(),
            tags: photo.tags.clone(),
            extra: serde_json::to_string(&photo.extra)?,
        })
    }

    fn into_photo(self, album_id: &str) -> Photo {
        let extra = parse_extra(&self.extra).unwrap_or_else(|| {
            warn!(
                album = album_id,
                photo = %self.photo,
                "malformed extra payload, using an empty map"
            );
            Extra::new()
        });
        Photo {
            photo: self.photo,
            title: self.title,
            description: self.description,
            tags: self.tags,
            extra,
        }
    }
}

/// Decode an `extra` column. Empty means an empty map; anything that is not a
/// JSON object is rejected with `None`.
fn parse_extra(raw: &str) -> Option<Extra> {
    if raw.trim().is_empty() {
        return Some(Extra::new());
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn reader_for(path: &Path) -> Result<csv::Reader<fs::File>, StoreError> {
    Ok(csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_path(path)?)
}

fn writer_for(path: &Path) -> Result<csv::Writer<fs::File>, StoreError> {
    Ok(csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_path(path)?)
}

fn read_photos(path: &Path, album_id: &str) -> Result<Vec<Photo>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = reader_for(path)?;
    let mut photos = Vec::new();
    for row in reader.deserialize::<PhotoRow>() {
        photos.push(row?.into_photo(album_id));
    }
    Ok(photos)
}

impl MetadataStore for CsvStore {
    fn load(&self) -> Result<Catalog, StoreError> {
        let albums_path = self.albums_path();
        if !albums_path.exists() {
            return Ok(Catalog::default());
        }

        let mut reader = reader_for(&albums_path)?;
        let mut albums = Vec::new();
        for row in reader.deserialize::<Album>() {
            let mut album = row?;
            album.photos = read_photos(&self.photos_path(&album.id), &album.id)?;
            albums.push(album);
        }
        Ok(Catalog { albums })
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        fs::create_dir_all(&self.content_dir)?;

        // An empty catalog never writes the album file, so a first run that
        // imported nothing leaves no stray header-only file behind.
        if !catalog.albums.is_empty() {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(DELIMITER)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_path(self.albums_path())?;
            for album in &catalog.albums {
                writer.serialize(album)?;
            }
            writer.flush()?;
        }

        for album in &catalog.albums {
            fs::create_dir_all(self.content_dir.join(&album.id))?;
            let mut writer = writer_for(&self.photos_path(&album.id))?;
            writer.write_record(PHOTO_COLUMNS)?;
            for photo in &album.photos {
                writer.serialize(PhotoRow::from_photo(photo)?)?;
            }
            writer.flush()?;
        }
        Ok(())
    }
}
