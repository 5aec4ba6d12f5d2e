//! Album importer: one staged directory in, derivatives and metadata out.
//!
//! Each staged directory is driven through four states:
//!
//! ```text
//! Scanning  → list regular files directly inside the directory
//! PerPhoto  → per file: derivatives, delete source, record id
//! Merging   → append new ids to the album (or create it)
//! Done      → persist the whole catalog
//! ```
//!
//! A photo that fails is logged and skipped: its source stays staged and its
//! id is not recorded. Partial albums are fine; the next run picks up the
//! leftovers. Re-importing an id already in the album never duplicates it.
//!
//! Progress is reported as [`ImportEvent`]s over an optional channel, the
//! same way the CLI printer thread consumes them.

use crate::config::ImportConfig;
use crate::imaging::{DerivativeConfig, ImageBackend, create_derivatives};
use crate::store::{ALBUMS_FILENAME, MetadataStore, StoreError};
use crate::types::{Album, Catalog, Photo, url_template};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Metadata store error: {0}")]
    Store(#[from] StoreError),
    #[error("Staging directory not found: {0}")]
    StagingMissing(PathBuf),
    #[error("Album directory name is not valid UTF-8: {0}")]
    InvalidAlbumName(PathBuf),
}

/// Where an album import currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    Scanning,
    PerPhoto,
    Merging,
    Done,
}

/// Progress events emitted while importing.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportEvent {
    AlbumStarted {
        album: String,
        photo_count: usize,
    },
    PhotoImported {
        index: usize,
        photo: String,
        source: String,
        derivatives: Vec<String>,
    },
    PhotoFailed {
        index: usize,
        photo: String,
        source: String,
        error: String,
    },
    AlbumMerged {
        album: String,
        created: bool,
        added: usize,
        total: usize,
        /// Public URL of the first photo's square derivative.
        preview: Option<String>,
    },
    AlbumFailed {
        album: String,
        error: String,
    },
    StagingRemoved {
        album: String,
    },
}

/// Everything an album import needs besides the catalog and the store.
pub struct ImportContext<'a, B: ImageBackend> {
    pub backend: &'a B,
    pub derivatives: DerivativeConfig,
    /// Publish root; each album gets `{albums_dir}/{album_id}`.
    pub albums_dir: PathBuf,
    pub url_prefix: String,
    pub sort_photos: bool,
    pub events: Option<Sender<ImportEvent>>,
}

impl<'a, B: ImageBackend> ImportContext<'a, B> {
    pub fn new(backend: &'a B, config: &ImportConfig, root: &Path) -> Self {
        Self {
            backend,
            derivatives: DerivativeConfig::from(config),
            albums_dir: config.albums_dir(root),
            url_prefix: config.paths.url_prefix.clone(),
            sort_photos: config.import.sort_photos,
            events: None,
        }
    }

    pub fn with_events(mut self, events: Sender<ImportEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub(crate) fn emit(&self, event: ImportEvent) {
        if let Some(tx) = &self.events {
            // A closed receiver only means nobody is listening
            let _ = tx.send(event);
        }
    }

    fn url_format(&self, album_id: &str) -> String {
        url_template(&self.url_prefix, album_id, self.derivatives.format.extension())
    }
}

/// What one album import did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumOutcome {
    pub album_id: String,
    /// Ids imported this run, in processing order, without repeats.
    pub imported: Vec<String>,
    pub failed: Vec<String>,
    pub created: bool,
    /// Ids newly appended to the album's photo list.
    pub added: usize,
}

/// Result of merging a run's ids into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeResult {
    pub created: bool,
    pub added: usize,
    pub total: usize,
}

/// Album id of a staged directory: its name.
pub fn album_id_for(staged_dir: &Path) -> Result<String, ImportError> {
    staged_dir
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ImportError::InvalidAlbumName(staged_dir.to_path_buf()))
}

/// Photo id of a staged file: its name without the last extension.
pub fn photo_id_for(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

/// Files directly inside `dir`, symlinks followed; subdirectories are ignored.
pub fn list_photo_files(dir: &Path, sort: bool) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-file entry");
        }
    }
    if sort {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(files)
}

/// Append `imported` ids to the album, or create the album with exactly them.
///
/// Existing order is preserved and ids already present are skipped, so the
/// merge is idempotent.
pub fn merge_imported(
    catalog: &mut Catalog,
    album_id: &str,
    imported: &[String],
    url_format: impl FnOnce() -> String,
) -> MergeResult {
    let (album, created) = match catalog.albums.iter().position(|a| a.id == album_id) {
        Some(pos) => (&mut catalog.albums[pos], false),
        None => {
            catalog.albums.push(Album::new(album_id, url_format()));
            let last = catalog.albums.len() - 1;
            (&mut catalog.albums[last], true)
        }
    };

    let mut added = 0;
    for id in imported {
        if !album.contains_photo(id) {
            album.photos.push(Photo::new(id));
            added += 1;
        }
    }

    MergeResult {
        created,
        added,
        total: album.photos.len(),
    }
}

/// Import one staged album directory and persist the catalog.
///
/// Photo failures are recorded in the outcome. Errors returned here are
/// album-level: unreadable staging directory, publish directory that cannot
/// be created, or a failed save.
pub fn import_album<B: ImageBackend>(
    ctx: &ImportContext<'_, B>,
    staged_dir: &Path,
    catalog: &mut Catalog,
    store: &impl MetadataStore,
) -> Result<AlbumOutcome, ImportError> {
    let album_id = album_id_for(staged_dir)?;
    let publish_dir = ctx.albums_dir.join(&album_id);

    let mut outcome = AlbumOutcome {
        album_id: album_id.clone(),
        ..AlbumOutcome::default()
    };
    let mut files = Vec::new();
    let mut state = ImportState::Scanning;

    loop {
        debug!(album = %album_id, ?state, "album import");
        state = match state {
            ImportState::Scanning => {
                if !staged_dir.is_dir() {
                    return Err(ImportError::StagingMissing(staged_dir.to_path_buf()));
                }
                files = list_photo_files(staged_dir, ctx.sort_photos)?;
                fs::create_dir_all(&publish_dir)?;
                ctx.emit(ImportEvent::AlbumStarted {
                    album: album_id.clone(),
                    photo_count: files.len(),
                });
                ImportState::PerPhoto
            }
            ImportState::PerPhoto => {
                for (i, path) in files.iter().enumerate() {
                    import_photo(ctx, path, i + 1, &publish_dir, &mut outcome);
                }
                ImportState::Merging
            }
            ImportState::Merging => {
                let merged = merge_imported(catalog, &album_id, &outcome.imported, || {
                    ctx.url_format(&album_id)
                });
                if merged.created {
                    info!(
                        album = %album_id,
                        "new album; edit its name, cover and description in {ALBUMS_FILENAME}"
                    );
                } else {
                    info!(album = %album_id, added = merged.added, "merged into existing album");
                }
                outcome.created = merged.created;
                outcome.added = merged.added;
                let preview = catalog.find(&album_id).and_then(|album| {
                    let first = album.photos.first()?;
                    Some(album.photo_url(&first.photo, &ctx.derivatives.square.name))
                });
                ctx.emit(ImportEvent::AlbumMerged {
                    album: album_id.clone(),
                    created: merged.created,
                    added: merged.added,
                    total: merged.total,
                    preview,
                });
                ImportState::Done
            }
            ImportState::Done => {
                store.save(catalog)?;
                break;
            }
        };
    }

    Ok(outcome)
}

/// Generate one photo's derivatives, then delete its source.
fn import_photo<B: ImageBackend>(
    ctx: &ImportContext<'_, B>,
    path: &Path,
    index: usize,
    publish_dir: &Path,
    outcome: &mut AlbumOutcome,
) {
    let source = path.display().to_string();
    let Some(photo_id) = photo_id_for(path) else {
        warn!(source = %source, "skipping file with a non UTF-8 name");
        outcome.failed.push(path.to_string_lossy().to_string());
        ctx.emit(ImportEvent::PhotoFailed {
            index,
            photo: path.to_string_lossy().to_string(),
            source,
            error: "file name is not valid UTF-8".to_string(),
        });
        return;
    };

    match create_derivatives(ctx.backend, path, publish_dir, &photo_id, &ctx.derivatives) {
        Ok(generated) => {
            if let Err(e) = fs::remove_file(path) {
                warn!(source = %source, error = %e, "imported, but could not delete the source");
            }
            if !outcome.imported.contains(&photo_id) {
                outcome.imported.push(photo_id.clone());
            }
            ctx.emit(ImportEvent::PhotoImported {
                index,
                photo: photo_id,
                source,
                derivatives: generated.into_iter().map(|g| g.size).collect(),
            });
        }
        Err(e) => {
            warn!(album = %outcome.album_id, photo = %photo_id, error = %e, "failed to import photo");
            outcome.failed.push(photo_id.clone());
            ctx.emit(ImportEvent::PhotoFailed {
                index,
                photo: photo_id,
                source,
                error: e.to_string(),
            });
        }
    }
}
