//! Import driver: sweep the staging root, one album at a time.
//!
//! ```text
//! load catalog once
//! for each staged album directory (sorted by name):
//!     import the album (derivatives, merge, save)
//!     remove the directory if nothing is left in it
//! report the summary
//! ```
//!
//! The catalog is saved after every album, so an interrupted run loses at
//! most the album in flight. An album that fails is reported and the sweep
//! moves on.

use crate::imaging::ImageBackend;
use crate::importer::{ImportContext, ImportError, ImportEvent, import_album};
use crate::store::MetadataStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Totals for one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Album directories processed to completion.
    pub albums: usize,
    pub photos: usize,
    pub failed_photos: usize,
    pub failed_albums: usize,
    /// Staging directories deleted because they ended up empty.
    pub removed_dirs: usize,
    /// Size of the whole catalog once the sweep is done.
    pub catalog_albums: usize,
    pub catalog_photos: usize,
}

/// Make sure the staging root exists.
///
/// A missing root is an error unless `create_if_missing` is set, since it
/// usually means a misconfigured path.
pub fn ensure_staging_root(staging_root: &Path, create_if_missing: bool) -> Result<(), ImportError> {
    if staging_root.is_dir() {
        return Ok(());
    }
    if !create_if_missing {
        return Err(ImportError::StagingMissing(staging_root.to_path_buf()));
    }
    fs::create_dir_all(staging_root)?;
    info!(path = %staging_root.display(), "created staging root");
    Ok(())
}

/// Immediate subdirectories of the staging root, symlinks followed, sorted by name.
pub fn staged_album_dirs(staging_root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(staging_root)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-directory entry");
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Delete `dir` if it has no entries at all. Returns whether it was removed.
///
/// A symlinked directory is never removed, emptied or not.
pub fn remove_if_empty(dir: &Path) -> std::io::Result<bool> {
    if dir.is_symlink() || fs::read_dir(dir)?.next().is_some() {
        return Ok(false);
    }
    fs::remove_dir(dir)?;
    Ok(true)
}

/// Run a full sweep of `staging_root`.
///
/// Fatal errors are limited to a missing staging root and an unreadable
/// store; everything past that is counted in the summary.
pub fn run_import<B: ImageBackend>(
    ctx: &ImportContext<'_, B>,
    store: &impl MetadataStore,
    staging_root: &Path,
    create_if_missing: bool,
) -> Result<ImportSummary, ImportError> {
    ensure_staging_root(staging_root, create_if_missing)?;
    let mut catalog = store.load()?;
    let mut summary = ImportSummary::default();

    for dir in staged_album_dirs(staging_root)? {
        let album = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match import_album(ctx, &dir, &mut catalog, store) {
            Ok(outcome) => {
                summary.albums += 1;
                summary.photos += outcome.imported.len();
                summary.failed_photos += outcome.failed.len();

                match remove_if_empty(&dir) {
                    Ok(true) => {
                        summary.removed_dirs += 1;
                        ctx.emit(ImportEvent::StagingRemoved { album });
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!(path = %dir.display(), error = %e, "could not remove staging directory")
                    }
                }
            }
            Err(e) => {
                warn!(album = %album, error = %e, "album import failed");
                summary.failed_albums += 1;
                ctx.emit(ImportEvent::AlbumFailed {
                    album,
                    error: e.to_string(),
                });
            }
        }
    }

    summary.catalog_albums = catalog.albums.len();
    summary.catalog_photos = catalog.photo_count();
    info!(
        albums = summary.albums,
        photos = summary.photos,
        failed = summary.failed_photos,
        catalog_photos = summary.catalog_photos,
        "import finished"
    );
    Ok(summary)
}
