//! CLI output formatting for the import sweep.
//!
//! # Information-First Display
//!
//! Each album leads with its id and photo count; each photo with its
//! positional index and id. Source paths and per-photo results are shown as
//! indented context lines.
//!
//! ```text
//! trip (3 photos)
//!     001 IMG_1
//!         Source: public/assets/import-albums/trip/IMG_1.jpg
//!         Derivatives: sm md lg xl sq
//!     002 IMG_2: FAILED
//!         Source: public/assets/import-albums/trip/IMG_2.jpg
//!         Error: Processing failed: ...
//!     New album: 1 photo (edit name, cover and description in albums-meta.csv)
//!     Staging directory removed
//!
//! Imported 1 albums (1 photos, 1 failed)
//! ```
//!
//! # Architecture
//!
//! Each piece has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::driver::ImportSummary;
use crate::importer::ImportEvent;
use crate::store::ALBUMS_FILENAME;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format a single import progress event as display lines.
pub fn format_import_event(event: &ImportEvent) -> Vec<String> {
    match event {
        ImportEvent::AlbumStarted { album, photo_count } => {
            vec![format!("{} ({} photos)", album, photo_count)]
        }
        ImportEvent::PhotoImported {
            index,
            photo,
            source,
            derivatives,
        } => vec![
            format!("    {} {}", format_index(*index), photo),
            format!("        Source: {}", source),
            format!("        Derivatives: {}", derivatives.join(" ")),
        ],
        ImportEvent::PhotoFailed {
            index,
            photo,
            source,
            error,
        } => vec![
            format!("    {} {}: FAILED", format_index(*index), photo),
            format!("        Source: {}", source),
            format!("        Error: {}", error),
        ],
        ImportEvent::AlbumMerged {
            created: true,
            total,
            preview,
            ..
        } => {
            let mut lines = vec![format!(
                "    New album: {} (edit name, cover and description in {})",
                plural(*total, "photo"),
                ALBUMS_FILENAME
            )];
            if let Some(url) = preview {
                lines.push(format!("        Preview: {}", url));
            }
            lines
        }
        ImportEvent::AlbumMerged { added, total, .. } => {
            vec![format!("    Merged: +{} ({} total)", added, plural(*total, "photo"))]
        }
        ImportEvent::AlbumFailed { album, error } => vec![
            format!("{}: FAILED", album),
            format!("    Error: {}", error),
        ],
        ImportEvent::StagingRemoved { .. } => vec!["    Staging directory removed".to_string()],
    }
}

/// Format the end-of-run summary.
pub fn format_summary(summary: &ImportSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Imported {} albums ({} photos, {} failed)",
        summary.albums, summary.photos, summary.failed_photos
    )];
    if summary.failed_albums > 0 {
        lines.push(format!(
            "{} could not be imported",
            plural(summary.failed_albums, "album")
        ));
    }
    if summary.catalog_albums > 0 {
        lines.push(format!(
            "Catalog: {}, {}",
            plural(summary.catalog_albums, "album"),
            plural(summary.catalog_photos, "photo")
        ));
    }
    if summary.removed_dirs > 0 {
        let noun = if summary.removed_dirs == 1 {
            "directory"
        } else {
            "directories"
        };
        lines.push(format!(
            "Removed {} empty staging {}",
            summary.removed_dirs, noun
        ));
    }
    lines
}

/// Print the summary to stdout.
pub fn print_summary(summary: &ImportSummary) {
    println!();
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
