//! # Album Import
//!
//! Publishes photo albums from a staging area. Your filesystem is the
//! inbox: every directory under the staging root is an album, every file in
//! it a photo. A run renders each photo into a fixed menu of derivatives,
//! deletes the source, and records the photo in flat metadata files that the
//! site build reads.
//!
//! # Pipeline
//!
//! ```text
//! staging/trip/IMG_1.jpg
//!     → decode once (EXIF kept)
//!     → IMG_1-{sm,md,lg,xl}.jpg   proportional, longer side bounded
//!     → IMG_1-sq.jpg              centered square, fixed canvas
//!     → delete staging/trip/IMG_1.jpg
//!     → append "IMG_1" to trip's photo list
//! after each album: save metadata, remove the staging dir if empty
//! ```
//!
//! The metadata files and the derivative tree stay consistent across
//! interrupted runs: a photo is recorded only after all of its derivatives
//! exist, the catalog is saved after every album, and a re-run never
//! duplicates a photo already listed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading: stock defaults + sparse overrides, validation |
//! | [`types`] | `Album`, `Photo`, `Catalog` records |
//! | [`store`] | Metadata store: `;`-delimited album and photo files |
//! | [`exif`] | EXIF tag model and name-based filtering |
//! | [`imaging`] | Derivative generation: geometry, backend trait, `image`-crate backend |
//! | [`importer`] | Per-album state machine and catalog merge |
//! | [`driver`] | Staging-root sweep, per-album checkpoint, cleanup |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Flat Files Over a Database
//!
//! Album and photo metadata live in small delimited files next to the site
//! content, edited by hand and versioned with it. The [`store::MetadataStore`]
//! trait is the only I/O boundary, so the importer runs against an in-memory
//! store in tests.
//!
//! ## One Decode per Photo
//!
//! A source is decoded once and every derivative is rendered from that copy,
//! which is dropped before the next photo. Only one decoded image is alive at
//! a time.
//!
//! ## Photo-Level Failure, Album-Level Checkpoint
//!
//! A photo that cannot be decoded or written is skipped and left staged for
//! the next run. Album-level problems (unreadable directory, failed save) are
//! reported and the sweep continues with the next album.

pub mod config;
pub mod driver;
pub mod exif;
pub mod imaging;
pub mod importer;
pub mod output;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
