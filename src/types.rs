//! Album and photo records shared by the store, the importer, and the CLI.
//!
//! The metadata store is the source of truth for which photos belong to which
//! album. Rendered derivatives are not listed here; a photo's presence in its
//! album's list implies every derivative for it exists under the publish root.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the photo id in an album's `urlFormat`.
pub const PHOTO_PLACEHOLDER: &str = "{photo}";
/// Placeholder replaced by the derivative size name in an album's `urlFormat`.
pub const SIZE_PLACEHOLDER: &str = "{size}";

/// Free-form per-photo data owned by external tooling. Key order is preserved.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// One row of the album metadata file.
///
/// Column order on disk follows field order: `id, name, description, cover,
/// updated, urlFormat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Staging directory name; also the album's publish subdirectory. Never changes.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Photo id used as the album cover, or empty.
    #[serde(default)]
    pub cover: String,
    /// Timestamp of the last manual update, or empty.
    #[serde(default)]
    pub updated: String,
    #[serde(default, rename = "urlFormat")]
    pub url_format: String,
    /// Photo list, persisted separately in the album's own index file.
    #[serde(skip)]
    pub photos: Vec<Photo>,
}

impl Album {
    /// A freshly imported album: `name` defaults to the id, everything else
    /// is left for manual editing.
    pub fn new(id: &str, url_format: String) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            url_format,
            ..Self::default()
        }
    }

    pub fn contains_photo(&self, photo_id: &str) -> bool {
        self.photos.iter().any(|p| p.photo == photo_id)
    }

    pub fn photo_ids(&self) -> Vec<&str> {
        self.photos.iter().map(|p| p.photo.as_str()).collect()
    }

    /// Resolve the public URL of one derivative from the album's template.
    pub fn photo_url(&self, photo_id: &str, size: &str) -> String {
        self.url_format
            .replace(PHOTO_PLACEHOLDER, photo_id)
            .replace(SIZE_PLACEHOLDER, size)
    }
}

/// Build the `urlFormat` template for a new album.
///
/// ```
/// # use album_import::types::url_template;
/// assert_eq!(
///     url_template("/assets/albums", "trip", "jpg"),
///     "/assets/albums/trip/{photo}-{size}.jpg"
/// );
/// ```
pub fn url_template(url_prefix: &str, album_id: &str, extension: &str) -> String {
    format!(
        "{}/{}/{}-{}.{}",
        url_prefix.trim_end_matches('/'),
        album_id,
        PHOTO_PLACEHOLDER,
        SIZE_PLACEHOLDER,
        extension
    )
}

/// One photo within an album. Only `photo` is written by the importer;
/// the rest is curated by hand or by other tools.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Photo {
    /// Filename stem of the original.
    pub photo: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub extra: Extra,
}

impl Photo {
    pub fn new(photo_id: &str) -> Self {
        Self {
            photo: photo_id.to_string(),
            ..Self::default()
        }
    }
}

/// The whole metadata store in memory: every album with its photo list,
/// in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub albums: Vec<Album>,
}

impl Catalog {
    pub fn find(&self, album_id: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == album_id)
    }

    pub fn find_mut(&mut self, album_id: &str) -> Option<&mut Album> {
        self.albums.iter_mut().find(|a| a.id == album_id)
    }

    pub fn photo_count(&self) -> usize {
        self.albums.iter().map(|a| a.photos.len()).sum()
    }
}
