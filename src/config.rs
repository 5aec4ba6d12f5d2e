//! Import configuration.
//!
//! Loaded from `config.toml` in the project root. The stock defaults below are
//! the base layer; the user file only needs the keys it wants to change.
//!
//! ```toml
//! [paths]
//! import_dir = "public/assets/import-albums"  # staging root: one subdirectory per album
//! albums_dir = "public/assets/albums"         # publish root for derivatives
//! content_dir = "content"                     # album/photo metadata files
//! url_prefix = "/assets/albums"               # prefix of every new album's urlFormat
//!
//! [output]
//! format = "jpeg"                             # "jpeg" or "webp" (lossless)
//!
//! [[sizes]]
//! name = "sm"
//! max_dimension = 800
//! quality = 80
//! # ... md = 2000, lg = 4000, xl = 6000
//!
//! [square]
//! name = "sq"
//! size = 640
//! quality = 80
//!
//! [import]
//! create_if_missing = false
//! sort_photos = true
//!
//! [exif.categories]
//! camera = ["Make", "Model", "LensSpecification", "LensModel"]
//! # ...
//! ```
//!
//! `[[sizes]]` is an array: a user file that sets it replaces the whole menu.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file inside the project root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full import configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub paths: PathsConfig,
    pub output: OutputConfig,
    /// Proportionally scaled derivatives, each bounded on its longer side.
    pub sizes: Vec<SizeSpec>,
    pub square: SquareSpec,
    pub import: ImportOptions,
    pub exif: ExifConfig,
}

impl ImportConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::Validation("sizes must not be empty".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for size in &self.sizes {
            validate_size_name(&size.name)?;
            if !seen.insert(size.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate size name '{}'",
                    size.name
                )));
            }
            if size.max_dimension == 0 {
                return Err(ConfigError::Validation(format!(
                    "sizes.{}.max_dimension must be non-zero",
                    size.name
                )));
            }
            validate_quality(&format!("sizes.{}.quality", size.name), size.quality)?;
        }
        validate_size_name(&self.square.name)?;
        if seen.contains(self.square.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "square.name '{}' collides with a size name",
                self.square.name
            )));
        }
        if self.square.size == 0 {
            return Err(ConfigError::Validation(
                "square.size must be non-zero".into(),
            ));
        }
        validate_quality("square.quality", self.square.quality)?;
        if self.output.format == OutputFormat::Webp {
            let tuned = self
                .sizes
                .iter()
                .map(|s| (format!("sizes.{}.quality", s.name), s.quality))
                .chain(std::iter::once(("square.quality".to_string(), self.square.quality)))
                .find(|(_, quality)| *quality != DEFAULT_QUALITY);
            if let Some((key, _)) = tuned {
                return Err(ConfigError::Validation(format!(
                    "{key} has no effect on lossless webp output; \
                     leave it at {DEFAULT_QUALITY} or use format = \"jpeg\""
                )));
            }
        }
        Ok(())
    }

    pub fn import_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.import_dir)
    }

    pub fn albums_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.albums_dir)
    }

    pub fn content_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.content_dir)
    }
}

fn validate_size_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name.contains(['/', '\\', '.']) {
        return Err(ConfigError::Validation(format!(
            "size name '{name}' must be non-empty and contain no '/', '\\' or '.'"
        )));
    }
    Ok(())
}

fn validate_quality(key: &str, quality: u8) -> Result<(), ConfigError> {
    if !(1..=100).contains(&quality) {
        return Err(ConfigError::Validation(format!("{key} must be 1-100")));
    }
    Ok(())
}

/// Filesystem locations, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Staging root where new albums are dropped.
    pub import_dir: String,
    /// Publish root where derivatives are written.
    pub albums_dir: String,
    /// Directory holding the album and photo metadata files.
    pub content_dir: String,
    /// Public URL prefix used to build each new album's `urlFormat`.
    pub url_prefix: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            import_dir: "public/assets/import-albums".to_string(),
            albums_dir: "public/assets/albums".to_string(),
            content_dir: "content".to_string(),
            url_prefix: "/assets/albums".to_string(),
        }
    }
}

/// Encoding used for every derivative of a deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG; original EXIF is carried into each derivative.
    #[default]
    Jpeg,
    /// Lossless WebP with EXIF; quality must stay at [`DEFAULT_QUALITY`].
    Webp,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// One entry of the resize menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeSpec {
    /// Suffix in the derivative filename (`{photo}-{name}.{ext}`).
    pub name: String,
    /// Bound on the longer side, in pixels. Sources are never upscaled.
    pub max_dimension: u32,
    pub quality: u8,
}

impl SizeSpec {
    pub fn new(name: &str, max_dimension: u32, quality: u8) -> Self {
        Self {
            name: name.to_string(),
            max_dimension,
            quality,
        }
    }
}

/// Encoder quality of the stock menu.
pub const DEFAULT_QUALITY: u8 = 80;

/// The menu every photo is rendered at: sm, md, lg, xl.
pub fn default_sizes() -> Vec<SizeSpec> {
    vec![
        SizeSpec::new("sm", 800, DEFAULT_QUALITY),
        SizeSpec::new("md", 2000, DEFAULT_QUALITY),
        SizeSpec::new("lg", 4000, DEFAULT_QUALITY),
        SizeSpec::new("xl", 6000, DEFAULT_QUALITY),
    ]
}

/// The centered square crop rendered for every photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SquareSpec {
    pub name: String,
    /// Side of the output canvas in pixels.
    pub size: u32,
    pub quality: u8,
}

impl Default for SquareSpec {
    fn default() -> Self {
        Self {
            name: "sq".to_string(),
            size: 640,
            quality: DEFAULT_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportOptions {
    /// Create the staging root when it is missing instead of failing.
    pub create_if_missing: bool,
    /// Process staged files in lexicographic filename order.
    pub sort_photos: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            create_if_missing: false,
            sort_photos: true,
        }
    }
}

/// Named groups of EXIF tag names, used by the `exif` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExifConfig {
    pub categories: BTreeMap<String, Vec<String>>,
}

impl Default for ExifConfig {
    fn default() -> Self {
        let category = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        let mut categories = BTreeMap::new();
        categories.insert(
            "camera".to_string(),
            category(&["Make", "Model", "LensSpecification", "LensModel"]),
        );
        categories.insert(
            "shooting".to_string(),
            category(&[
                "FocalLength",
                "FocalLengthIn35mmFilm",
                "ExposureMode",
                "ExposureProgram",
                "ExposureTime",
                "ExposureBiasValue",
                "FNumber",
                "PhotographicSensitivity",
                "MeteringMode",
                "ApertureValue",
                "ShutterSpeedValue",
                "DigitalZoomRatio",
                "WhiteBalance",
            ]),
        );
        categories.insert(
            "customized".to_string(),
            category(&["Artist", "Copyright", "ImageDescription"]),
        );
        categories.insert("flash".to_string(), category(&["Flash", "LightSource"]));
        categories.insert(
            "image".to_string(),
            category(&[
                "Orientation",
                "XResolution",
                "YResolution",
                "ResolutionUnit",
                "ColorSpace",
            ]),
        );
        categories.insert(
            "time".to_string(),
            category(&[
                "DateTimeOriginal",
                "DateTimeDigitized",
                "DateTime",
                "OffsetTime",
                "OffsetTimeOriginal",
                "OffsetTimeDigitized",
            ]),
        );
        categories.insert(
            "gps".to_string(),
            category(&[
                "GPSDateStamp",
                "GPSDifferential",
                "GPSLatitude",
                "GPSLatitudeRef",
                "GPSLongitude",
                "GPSLongitudeRef",
                "GPSAltitude",
                "GPSAltitudeRef",
                "GPSMapDatum",
                "GPSMeasureMode",
                "GPSStatus",
                "GPSTimeStamp",
                "GPSVersionID",
            ]),
        );
        Self { categories }
    }
}

impl ExifConfig {
    /// The named categories, or all of them when `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<BTreeMap<String, Vec<String>>, ConfigError> {
        if names.is_empty() {
            return Ok(self.categories.clone());
        }
        names
            .iter()
            .map(|name| {
                self.categories
                    .get(name)
                    .map(|tags| (name.clone(), tags.clone()))
                    .ok_or_else(|| {
                        let known: Vec<&str> = self.categories.keys().map(String::as_str).collect();
                        ConfigError::Validation(format!(
                            "unknown EXIF category '{name}' (known: {})",
                            known.join(", ")
                        ))
                    })
            })
            .collect()
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            output: OutputConfig::default(),
            sizes: default_sizes(),
            square: SquareSpec::default(),
            import: ImportOptions::default(),
            exif: ExifConfig::default(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock defaults as a `toml::Value::Table`, the base layer that
/// user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ImportConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (including arrays) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize, validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ImportConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ImportConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration for a project root.
pub fn load_config(root: &Path) -> Result<ImportConfig, ConfigError> {
    resolve_config(load_raw_config(root)?)
}

/// Returns a fully commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Album import configuration
# =========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# Staging root: drop one subdirectory per album here.
import_dir = "public/assets/import-albums"
# Publish root: derivatives land in <albums_dir>/<album>/<photo>-<size>.<ext>
albums_dir = "public/assets/albums"
# Album list (albums-meta.csv) and per-album photo lists (<album>/index.csv)
content_dir = "content"
# Public URL prefix used in each new album's urlFormat
url_prefix = "/assets/albums"

# ---------------------------------------------------------------------------
# Output encoding: "jpeg" (lossy) or "webp" (lossless, every quality
# must stay at 80). Both carry the original's EXIF.
# ---------------------------------------------------------------------------
[output]
format = "jpeg"

# ---------------------------------------------------------------------------
# Resize menu. Each entry bounds the longer side; sources are never upscaled.
# Setting [[sizes]] in your file replaces the whole menu.
# ---------------------------------------------------------------------------
[[sizes]]
name = "sm"
max_dimension = 800
quality = 80

[[sizes]]
name = "md"
max_dimension = 2000
quality = 80

[[sizes]]
name = "lg"
max_dimension = 4000
quality = 80

[[sizes]]
name = "xl"
max_dimension = 6000
quality = 80

# ---------------------------------------------------------------------------
# Square crop: centered, then resized to size x size
# ---------------------------------------------------------------------------
[square]
name = "sq"
size = 640
quality = 80

# ---------------------------------------------------------------------------
# Import behaviour
# ---------------------------------------------------------------------------
[import]
# Create the staging root when missing instead of stopping with an error.
create_if_missing = false
# Process staged photos in filename order (otherwise directory order).
sort_photos = true

# ---------------------------------------------------------------------------
# EXIF tag groups shown by `album-import exif`
# ---------------------------------------------------------------------------
[exif.categories]
camera = ["Make", "Model", "LensSpecification", "LensModel"]
shooting = [
    "FocalLength", "FocalLengthIn35mmFilm", "ExposureMode", "ExposureProgram",
    "ExposureTime", "ExposureBiasValue", "FNumber", "PhotographicSensitivity",
    "MeteringMode", "ApertureValue", "ShutterSpeedValue", "DigitalZoomRatio",
    "WhiteBalance",
]
customized = ["Artist", "Copyright", "ImageDescription"]
flash = ["Flash", "LightSource"]
image = ["Orientation", "XResolution", "YResolution", "ResolutionUnit", "ColorSpace"]
time = [
    "DateTimeOriginal", "DateTimeDigitized", "DateTime",
    "OffsetTime", "OffsetTimeOriginal", "OffsetTimeDigitized",
]
gps = [
    "GPSDateStamp", "GPSDifferential", "GPSLatitude", "GPSLatitudeRef",
    "GPSLongitude", "GPSLongitudeRef", "GPSAltitude", "GPSAltitudeRef",
    "GPSMapDatum", "GPSMeasureMode", "GPSStatus", "GPSTimeStamp", "GPSVersionID",
]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stock_config_has_fixed_menu() {
        let config = ImportConfig::default();
        let names: Vec<&str> = config.sizes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["sm", "md", "lg", "xl"]);
        let dims: Vec<u32> = config.sizes.iter().map(|s| s.max_dimension).collect();
        assert_eq!(dims, vec![800, 2000, 4000, 6000]);
        assert!(config.sizes.iter().all(|s| s.quality == 80));
        assert_eq!(config.square, SquareSpec::default());
        assert_eq!(config.square.size, 640);
        assert_eq!(config.output.format, OutputFormat::Jpeg);
    }

    #[test]
    fn stock_config_validates() {
        assert!(ImportConfig::default().validate().is_ok());
    }

    #[test]
    fn load_config_returns_stock_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.sizes, default_sizes());
        assert!(!config.import.create_if_missing);
        assert!(config.import.sort_photos);
    }

    #[test]
    fn partial_file_overrides_only_its_keys() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[square]
size = 400

[output]
format = "webp"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.square.size, 400);
        assert_eq!(config.square.quality, 80);
        assert_eq!(config.square.name, "sq");
        assert_eq!(config.output.format, OutputFormat::Webp);
        assert_eq!(config.sizes.len(), 4);
        assert_eq!(config.paths.content_dir, "content");
    }

    #[test]
    fn sizes_array_replaces_menu() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[[sizes]]
name = "thumb"
max_dimension = 300
quality = 70
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.sizes, vec![SizeSpec::new("thumb", 300, 70)]);
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[import]
create_if_mising = true
"#,
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "not toml [[[").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_quality() {
        let mut config = ImportConfig::default();
        config.sizes[0].quality = 0;
        assert!(config.validate().is_err());

        let mut config = ImportConfig::default();
        config.square.quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("square.quality"));
    }

    #[test]
    fn webp_rejects_tuned_quality() {
        let mut config = ImportConfig::default();
        config.output.format = OutputFormat::Webp;
        assert!(config.validate().is_ok());

        config.sizes[1].quality = 60;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sizes.md.quality"));

        config.sizes[1].quality = DEFAULT_QUALITY;
        config.square.quality = 95;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("square.quality"));

        config.output.format = OutputFormat::Jpeg;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn webp_file_with_quality_is_rejected_on_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[output]
format = "webp"

[square]
quality = 90
"#,
        )
        .unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_duplicate_and_colliding_names() {
        let mut config = ImportConfig::default();
        config.sizes.push(SizeSpec::new("sm", 100, 80));
        assert!(config.validate().is_err());

        let mut config = ImportConfig::default();
        config.square.name = "md".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_path_like_names() {
        let mut config = ImportConfig::default();
        config.sizes[0].name = "../sm".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_menu_and_zero_dims() {
        let mut config = ImportConfig::default();
        config.sizes.clear();
        assert!(config.validate().is_err());

        let mut config = ImportConfig::default();
        config.sizes[1].max_dimension = 0;
        assert!(config.validate().is_err());

        let mut config = ImportConfig::default();
        config.square.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[square]
quality = 200
"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[square]\nsize = 640\nquality = 80\n").unwrap();
        let overlay: toml::Value = toml::from_str("[square]\nsize = 400\n").unwrap();
        let merged = merge_toml(base, overlay);
        let square = merged.get("square").unwrap();
        assert_eq!(square.get("size").unwrap().as_integer(), Some(400));
        assert_eq!(square.get("quality").unwrap().as_integer(), Some(80));
    }

    #[test]
    fn output_format_extensions() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Webp.extension(), "webp");
    }

    #[test]
    fn paths_resolve_against_root() {
        let config = ImportConfig::default();
        let root = Path::new("/site");
        assert_eq!(
            config.import_dir(root),
            PathBuf::from("/site/public/assets/import-albums")
        );
        assert_eq!(config.albums_dir(root), PathBuf::from("/site/public/assets/albums"));
        assert_eq!(config.content_dir(root), PathBuf::from("/site/content"));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: ImportConfig = toml::from_str(stock_config_toml()).unwrap();
        let stock = ImportConfig::default();
        assert_eq!(config.sizes, stock.sizes);
        assert_eq!(config.square, stock.square);
        assert_eq!(config.paths.import_dir, stock.paths.import_dir);
        assert_eq!(config.exif.categories, stock.exif.categories);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_exif_categories_cover_gps() {
        let config = ExifConfig::default();
        assert!(config.categories["gps"].contains(&"GPSLatitude".to_string()));
        assert_eq!(config.categories.len(), 7);
    }

    #[test]
    fn exif_select_all_or_named() {
        let config = ExifConfig::default();
        assert_eq!(config.select(&[]).unwrap().len(), 7);

        let picked = config.select(&["camera".to_string()]).unwrap();
        assert_eq!(picked.keys().collect::<Vec<_>>(), vec!["camera"]);

        let err = config.select(&["lens".to_string()]).unwrap_err();
        assert!(err.to_string().contains("unknown EXIF category 'lens'"));
    }
}
