//! EXIF tag filtering.
//!
//! Tags are kept as a map from numeric tag id to value. GPS tags live in
//! their own IFD, so they are nested under the reserved GPSInfo id
//! ([`GPS_INFO_TAG`]) as a block keyed by GPS sub-tag id:
//!
//! ```text
//! 0x010F Make          → "X"
//! 0x0110 Model         → "Y"
//! 0x8825 GPSInfo       → { 0x0002 Latitude → [35.0, 40.0, 12.5] }
//! ```
//!
//! Filtering works on human-readable names resolved through `kamadak-exif`'s
//! tag tables. A GPS sub-tag is kept when `"GPS" + <sub-tag name>` is in the
//! keep set (`GPSLatitude`, `GPSAltitudeRef`, ...), and the GPS block only
//! survives when at least one of its sub-tags does.
//!
//! Absent input maps to absent output: `None` means "no EXIF at all", while
//! `Some(empty)` means "EXIF present, nothing kept". Everything here is pure
//! except [`read_file_tags`].

use exif::{Context, In, Tag};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Tag id of the GPS IFD pointer, which holds the nested GPS block.
pub const GPS_INFO_TAG: u16 = 0x8825;

/// Name used for the GPS block when tags are rendered by name.
pub const GPS_INFO_NAME: &str = "GPSInfo";

/// A single tag value: a loosely typed leaf, or the nested GPS block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Value(serde_json::Value),
    Block(BTreeMap<u16, serde_json::Value>),
}

/// EXIF tags keyed by tag id.
pub type ExifTags = BTreeMap<u16, TagValue>;

/// Resolve a primary-IFD tag id (TIFF or Exif IFD) to its name.
pub fn tag_name(id: u16) -> Option<String> {
    [Context::Tiff, Context::Exif]
        .into_iter()
        .map(|ctx| Tag(ctx, id))
        .find(|tag| tag.description().is_some())
        .map(|tag| tag.to_string())
}

/// Resolve a GPS sub-tag id to its name without the `GPS` prefix
/// (`2` → `"Latitude"`).
pub fn gps_tag_name(id: u16) -> Option<String> {
    let tag = Tag(Context::Gps, id);
    tag.description()?;
    let name = tag.to_string();
    Some(name.strip_prefix("GPS").unwrap_or(&name).to_string())
}

/// Keep only tags whose resolved name is in `keep_names`.
pub fn filter_tags(tags: Option<&ExifTags>, keep_names: &HashSet<String>) -> Option<ExifTags> {
    let tags = tags?;
    let mut filtered = ExifTags::new();

    for (&id, value) in tags {
        if id == GPS_INFO_TAG {
            continue;
        }
        if tag_name(id).is_some_and(|name| keep_names.contains(&name)) {
            filtered.insert(id, value.clone());
        }
    }

    if let Some(TagValue::Block(gps)) = tags.get(&GPS_INFO_TAG) {
        let kept: BTreeMap<u16, serde_json::Value> = gps
            .iter()
            .filter(|(id, _)| {
                gps_tag_name(**id).is_some_and(|name| keep_names.contains(&format!("GPS{name}")))
            })
            .map(|(id, value)| (*id, value.clone()))
            .collect();
        if !kept.is_empty() {
            filtered.insert(GPS_INFO_TAG, TagValue::Block(kept));
        }
    }

    Some(filtered)
}

/// Flatten every category's name list into one keep set and filter by it.
pub fn filter_by_categories(
    tags: Option<&ExifTags>,
    categories: &BTreeMap<String, Vec<String>>,
) -> Option<ExifTags> {
    let keep: HashSet<String> = categories.values().flatten().cloned().collect();
    filter_tags(tags, &keep)
}

/// Render tags keyed by name, GPS tags nested under `GPSInfo` with their
/// full `GPS*` names. Unknown ids render as `Tag0xNNNN`.
pub fn named_tags(tags: &ExifTags) -> serde_json::Map<String, serde_json::Value> {
    let mut named = serde_json::Map::new();
    for (&id, value) in tags {
        match value {
            TagValue::Block(gps) if id == GPS_INFO_TAG => {
                let block = gps
                    .iter()
                    .map(|(sub, v)| {
                        let name = gps_tag_name(*sub)
                            .map(|n| format!("GPS{n}"))
                            .unwrap_or_else(|| format!("GPSTag0x{sub:04X}"));
                        (name, v.clone())
                    })
                    .collect();
                named.insert(GPS_INFO_NAME.to_string(), serde_json::Value::Object(block));
            }
            TagValue::Block(_) => {}
            TagValue::Value(v) => {
                let name = tag_name(id).unwrap_or_else(|| format!("Tag0x{id:04X}"));
                named.insert(name, v.clone());
            }
        }
    }
    named
}

/// Read the primary-image EXIF tags of an image file.
///
/// Returns `Ok(None)` when the file carries no EXIF (or it cannot be parsed);
/// only I/O failures are errors.
pub fn read_file_tags(path: &Path) -> std::io::Result<Option<ExifTags>> {
    let mut reader = BufReader::new(File::open(path)?);
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(Some(collect_tags(&exif))),
        Err(exif::Error::Io(e)) => Err(e),
        Err(_) => Ok(None),
    }
}

/// Parse a raw TIFF-structured EXIF payload (the APP1 body after `Exif\0\0`).
pub fn parse_tiff_tags(tiff: &[u8]) -> Option<ExifTags> {
    exif::Reader::new()
        .read_raw(tiff.to_vec())
        .ok()
        .map(|exif| collect_tags(&exif))
}

fn collect_tags(exif: &exif::Exif) -> ExifTags {
    let mut tags = ExifTags::new();
    let mut gps = BTreeMap::new();

    for field in exif.fields() {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        match field.tag.context() {
            Context::Gps => {
                gps.insert(field.tag.number(), value_to_json(&field.value));
            }
            Context::Tiff | Context::Exif => {
                if field.tag == Tag::GPSInfoIFDPointer
                    || field.tag == Tag::ExifIFDPointer
                    || field.tag == Tag::InteropIFDPointer
                {
                    continue;
                }
                tags.insert(
                    field.tag.number(),
                    TagValue::Value(value_to_json(&field.value)),
                );
            }
            _ => {}
        }
    }

    if !gps.is_empty() {
        tags.insert(GPS_INFO_TAG, TagValue::Block(gps));
    }
    tags
}

fn value_to_json(value: &exif::Value) -> serde_json::Value {
    use serde_json::Value as J;

    fn collapse(mut items: Vec<J>) -> J {
        if items.len() == 1 {
            items.remove(0)
        } else {
            J::Array(items)
        }
    }

    fn float(x: f64) -> J {
        serde_json::Number::from_f64(x)
            .map(J::Number)
            .unwrap_or(J::Null)
    }

    fn text(bytes: &[u8]) -> J {
        J::String(
            String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .trim()
                .to_string(),
        )
    }

    match value {
        exif::Value::Ascii(parts) => collapse(parts.iter().map(|p| text(p)).collect()),
        exif::Value::Byte(v) => collapse(v.iter().map(|n| J::from(*n)).collect()),
        exif::Value::Short(v) => collapse(v.iter().map(|n| J::from(*n)).collect()),
        exif::Value::Long(v) => collapse(v.iter().map(|n| J::from(*n)).collect()),
        exif::Value::SByte(v) => collapse(v.iter().map(|n| J::from(*n)).collect()),
        exif::Value::SShort(v) => collapse(v.iter().map(|n| J::from(*n)).collect()),
        exif::Value::SLong(v) => collapse(v.iter().map(|n| J::from(*n)).collect()),
        exif::Value::Rational(v) => collapse(v.iter().map(|r| float(r.to_f64())).collect()),
        exif::Value::SRational(v) => collapse(v.iter().map(|r| float(r.to_f64())).collect()),
        exif::Value::Float(v) => collapse(v.iter().map(|x| float(f64::from(*x))).collect()),
        exif::Value::Double(v) => collapse(v.iter().map(|x| float(*x)).collect()),
        exif::Value::Undefined(bytes, _) => text(bytes),
        _ => J::Null,
    }
}
