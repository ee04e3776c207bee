use crate::mediasort_core::error::{MediasortError, Result};
use exiftool::ExifTool;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use time::PrimitiveDateTime;

/// Date format used in exiftool tag descriptions.
const TAG_DATE_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");

/// A named group of metadata tags, e.g. "IFD0" or "Keys".
#[derive(Debug, Clone, Serialize)]
pub struct MetadataDirectory {
    pub name: String,
    pub tags: BTreeMap<String, String>,
}

impl MetadataDirectory {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    /// Look up a tag and parse it as a date. Unparseable values count as absent.
    pub fn date_tag(&self, name: &str) -> Option<PrimitiveDateTime> {
        self.tag(name).and_then(parse_tag_date)
    }
}

/// Grouped metadata lookups for a file.
///
/// An unreadable file is an error; a readable file that lacks some directory
/// or tag simply yields fewer entries, which is a normal result.
pub trait MetadataSource {
    fn directories(&mut self, path: &Path) -> Result<Vec<MetadataDirectory>>;
}

/// Metadata source backed by a persistent exiftool process.
///
/// The process is spawned on the first actual read, so runs that never touch
/// a photo or video work without exiftool installed.
pub struct ExifToolSource {
    tool: Option<ExifTool>,
}

impl ExifToolSource {
    pub fn new() -> Self {
        ExifToolSource { tool: None }
    }

    fn tool(&mut self) -> Result<&mut ExifTool> {
        if self.tool.is_none() {
            let tool = ExifTool::new().map_err(|e| MediasortError::Exiftool(e.to_string()))?;
            self.tool = Some(tool);
        }
        Ok(self.tool.as_mut().unwrap())
    }
}

impl Default for ExifToolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for ExifToolSource {
    fn directories(&mut self, path: &Path) -> Result<Vec<MetadataDirectory>> {
        let tool = self.tool()?;
        // -G1 qualifies every tag with its specific group, e.g. "IFD0:ModifyDate".
        let raw: Value = tool.read_metadata(path, &["-G1"]).map_err(|e| {
            MediasortError::MetadataExtraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Ok(group_directories(&raw))
    }
}

/// Regroup "-G1"-qualified tags into named directories.
fn group_directories(raw: &Value) -> Vec<MetadataDirectory> {
    let mut groups: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    if let Some(map) = raw.as_object() {
        for (key, value) in map {
            // SourceFile carries no group prefix
            let Some((group, tag)) = key.split_once(':') else {
                continue;
            };
            groups
                .entry(group.to_string())
                .or_default()
                .insert(tag.to_string(), describe(value));
        }
    }
    groups
        .into_iter()
        .map(|(name, tags)| MetadataDirectory { name, tags })
        .collect()
}

/// Render a tag value the way exiftool prints it.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(describe)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Parse an exiftool date description ("2023:05:14 10:00:00", possibly
/// followed by subseconds or a UTC offset) as a naive local datetime.
/// Any trailing offset is dropped: tags are read as the device's wall clock.
pub fn parse_tag_date(raw: &str) -> Option<PrimitiveDateTime> {
    let head = raw.trim().get(..19)?;
    PrimitiveDateTime::parse(head, TAG_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn test_parse_plain_tag_date() {
        assert_eq!(
            parse_tag_date("2023:05:14 10:00:00"),
            Some(datetime!(2023-05-14 10:00:00))
        );
    }

    #[test]
    fn test_parse_tag_date_drops_offset_suffix() {
        assert_eq!(
            parse_tag_date("2023:06:01 09:00:00+02:00"),
            Some(datetime!(2023-06-01 09:00:00))
        );
    }

    #[test]
    fn test_parse_tag_date_drops_subseconds() {
        assert_eq!(
            parse_tag_date("2024:01:02 03:04:05.123"),
            Some(datetime!(2024-01-02 03:04:05))
        );
    }

    #[test]
    fn test_parse_invalid_tag_date() {
        assert_eq!(parse_tag_date(""), None);
        assert_eq!(parse_tag_date("2023:05:14"), None);
        assert_eq!(parse_tag_date("definitely not a date"), None);
        assert_eq!(parse_tag_date("0000:00:00 00:00:00"), None);
    }

    #[test]
    fn test_group_directories() {
        let raw = json!({
            "SourceFile": "/tmp/a.jpg",
            "ExifTool:ExifToolVersion": 12.76,
            "IFD0:Make": "Canon",
            "IFD0:ModifyDate": "2023:05:14 10:00:00",
            "ExifIFD:DateTimeOriginal": "2023:05:14 09:59:58",
        });

        let dirs = group_directories(&raw);
        let names: Vec<&str> = dirs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["ExifIFD", "ExifTool", "IFD0"]);

        let ifd0 = dirs.iter().find(|d| d.name == "IFD0").unwrap();
        assert_eq!(ifd0.tags.len(), 2);
        assert_eq!(ifd0.tag("Make"), Some("Canon"));
        assert_eq!(
            ifd0.date_tag("ModifyDate"),
            Some(datetime!(2023-05-14 10:00:00))
        );
        assert_eq!(ifd0.date_tag("Make"), None);
    }
}
