use std::path::{Path, PathBuf};

/// Photo file extensions (matched uppercased, the way cameras name files).
const PHOTO_EXTENSIONS: &[&str] = &["JPG", "JPEG"];

/// Video file extensions (matched uppercased).
const VIDEO_EXTENSIONS: &[&str] = &["MP4", "MOV"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Unknown,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a file by its extension.
pub fn detect_media_kind(path: &Path) -> MediaKind {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let ext = ext.to_uppercase();
            if PHOTO_EXTENSIONS.contains(&ext.as_str()) {
                MediaKind::Photo
            } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
                MediaKind::Video
            } else {
                MediaKind::Unknown
            }
        }
        None => MediaKind::Unknown,
    }
}

/// A file queued for sorting, with its extension-derived kind.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaFile {
    pub fn new(path: PathBuf) -> Self {
        let kind = detect_media_kind(&path);
        MediaFile { path, kind }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}
