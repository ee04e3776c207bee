use crate::mediasort_core::error::{MediasortError, Result};
use crate::mediasort_core::media::{MediaFile, MediaKind};
use crate::mediasort_core::metadata::{MetadataDirectory, MetadataSource};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use walkdir::WalkDir;

/// Date format for destination subdirectory names.
pub const MONTH_DIR_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year][month]");

const DISPLAY_DATE_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Hours added to video and file-time dates by default. Some cameras store
/// the QuickTime creation date shifted by an hour; file times inherit the
/// same correction.
pub const DEFAULT_CLOCK_SKEW_HOURS: i64 = 1;

/// One metadata lookup in a fallback chain. `skewed` marks dates that get the
/// clock-skew correction applied.
struct DateLookup {
    directory: &'static str,
    tag: &'static str,
    skewed: bool,
}

/// Photo dates: IFD0 first, then the original capture date from the EXIF
/// SubIFD. exiftool reports the IFD0 DateTime tag (0x0132) as ModifyDate.
const PHOTO_DATE_LOOKUPS: &[DateLookup] = &[
    DateLookup {
        directory: "IFD0",
        tag: "ModifyDate",
        skewed: false,
    },
    DateLookup {
        directory: "ExifIFD",
        tag: "DateTimeOriginal",
        skewed: false,
    },
];

/// Video dates: the com.apple.quicktime.creationdate entry only. Plain MP4s
/// usually lack it and fall through to file times.
const VIDEO_DATE_LOOKUPS: &[DateLookup] = &[DateLookup {
    directory: "Keys",
    tag: "CreationDate",
    skewed: true,
}];

fn date_lookups(kind: MediaKind) -> &'static [DateLookup] {
    match kind {
        MediaKind::Photo => PHOTO_DATE_LOOKUPS,
        MediaKind::Video => VIDEO_DATE_LOOKUPS,
        MediaKind::Unknown => &[],
    }
}

struct ResolvedDate {
    date: PrimitiveDateTime,
    fallback: bool,
}

/// Sorts media files into year-month subdirectories keyed by creation date.
pub struct Organizer<S: MetadataSource> {
    source: S,
    clock_skew: Duration,
}

impl<S: MetadataSource> Organizer<S> {
    pub fn new(source: S, clock_skew_hours: i64) -> Self {
        Organizer {
            source,
            clock_skew: Duration::hours(clock_skew_hours),
        }
    }

    /// Sort every direct child file of `input_dir` into `output_dir/YYYYMM/`.
    ///
    /// Subdirectories are ignored. Unknown file kinds are skipped. Any
    /// metadata read failure or filesystem failure aborts the whole run;
    /// files already moved stay moved.
    pub fn sort(&mut self, input_dir: &Path, output_dir: &Path, dry_run: bool) -> Result<SortStats> {
        if !input_dir.exists() {
            return Err(MediasortError::PathNotFound(input_dir.to_path_buf()));
        }
        if !input_dir.is_dir() {
            return Err(MediasortError::NotADirectory(input_dir.to_path_buf()));
        }

        // Direct children only, regular files, in directory-listing order.
        let mut files = Vec::new();
        for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(MediaFile::new(entry.into_path()));
            }
        }

        let bar = if dry_run {
            None
        } else {
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap();
            Some(
                ProgressBar::new(files.len() as u64)
                    .with_style(style)
                    .with_message("Sorting files"),
            )
        };

        let mut stats = SortStats::default();

        for file in &files {
            match file.kind {
                MediaKind::Unknown => {
                    log::debug!("Skipping unknown file: {}", file.path.display());
                    stats.unknown_skipped += 1;
                }
                MediaKind::Photo | MediaKind::Video => {
                    let resolved = self.resolve_date(file)?;
                    if resolved.fallback {
                        stats.fallback_dates += 1;
                    }
                    let month = resolved.date.format(MONTH_DIR_FORMAT).unwrap();
                    self.relocate(file, output_dir, &month, dry_run)?;
                    match file.kind {
                        MediaKind::Photo => stats.photos_moved += 1,
                        _ => stats.videos_moved += 1,
                    }
                }
            }
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &bar {
            bar.finish_with_message("Done");
        }

        Ok(stats)
    }

    /// Dump every metadata directory and tag found for one file, plus the
    /// date the sorter would use. Diagnostic aid, not part of the pipeline.
    pub fn inspect(&mut self, path: &Path, json: bool) -> Result<()> {
        if !path.exists() {
            return Err(MediasortError::PathNotFound(path.to_path_buf()));
        }

        let file = MediaFile::new(path.to_path_buf());
        let directories = self.source.directories(path)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&directories)?);
        } else {
            println!("{}", path.display());
            for dir in &directories {
                println!("- {}", dir.name);
                for (tag, description) in &dir.tags {
                    println!("  - {}, {}, {}", dir.name, tag, description);
                }
            }
        }

        match file.kind {
            MediaKind::Unknown => println!("Unknown media kind, no creation date resolved"),
            _ => {
                let resolved = self.resolve_date(&file)?;
                println!(
                    "Resolved creation date: {} (from {})",
                    resolved.date.format(DISPLAY_DATE_FORMAT).unwrap(),
                    if resolved.fallback { "file times" } else { "metadata" },
                );
            }
        }

        Ok(())
    }

    /// Resolve a file's creation date. Metadata lookups run in priority order
    /// and the first hit wins; file timestamps are the guaranteed fallback.
    fn resolve_date(&mut self, file: &MediaFile) -> Result<ResolvedDate> {
        let directories = self.source.directories(&file.path)?;

        if let Some((lookup, date)) = first_date(&directories, date_lookups(file.kind)) {
            let date = if lookup.skewed {
                date + self.clock_skew
            } else {
                date
            };
            return Ok(ResolvedDate {
                date,
                fallback: false,
            });
        }

        log::warn!(
            "No metadata date in {}, falling back to file times",
            file.path.display()
        );
        let date = file_date(&file.path)? + self.clock_skew;
        Ok(ResolvedDate {
            date,
            fallback: true,
        })
    }

    /// Move a file into `output_dir/<month>/`, creating the month directory
    /// when needed. Dry runs only report what would happen.
    fn relocate(&self, file: &MediaFile, output_dir: &Path, month: &str, dry_run: bool) -> Result<()> {
        let dest_dir = output_dir.join(month);
        if !dest_dir.exists() {
            if dry_run {
                println!("Would create directory {}", dest_dir.display());
            } else {
                // Single level only: a missing output root is an error.
                fs::create_dir(&dest_dir)?;
            }
        }

        let destination = dest_dir.join(file.file_name());
        if dry_run {
            println!(
                "Would move {} -> {}",
                file.path.display(),
                destination.display()
            );
            return Ok(());
        }

        if destination.exists() {
            return Err(MediasortError::DestinationExists(destination));
        }
        fs::rename(&file.path, &destination)?;
        log::debug!(
            "Moved {} -> {}",
            file.path.display(),
            destination.display()
        );

        Ok(())
    }
}

/// Evaluate lookups in order; the first directory/tag pair yielding a date wins.
fn first_date<'a>(
    directories: &[MetadataDirectory],
    lookups: &'a [DateLookup],
) -> Option<(&'a DateLookup, PrimitiveDateTime)> {
    lookups.iter().find_map(|lookup| {
        directories
            .iter()
            .find(|d| d.name == lookup.directory)
            .and_then(|d| d.date_tag(lookup.tag))
            .map(|date| (lookup, date))
    })
}

/// The earlier of a file's creation and modification times, as local wall
/// time. Creation time is unavailable on some filesystems; modification time
/// alone is used there.
fn file_date(path: &Path) -> Result<PrimitiveDateTime> {
    let meta = fs::metadata(path)?;
    let modified = OffsetDateTime::from(meta.modified()?);
    let earliest = match meta.created() {
        Ok(created) => modified.min(OffsetDateTime::from(created)),
        Err(_) => modified,
    };
    let local = earliest.to_offset(local_offset());
    Ok(PrimitiveDateTime::new(local.date(), local.time()))
}

/// Local timezone offset, UTC when it cannot be determined.
fn local_offset() -> UtcOffset {
    OffsetDateTime::now_local()
        .map(|dt| dt.offset())
        .unwrap_or(UtcOffset::UTC)
}

/// Statistics from a sort operation. In a dry run the counts describe the
/// planned moves.
#[derive(Debug, Default)]
pub struct SortStats {
    pub photos_moved: usize,
    pub videos_moved: usize,
    pub unknown_skipped: usize,
    pub fallback_dates: usize,
}

impl std::fmt::Display for SortStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} photos, {} videos ({} unknown skipped, {} dated from file times)",
            self.photos_moved, self.videos_moved, self.unknown_skipped, self.fallback_dates
        )
    }
}
