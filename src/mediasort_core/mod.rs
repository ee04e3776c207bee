pub mod cli;
pub mod error;
pub mod media;
pub mod metadata;
pub mod organize;

pub use cli::{Cli, Commands};
pub use error::MediasortError;
pub use media::{MediaFile, MediaKind, detect_media_kind};
pub use metadata::{ExifToolSource, MetadataDirectory, MetadataSource};
pub use organize::{DEFAULT_CLOCK_SKEW_HOURS, MONTH_DIR_FORMAT, Organizer, SortStats};
