//! Date-derived output locations.
//!
//! Scraped pages are usually archived by the day they were fetched; these
//! helpers build `root/%Y/%m` style directory trees and date-stamped file
//! names.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::error::Result;

/// Default directory layout below the output root.
pub const DEFAULT_DIRECTORY_PATTERN: &str = "%Y/%m";

/// Default file-name stamp for a calendar date.
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";

/// Default file-name stamp for a timestamp.
pub const DEFAULT_DATETIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// A calendar date or a full timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Stamp {
    fn format(self, pattern: &str) -> String {
        match self {
            Self::Date(date) => date.format(pattern).to_string(),
            Self::DateTime(datetime) => datetime.format(pattern).to_string(),
        }
    }

    fn default_pattern(self) -> &'static str {
        match self {
            Self::Date(_) => DEFAULT_DATE_PATTERN,
            Self::DateTime(_) => DEFAULT_DATETIME_PATTERN,
        }
    }
}

impl From<NaiveDate> for Stamp {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for Stamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::DateTime(datetime)
    }
}

/// Directory for `date` below `root`, without touching the filesystem.
///
/// `pattern` is a chrono format string; `None` uses [`DEFAULT_DIRECTORY_PATTERN`].
#[must_use]
pub fn date_directory(root: &Path, date: NaiveDate, pattern: Option<&str>) -> PathBuf {
    root.join(
        date.format(pattern.unwrap_or(DEFAULT_DIRECTORY_PATTERN))
            .to_string(),
    )
}

/// Create the directory for `date` below `root` (and any parents).
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the directories cannot be created.
pub fn make_date_directory(root: &Path, date: NaiveDate, pattern: Option<&str>) -> Result<PathBuf> {
    let dir = date_directory(root, date, pattern);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Build `prefix + stamp + suffix + extension`.
///
/// `extension` includes its dot, e.g. `".json"`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use rs_tagscrape::fileutils::file_name_from_date;
///
/// let date = NaiveDate::from_ymd_opt(2022, 1, 12).unwrap_or_default();
/// assert_eq!(file_name_from_date(date, None, "prefix_", "_suffix", ".json"), "prefix_2022-01-12_suffix.json");
/// ```
#[must_use]
pub fn file_name_from_date(
    stamp: impl Into<Stamp>,
    pattern: Option<&str>,
    prefix: &str,
    suffix: &str,
    extension: &str,
) -> String {
    let stamp = stamp.into();
    let formatted = stamp.format(pattern.unwrap_or(stamp.default_pattern()));
    format!("{prefix}{formatted}{suffix}{extension}")
}

/// Create the date directory for `now` below `root` and return the path of a
/// date-stamped file inside it.
///
/// Directory and file name derive from the same instant, so they always
/// agree on the month.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the directories cannot be created.
pub fn make_output_path(root: &Path, now: NaiveDateTime, extension: &str) -> Result<PathBuf> {
    let dir = make_date_directory(root, now.date(), None)?;
    Ok(dir.join(file_name_from_date(now, None, "", "", extension)))
}

/// Current UTC time at second precision, ISO-8601 without offset.
#[must_use]
pub fn extraction_timestamp() -> String {
    Utc::now().format(DEFAULT_DATETIME_PATTERN).to_string()
}
