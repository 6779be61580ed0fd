//! Icon manifest entries and their grouping by logical name.
//!
//! The remote icon repository keeps one directory per encoding:
//!
//! ```text
//! svg/jellyfin.svg
//! png/jellyfin.png
//! webp/jellyfin.webp
//! png/sonarr.png
//! ```
//!
//! [`group_icon_entries`] folds a recursive tree listing of that repository
//! into one [`IconInfo`] per logical name, listing the encodings available
//! for it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// An icon encoding offered by the remote repository.
///
/// The derived ordering (`svg < png < webp`) is the order formats are listed
/// in an [`IconInfo`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IconFormat {
    Svg,
    #[default]
    Png,
    Webp,
}

impl IconFormat {
    pub const ALL: [IconFormat; 3] = [IconFormat::Svg, IconFormat::Png, IconFormat::Webp];

    /// Directory name and file extension for this encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            IconFormat::Svg => "svg",
            IconFormat::Png => "png",
            IconFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for IconFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::new("format", format!("`{s}` is not one of svg, png, webp")))
    }
}

/// One entry of the remote recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// `"blob"` for files, `"tree"` for directories.
    #[serde(rename = "type")]
    pub kind: String,
}

impl TreeEntry {
    pub fn blob(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: "blob".to_string(),
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

/// A logical icon and the encodings available for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconInfo {
    pub name: String,
    pub formats: Vec<IconFormat>,
}

/// Groups a tree listing into icons sorted by name.
///
/// Only blobs of the form `<dir>/<name>.<ext>` are considered, where both
/// `dir` and `ext` are known formats.  The extension decides the format, so
/// `svg/foo.png` counts as a PNG of `foo`.  Names that would
/// need a nested directory (`png/brand/foo.png`) are skipped because they
/// cannot be stored as a flat asset file.  Names sort by byte order, so the
/// ordering is case-sensitive and stable across refreshes.
pub fn group_icon_entries<'a, I>(entries: I) -> Vec<IconInfo>
where
    I: IntoIterator<Item = &'a TreeEntry>,
{
    let mut grouped: BTreeMap<String, BTreeSet<IconFormat>> = BTreeMap::new();

    for entry in entries.into_iter().filter(|e| e.is_blob()) {
        if let Some((name, format)) = parse_icon_path(&entry.path) {
            grouped.entry(name.to_string()).or_default().insert(format);
        }
    }

    grouped
        .into_iter()
        .map(|(name, formats)| IconInfo {
            name,
            formats: formats.into_iter().collect(),
        })
        .collect()
}

/// Returns `true` when `name` can be used as a flat file name inside the
/// asset directory: non-empty, no path separators, no parent-directory
/// sequence, no NUL.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
        && name.trim() == name
}

fn parse_icon_path(path: &str) -> Option<(&str, IconFormat)> {
    let (dir, file) = path.split_once('/')?;
    if dir.parse::<IconFormat>().is_err() {
        return None;
    }
    let (name, ext) = file.rsplit_once('.')?;
    let format: IconFormat = ext.parse().ok()?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some((name, format))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
