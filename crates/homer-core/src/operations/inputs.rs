//! Operation inputs and their validation rules.
//!
//! Enumerated fields ([`Columns`], [`Direction`]) are typed, so an unknown
//! value is rejected while the input is decoded.  Required text fields are
//! plain strings and are checked by `validate()`.

use serde::{Deserialize, Serialize};

use crate::domain::document::{Columns, ServiceCategory, ServiceItem};
use crate::domain::icon::{is_safe_file_name, IconFormat};
use crate::domain::validation::{require_non_empty, ValidationError};

/// Logo written for a new item when none is given.
pub const DEFAULT_ITEM_LOGO: &str = "assets/tools/default.png";
/// Tag written for a new item when none is given.
pub const DEFAULT_ITEM_TAG: &str = "App";
/// Tag style written for a new item when none is given.
pub const DEFAULT_ITEM_TAGSTYLE: &str = "is-info";
/// Link target written for a new item when none is given.
pub const DEFAULT_ITEM_TARGET: &str = "_blank";

/// Which neighbour to swap with when reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards position 0.
    Up,
    /// Towards the end of the list.
    Down,
}

/// Top-level display settings.
///
/// Every field is required: the whole set replaces the stored values, so an
/// omitted key is a malformed request rather than an empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettingsInput {
    pub title: String,
    pub subtitle: String,
    pub columns: Columns,
    pub theme: String,
}

impl GlobalSettingsInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)
    }
}

/// Fields of a category, used both to add one and to update one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub icon: String,
}

impl CategoryInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("icon", &self.icon)
    }

    /// Builds a new, empty category from these fields.
    pub fn into_category(self) -> ServiceCategory {
        ServiceCategory {
            name: self.name,
            icon: self.icon,
            ..ServiceCategory::default()
        }
    }
}

/// Fields for appending an item.  Blank optional fields receive defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItemInput {
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub tagstyle: String,
    pub url: String,
    #[serde(default)]
    pub target: String,
}

impl NewItemInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("url", &self.url)
    }

    pub fn into_item(self) -> ServiceItem {
        ServiceItem {
            name: self.name,
            subtitle: self.subtitle,
            logo: or_default(self.logo, DEFAULT_ITEM_LOGO),
            tag: Some(or_default(self.tag, DEFAULT_ITEM_TAG)),
            tagstyle: Some(or_default(self.tagstyle, DEFAULT_ITEM_TAGSTYLE)),
            url: self.url,
            target: or_default(self.target, DEFAULT_ITEM_TARGET),
            ..ServiceItem::default()
        }
    }
}

/// Replacement fields for an existing item.
///
/// Applied verbatim: an absent `tag` clears the item's tag.  `logo` and
/// `target` must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdateInput {
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub logo: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub tagstyle: Option<String>,
    pub url: String,
    pub target: String,
}

impl ItemUpdateInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("url", &self.url)
    }

    /// Overwrites the editable fields of `item`, keeping its unknown keys.
    pub fn apply_to(self, item: &mut ServiceItem) {
        item.name = self.name;
        item.subtitle = self.subtitle;
        item.logo = self.logo;
        item.tag = self.tag;
        item.tagstyle = self.tagstyle;
        item.url = self.url;
        item.target = self.target;
    }
}

/// Reorder request for a category or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub direction: Direction,
}

/// Request to fetch one icon from the remote repository into local assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadInput {
    pub name: String,
    #[serde(default)]
    pub format: IconFormat,
}

impl DownloadInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        if !is_safe_file_name(&self.name) {
            return Err(ValidationError::new(
                "name",
                "must not contain path separators or `..`",
            ));
        }
        Ok(())
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
