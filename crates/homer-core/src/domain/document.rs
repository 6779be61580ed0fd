//! The dashboard configuration document.
//!
//! This is the Rust view of the `config.yml` file the dashboard renders from:
//!
//! ```yaml
//! title: "Home"
//! subtitle: "Lab"
//! columns: "3"
//! colors:
//!   light:
//!     highlight-primary: "#3367d6"
//! services:
//!   - name: "Media"
//!     icon: "fas fa-film"
//!     items:
//!       - name: "Jellyfin"
//!         logo: "assets/tools/jellyfin.png"
//!         url: "http://jellyfin.lan"
//!         target: "_blank"
//! ```
//!
//! # Hand-edited files
//!
//! The file is schema-shaped but not schema-enforced at rest.  Every field
//! carries a serde default so a document missing optional keys still loads,
//! and an explicit `null` (`subtitle:` with no value) is read as the default
//! as well.  Text fields take any scalar, so `subtitle: 2024` reads as the
//! string `"2024"`.  Keys this model does not know about are kept in the `extra` maps
//! and written back after the known keys, so a round trip through the manager
//! never drops settings it does not edit.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::validation::ValidationError;

/// Unknown keys carried through a read → write cycle untouched.
pub type ExtraFields = BTreeMap<String, serde_yaml::Value>;

// ── Document types ────────────────────────────────────────────────────────────

/// The full persisted configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "text")]
    pub logo: String,
    /// Page header setting.  Consumed only by the dashboard renderer.
    #[serde(default)]
    pub header: Toggle,
    /// Page footer setting, often an HTML snippet.  Consumed only by the
    /// dashboard renderer.
    #[serde(default)]
    pub footer: Toggle,
    /// Additional stylesheet references, in load order.
    #[serde(default, deserialize_with = "nullable")]
    pub stylesheet: Vec<String>,
    #[serde(default)]
    pub columns: Columns,
    #[serde(default = "default_theme", deserialize_with = "theme_text")]
    pub theme: String,
    #[serde(default, deserialize_with = "nullable")]
    pub colors: Colors,
    /// Service categories in display order.
    #[serde(default, deserialize_with = "nullable")]
    pub services: Vec<ServiceCategory>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Light and dark colour palettes.
///
/// Role names are open-ended (`highlight-primary`, `card-background`, ...), so
/// both palettes are plain maps rather than a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    #[serde(default, deserialize_with = "nullable")]
    pub light: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "nullable")]
    pub dark: BTreeMap<String, String>,
}

/// A named, ordered group of items rendered together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    /// Icon class name or logo path.
    #[serde(default, deserialize_with = "text")]
    pub icon: String,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<ServiceItem>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A single linked entry within a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle: Option<String>,
    /// Logo path (usually `assets/tools/<file>`) or icon identifier.
    #[serde(default, deserialize_with = "text")]
    pub logo: String,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tagstyle: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub url: String,
    /// Link target attribute, e.g. `_blank` or `_self`.
    #[serde(default, deserialize_with = "text")]
    pub target: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            logo: String::new(),
            header: Toggle::default(),
            footer: Toggle::default(),
            stylesheet: Vec::new(),
            columns: Columns::default(),
            theme: default_theme(),
            colors: Colors::default(),
            services: Vec::new(),
            extra: ExtraFields::new(),
        }
    }
}

// ── Toggle ────────────────────────────────────────────────────────────────────

/// A `header` / `footer` setting.
///
/// The dashboard treats these as on/off flags but also accepts other values,
/// most commonly an HTML snippet for the footer.  Anything that is not a
/// boolean is kept as-is and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    Flag(bool),
    Custom(serde_yaml::Value),
}

impl Default for Toggle {
    fn default() -> Self {
        Toggle::Flag(true)
    }
}

// ── Columns ───────────────────────────────────────────────────────────────────

/// Number of layout columns.  Only divisors of the 12-column grid are valid.
///
/// Always written as a quoted string (`columns: "3"`).  On read, a bare YAML
/// integer (`columns: 3`) is accepted as well since hand-edited files use both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Columns {
    One,
    Two,
    #[default]
    Three,
    Four,
    Six,
    Twelve,
}

impl Columns {
    /// Every accepted value, in ascending order.
    pub const ALL: [Columns; 6] = [
        Columns::One,
        Columns::Two,
        Columns::Three,
        Columns::Four,
        Columns::Six,
        Columns::Twelve,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Columns::One => "1",
            Columns::Two => "2",
            Columns::Three => "3",
            Columns::Four => "4",
            Columns::Six => "6",
            Columns::Twelve => "12",
        }
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Columns {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Columns::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::new(
                    "columns",
                    format!("`{s}` is not one of 1, 2, 3, 4, 6, 12"),
                )
            })
    }
}

impl Serialize for Columns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Columns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ── Serde helpers ─────────────────────────────────────────────────────────────

fn default_theme() -> String {
    "default".to_string()
}

/// Reads an explicit `null` as the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads any scalar as its text form.  `null` reads as `None`; sequences and
/// mappings are rejected.
fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => scalar_text(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected a string, number or boolean")),
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn theme_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_else(default_theme))
}

fn scalar_text(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => scalar_text(tagged.value),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_parse_accepts_every_allowed_value() {
        for expected in Columns::ALL {
            let parsed: Columns = expected.as_str().parse().expect("allowed value");
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_columns_parse_rejects_values_outside_the_grid() {
        for bad in ["0", "5", "7", "24", "three", ""] {
            let err = bad.parse::<Columns>().expect_err("must be rejected");
            assert_eq!(err.field, "columns");
        }
    }

    #[test]
    fn test_columns_deserializes_from_string_or_integer() {
        let quoted: Columns = serde_yaml::from_str("\"4\"").unwrap();
        let bare: Columns = serde_yaml::from_str("12").unwrap();
        assert_eq!(quoted, Columns::Four);
        assert_eq!(bare, Columns::Twelve);
    }

    #[test]
    fn test_columns_rejects_integer_outside_the_grid() {
        let result: Result<Columns, _> = serde_yaml::from_str("5");
        assert!(result.is_err());
    }

    #[test]
    fn test_columns_serializes_as_string() {
        let json = serde_json::to_string(&Columns::Six).unwrap();
        assert_eq!(json, "\"6\"");
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        // Arrange: only a title, everything else absent
        let yaml = "title: Home\n";

        // Act
        let doc: ConfigDocument = serde_yaml::from_str(yaml).expect("deserialize minimal");

        // Assert
        assert_eq!(doc.title, "Home");
        assert_eq!(doc.columns, Columns::Three);
        assert_eq!(doc.theme, "default");
        assert_eq!(doc.header, Toggle::Flag(true));
        assert_eq!(doc.footer, Toggle::Flag(true));
        assert!(doc.services.is_empty());
        assert!(doc.colors.light.is_empty());
        assert!(doc.extra.is_empty());
    }

    #[test]
    fn test_null_values_read_as_defaults() {
        let yaml = "title:\nsubtitle: ~\nservices:\ntheme:\n";
        let doc: ConfigDocument = serde_yaml::from_str(yaml).expect("nulls tolerated");
        assert_eq!(doc.title, "");
        assert_eq!(doc.subtitle, "");
        assert_eq!(doc.theme, "default");
        assert!(doc.services.is_empty());
    }

    #[test]
    fn test_item_without_optional_fields_loads() {
        let yaml = "services:\n  - name: Media\n    items:\n      - name: Jellyfin\n        url: http://jf\n";
        let doc: ConfigDocument = serde_yaml::from_str(yaml).unwrap();
        let item = &doc.services[0].items[0];
        assert_eq!(item.name, "Jellyfin");
        assert_eq!(item.url, "http://jf");
        assert_eq!(item.tag, None);
        assert_eq!(item.tagstyle, None);
        assert_eq!(item.logo, "");
        assert_eq!(doc.services[0].icon, "");
    }

    #[test]
    fn test_unknown_keys_are_kept_in_extra() {
        // Arrange
        let yaml = r#"
title: Home
message:
  style: is-warning
services:
  - name: Media
    logo: assets/media.png
    items:
      - name: Jellyfin
        keywords: movies
"#;

        // Act
        let doc: ConfigDocument = serde_yaml::from_str(yaml).unwrap();

        // Assert
        assert!(doc.extra.contains_key("message"));
        assert!(doc.services[0].extra.contains_key("logo"));
        assert_eq!(
            doc.services[0].items[0].extra.get("keywords"),
            Some(&serde_yaml::Value::String("movies".to_string()))
        );
    }

    #[test]
    fn test_absent_optional_item_fields_are_not_serialized() {
        let item = ServiceItem {
            name: "Bare".to_string(),
            url: "http://bare".to_string(),
            ..ServiceItem::default()
        };
        let yaml = serde_yaml::to_string(&item).unwrap();
        assert!(!yaml.contains("tag"), "None tag must be omitted: {yaml}");
        assert!(!yaml.contains("subtitle"), "None subtitle must be omitted: {yaml}");
    }

    #[test]
    fn test_scalar_text_fields_read_as_strings() {
        let yaml = "title: 1\nsubtitle: 2024\ntheme: 3\nservices:\n  - name: true\n    items:\n      - name: 2048\n        tag: 1.5\n        url: http://g\n";

        let doc: ConfigDocument = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(doc.title, "1");
        assert_eq!(doc.subtitle, "2024");
        assert_eq!(doc.theme, "3");
        assert_eq!(doc.services[0].name, "true");
        assert_eq!(doc.services[0].items[0].name, "2048");
        assert_eq!(doc.services[0].items[0].tag.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_text_field_rejects_a_mapping() {
        let result: Result<ConfigDocument, _> = serde_yaml::from_str("title:\n  nested: x\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_boolean_footer_is_kept_verbatim() {
        let yaml = "header: false\nfooter: '<p>Created with bulma</p>'\n";

        let doc: ConfigDocument = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(doc.header, Toggle::Flag(false));
        assert_eq!(
            doc.footer,
            Toggle::Custom(serde_yaml::Value::from("<p>Created with bulma</p>"))
        );
    }

    #[test]
    fn test_wrong_field_type_fails_to_deserialize() {
        let result: Result<ConfigDocument, _> = serde_yaml::from_str("services: hello\n");
        assert!(result.is_err());
    }
}
