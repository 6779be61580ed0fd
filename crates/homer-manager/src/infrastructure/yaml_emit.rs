//! Deterministic block-style YAML emitter.
//!
//! `serde_yaml::to_string` leaves strings unquoted wherever it can, which
//! makes values like `columns: "3"` come back as integers on the next read
//! unless every consumer is careful.  This emitter writes the layout the
//! dashboard's own config files use:
//!
//! ```yaml
//! title: "Home"
//! services:
//!   - name: "Media"
//!     items: []
//! ```
//!
//! - two-space indentation, sequences indented under their key
//! - every string value double-quoted
//! - keys left bare when they are plain identifiers
//! - empty collections written inline as `{}` / `[]`
//!
//! Output is a pure function of the value, so emitting a document that was
//! just parsed from this emitter's output reproduces the same bytes.

use std::fmt::Write as _;

use serde::ser::Error as _;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

const INDENT: usize = 2;

/// Serializes `value` into block-style YAML terminated by a newline.
///
/// # Errors
///
/// Fails if `value` cannot be represented as a YAML value, or if a mapping
/// key is itself a collection.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, serde_yaml::Error> {
    let value = serde_yaml::to_value(value)?;
    let mut out = String::new();
    match &value {
        Value::Mapping(map) if !map.is_empty() => emit_mapping(&mut out, map, 0)?,
        Value::Sequence(seq) if !seq.is_empty() => emit_sequence(&mut out, seq, 0)?,
        other => {
            out.push_str(&inline(other).unwrap_or_default());
            out.push('\n');
        }
    }
    Ok(out)
}

fn emit_mapping(out: &mut String, map: &Mapping, indent: usize) -> Result<(), serde_yaml::Error> {
    for (key, value) in map {
        pad(out, indent);
        emit_entry(out, key, value, indent)?;
    }
    Ok(())
}

fn emit_sequence(out: &mut String, seq: &[Value], indent: usize) -> Result<(), serde_yaml::Error> {
    for item in seq {
        pad(out, indent);
        out.push('-');
        match untag(item) {
            (tag, Value::Mapping(map)) if !map.is_empty() => {
                if let Some(tag) = tag {
                    let _ = writeln!(out, " {tag}");
                    emit_mapping(out, map, indent + INDENT)?;
                    continue;
                }
                // First key shares the line with the dash.
                let mut entries = map.iter();
                if let Some((key, value)) = entries.next() {
                    out.push(' ');
                    emit_entry(out, key, value, indent + INDENT)?;
                }
                for (key, value) in entries {
                    pad(out, indent + INDENT);
                    emit_entry(out, key, value, indent + INDENT)?;
                }
            }
            (tag, Value::Sequence(inner)) if !inner.is_empty() => {
                if let Some(tag) = tag {
                    let _ = write!(out, " {tag}");
                }
                out.push('\n');
                emit_sequence(out, inner, indent + INDENT)?;
            }
            _ => {
                out.push(' ');
                out.push_str(&inline(item).unwrap_or_default());
                out.push('\n');
            }
        }
    }
    Ok(())
}

/// Writes `key: value` where the key sits at column `key_col`.  The caller
/// has already written whatever precedes the key on its line.
fn emit_entry(
    out: &mut String,
    key: &Value,
    value: &Value,
    key_col: usize,
) -> Result<(), serde_yaml::Error> {
    out.push_str(&render_key(key)?);
    out.push(':');

    if let Some(scalar) = inline(value) {
        out.push(' ');
        out.push_str(&scalar);
        out.push('\n');
        return Ok(());
    }

    let (tag, inner) = untag(value);
    if let Some(tag) = tag {
        let _ = write!(out, " {tag}");
    }
    out.push('\n');
    match inner {
        Value::Mapping(map) => emit_mapping(out, map, key_col + INDENT),
        Value::Sequence(seq) => emit_sequence(out, seq, key_col + INDENT),
        _ => Ok(()),
    }
}

/// Renders values that fit on one line: scalars and empty collections.
/// Returns `None` for non-empty collections.
fn inline(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(quote(s)),
        Value::Mapping(map) if map.is_empty() => Some("{}".to_string()),
        Value::Sequence(seq) if seq.is_empty() => Some("[]".to_string()),
        Value::Mapping(_) | Value::Sequence(_) => None,
        Value::Tagged(tagged) => inline(&tagged.value).map(|v| format!("{} {v}", tagged.tag)),
    }
}

fn untag(value: &Value) -> (Option<String>, &Value) {
    match value {
        Value::Tagged(tagged) => (Some(tagged.tag.to_string()), &tagged.value),
        other => (None, other),
    }
}

fn render_key(key: &Value) -> Result<String, serde_yaml::Error> {
    match key {
        Value::String(s) if is_plain_key(s) => Ok(s.clone()),
        Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => Err(
            serde_yaml::Error::custom("mapping keys must be scalars"),
        ),
        scalar => Ok(inline(scalar).unwrap_or_default()),
    }
}

fn is_plain_key(s: &str) -> bool {
    const RESERVED: [&str; 10] = [
        "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~",
    ];

    let mut chars = s.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !RESERVED.iter().any(|r| r.eq_ignore_ascii_case(s))
}

/// Double-quoted YAML scalar with every special character escaped.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}') => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}

// ── Tests ─────────────────────────────────────────────────────────────────────
