//! Flat `key:value;key:value` style strings.
//!
//! Only the `display` property is ever rewritten. Nested or quoted CSS is out of scope: a value
//! is everything after the first `:` of its entry.

use crate::foundation::error::{LayerExportError, LayerExportResult};

/// Style used when a node has no (or an empty) `style` attribute.
pub const IMPLICIT_STYLE: &str = "display:none";

/// Ordered style properties. A repeated key keeps its first position and its last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Parse a style attribute. `None` and `""` both mean [`IMPLICIT_STYLE`].
    ///
    /// Empty entries (a trailing or doubled `;`) are skipped; an entry without `:` is an error.
    pub fn parse(style: Option<&str>) -> LayerExportResult<Self> {
        let text = match style {
            Some(s) if !s.trim().is_empty() => s,
            _ => IMPLICIT_STYLE,
        };

        let mut map = Self::default();
        for entry in text.split(';') {
            if entry.trim().is_empty() {
                continue;
            }
            let Some((key, value)) = entry.split_once(':') else {
                return Err(LayerExportError::MalformedStyle {
                    layer: String::new(),
                    frame: None,
                    entry: entry.to_string(),
                    style: text.to_string(),
                });
            };
            map.set(key, value);
        }
        Ok(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite `key` in place, or append it.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_style_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Return `style` with `display` forced to `inline` (visible) or `none` (hidden).
///
/// All other properties keep their value and relative order.
pub fn toggle_display(style: Option<&str>, visible: bool) -> LayerExportResult<String> {
    let mut map = StyleMap::parse(style)?;
    map.set("display", if visible { "inline" } else { "none" });
    Ok(map.to_style_string())
}

#[cfg(test)]
#[path = "../../tests/unit/document/style.rs"]
mod tests;
