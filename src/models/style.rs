//! Visual style configuration
//!
//! Values are opaque to the table logic. Only the sort glyphs are read by
//! the core; everything else is forwarded to the render backend, which
//! ignores what it does not understand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Style keys recognized by the bundled backends
pub mod keys {
    pub const FONT: &str = "font";
    pub const HEADER_BACKGROUND: &str = "header_background";
    pub const HEADER_FOREGROUND: &str = "header_foreground";
    pub const ROW_BACKGROUND_EVEN: &str = "row_background_even";
    pub const ROW_BACKGROUND_ODD: &str = "row_background_odd";
    pub const ROW_HOVER_BACKGROUND: &str = "row_hover_background";
    pub const BORDER_COLOR: &str = "border_color";
    pub const CELL_PADDING: &str = "cell_padding";
    pub const BORDER_WIDTH: &str = "border_width";
    pub const ROW_HEIGHT: &str = "row_height";
    pub const HEADER_HEIGHT: &str = "header_height";
    pub const CORNER_RADIUS: &str = "corner_radius";
    pub const SORT_ARROW_UP: &str = "sort_arrow_up";
    pub const SORT_ARROW_DOWN: &str = "sort_arrow_down";
}

/// Mapping from style key to an opaque value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleConfig {
    values: BTreeMap<String, Value>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let values = [
            (keys::FONT, json!(["Segoe UI", 10])),
            (keys::HEADER_BACKGROUND, json!("#2c3e50")),
            (keys::HEADER_FOREGROUND, json!("white")),
            (keys::ROW_BACKGROUND_EVEN, json!("#f8f9fa")),
            (keys::ROW_BACKGROUND_ODD, json!("white")),
            (keys::ROW_HOVER_BACKGROUND, json!("#e9ecef")),
            (keys::BORDER_COLOR, json!("#dee2e6")),
            (keys::CELL_PADDING, json!(5)),
            (keys::BORDER_WIDTH, json!(1)),
            (keys::ROW_HEIGHT, json!(40)),
            (keys::HEADER_HEIGHT, json!(45)),
            (keys::CORNER_RADIUS, json!(8)),
            (keys::SORT_ARROW_UP, json!("▲")),
            (keys::SORT_ARROW_DOWN, json!("▼")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self { values }
    }
}

impl StyleConfig {
    /// A style with no values at all, useful as a partial override
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// Overlay every key of `partial` onto this style
    pub fn merge(&mut self, partial: &StyleConfig) {
        for (key, value) in &partial.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn sort_glyph(&self, ascending: bool) -> &str {
        let (key, fallback) = if ascending {
            (keys::SORT_ARROW_UP, "▲")
        } else {
            (keys::SORT_ARROW_DOWN, "▼")
        };
        self.get_str(key).unwrap_or(fallback)
    }

    /// Background for a data row at rest
    pub fn row_background(&self, row: usize) -> Option<&Value> {
        if row % 2 == 0 {
            self.get(keys::ROW_BACKGROUND_EVEN)
        } else {
            self.get(keys::ROW_BACKGROUND_ODD)
        }
    }

    pub fn hover_background(&self) -> Option<&Value> {
        self.get(keys::ROW_HOVER_BACKGROUND)
    }
}

impl FromIterator<(String, Value)> for StyleConfig {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_and_keeps_unknown_keys() {
        let mut style = StyleConfig::default();
        let partial = StyleConfig::empty()
            .with(keys::ROW_HOVER_BACKGROUND, "#f39c12")
            .with("shadow", "heavy");
        style.merge(&partial);

        assert_eq!(style.get_str(keys::ROW_HOVER_BACKGROUND), Some("#f39c12"));
        assert_eq!(style.get_str("shadow"), Some("heavy"));
        assert_eq!(style.get_str(keys::HEADER_BACKGROUND), Some("#2c3e50"));
    }

    #[test]
    fn test_row_background_by_parity() {
        let style = StyleConfig::default();
        assert_eq!(style.row_background(0), Some(&json!("#f8f9fa")));
        assert_eq!(style.row_background(1), Some(&json!("white")));
        assert_eq!(style.row_background(2), Some(&json!("#f8f9fa")));
    }

    #[test]
    fn test_sort_glyph_falls_back_when_missing() {
        let style = StyleConfig::empty();
        assert_eq!(style.sort_glyph(true), "▲");
        assert_eq!(style.sort_glyph(false), "▼");
        let style = style.with(keys::SORT_ARROW_UP, "^");
        assert_eq!(style.sort_glyph(true), "^");
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let style: StyleConfig =
            serde_json::from_str(r##"{"header_background": "#34495e", "cell_padding": 7}"##).unwrap();
        assert_eq!(style.get_str(keys::HEADER_BACKGROUND), Some("#34495e"));
        assert_eq!(style.get_u64(keys::CELL_PADDING), Some(7));
    }
}
