//! Untyped input rows as they arrive from the external table.

use serde_json::{Map, Value};

/// Column names of the external table. Keys are case-sensitive.
pub mod columns {
    pub const BUSINESS_NAME: &str = "Business Name";
    pub const ADDRESS: &str = "Address";
    pub const CITY: &str = "City";
    pub const STATE: &str = "State";
    pub const NUMBER_OF_REVIEWS: &str = "Number of Reviews";
    pub const SITE: &str = "Site";
    pub const PHONE: &str = "Phone";
    pub const PHOTO: &str = "Photo";
    pub const SEO_DESCRIPTION: &str = "SEO Description";
    pub const PRICING: &str = "pricing";
    pub const WIDE_SELECTION: &str = "wide_selection";
    pub const SELL_ANTIQUES: &str = "sell_antiques";
    pub const SELL_BOOKS: &str = "sell_books";
    pub const CLEAN_ORGANIZED: &str = "clean_organized";
    pub const SELL_CLOTHES: &str = "sell_clothes";
    pub const SELL_FURNITURE: &str = "sell_furniture";
    pub const SELL_JEWELRY: &str = "sell_jewelry";
    pub const SELL_GIFT_ITEMS: &str = "sell_gift_items";
    pub const SELL_PREMIUM_BRAND: &str = "sell_premium_brand";
    pub const SELL_MERCHANDISE: &str = "sell_merchandise";
    pub const FRIENDLY_EMPLOYEES: &str = "friendly_employees";
}

/// One source row: a string-keyed map of untyped values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow(Map<String, Value>);

impl RawRow {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a row from key/value pairs, typically a CSV record zipped with
    /// its header.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Text form of a column.
    ///
    /// Absent, `null`, `false`, `0` and `""` all read as `""`. Numbers render
    /// without a trailing `.0`, `true` renders as `"true"`. Nested arrays and
    /// objects are not meaningful cell values and also read as `""`.
    #[must_use]
    pub fn text(&self, column: &str) -> String {
        match self.0.get(column) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(true)) => "true".to_string(),
            Some(Value::Number(n)) => number_text(n),
            _ => String::new(),
        }
    }
}

impl From<Map<String, Value>> for RawRow {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return if i == 0 { String::new() } else { i.to_string() };
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => String::new(),
        #[allow(clippy::cast_possible_truncation)]
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => RawRow::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn text_reads_strings_verbatim() {
        let r = row(json!({ "City": "  Austin " }));
        assert_eq!(r.text("City"), "  Austin ");
    }

    #[test]
    fn text_treats_falsy_values_as_empty() {
        let r = row(json!({ "a": null, "b": false, "c": 0, "d": "", "e": 0.0 }));
        for key in ["a", "b", "c", "d", "e", "missing"] {
            assert_eq!(r.text(key), "", "column {key}");
        }
    }

    #[test]
    fn text_renders_numbers_like_display_values() {
        let r = row(json!({ "int": 42, "float": 10.5, "whole": 12.0, "neg": -3 }));
        assert_eq!(r.text("int"), "42");
        assert_eq!(r.text("float"), "10.5");
        assert_eq!(r.text("whole"), "12");
        assert_eq!(r.text("neg"), "-3");
    }

    #[test]
    fn text_renders_true_and_ignores_nested_values() {
        let r = row(json!({ "t": true, "arr": [1, 2], "obj": { "x": 1 } }));
        assert_eq!(r.text("t"), "true");
        assert_eq!(r.text("arr"), "");
        assert_eq!(r.text("obj"), "");
    }

    #[test]
    fn from_pairs_builds_string_cells() {
        let r = RawRow::from_pairs([("City", "Austin"), ("State", "Texas")]);
        assert_eq!(r.text(columns::CITY), "Austin");
        assert_eq!(r.get(columns::STATE), Some(&Value::String("Texas".into())));
    }
}
