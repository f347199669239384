//! Row-record model: the raw cells a table is built from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered mapping from column name to raw cell value.
///
/// This is the shape the table core consumes; how the rows were produced
/// (CSV, JSON, hand-built) is not its concern.
pub type RowRecord = IndexMap<String, RawCell>;

/// A raw cell value as produced by an upstream row source.
///
/// Untagged so a JSON array of records deserializes directly: JSON `null`
/// becomes [`RawCell::Null`], numbers become [`RawCell::Number`], strings
/// become [`RawCell::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Null,
    Number(f64),
    Text(String),
}

impl RawCell {
    /// True when the cell is the missing sentinel: null, the empty string,
    /// or the case-insensitive literal `"na"`.
    pub fn is_missing(&self) -> bool {
        match self {
            RawCell::Null => true,
            RawCell::Number(_) => false,
            RawCell::Text(s) => {
                let trimmed = s.trim();
                trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na")
            }
        }
    }

    /// Lossy-safe numeric coercion.
    ///
    /// Missing cells and tokens that do not parse as a float both become
    /// `None`; coercion never fails.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            RawCell::Null => None,
            RawCell::Number(n) => Some(*n),
            RawCell::Text(s) => {
                if self.is_missing() {
                    return None;
                }
                s.trim().parse::<f64>().ok()
            }
        }
    }

    /// The cell as a metadata string, `None` when missing.
    pub fn to_text(&self) -> Option<String> {
        match self {
            RawCell::Null => None,
            RawCell::Number(n) => Some(format_number(*n)),
            RawCell::Text(s) => {
                if self.is_missing() {
                    None
                } else {
                    Some(s.trim().to_string())
                }
            }
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        RawCell::Text(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        RawCell::Number(value as f64)
    }
}

/// Render a number the way it would have appeared in a metadata column.
/// Whole values drop the fractional part so a level read as `1.0` prints
/// as `1`.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
