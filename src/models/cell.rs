//! Cell values and rows

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value; always sorts last
    #[default]
    Null,
    Int(i64),
    Real(f64),
    Text(String),
    /// Anything else (booleans, arrays, objects); displayed as JSON
    Other(serde_json::Value),
}

/// Broad kind of a cell, used for alignment and cross-kind ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellKind {
    Numeric,
    Text,
    Other,
    Null,
}

/// Horizontal text alignment inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Leading,
    Center,
    Trailing,
}

impl CellValue {
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Int(_) | Self::Real(_) => CellKind::Numeric,
            Self::Text(_) => CellKind::Text,
            Self::Other(_) => CellKind::Other,
            Self::Null => CellKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numbers hug the trailing edge, text the leading edge, the rest is centered
    pub fn alignment(&self) -> Alignment {
        match self.kind() {
            CellKind::Numeric => Alignment::Trailing,
            CellKind::Text => Alignment::Leading,
            CellKind::Other | CellKind::Null => Alignment::Center,
        }
    }

    /// Text form used for display and filtering
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Int(v) => v.to_string(),
            // Integral reals keep a fractional part so "2.0" stays findable
            Self::Real(v) if v.is_finite() && v.fract() == 0.0 => format!("{:.1}", v),
            Self::Real(v) => v.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(v) => v.to_string(),
        }
    }

    /// Total order over non-null values.
    ///
    /// Numbers compare numerically, text by code point (case-sensitive),
    /// opaque values by their JSON text. Values of different kinds order
    /// by kind: numbers, then text, then opaque values.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Real(a), Self::Real(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Real(b)) => cmp_int_real(*a, *b),
            (Self::Real(a), Self::Int(b)) => cmp_int_real(*b, *a).reverse(),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Other(a), Self::Other(b)) => a.to_string().cmp(&b.to_string()),
            (a, b) => a.kind().cmp(&b.kind()),
        }
    }
}

/// Exact comparison of an integer with a real.
///
/// Converting the integer to `f64` rounds above 2^53, which would make the
/// order intransitive across mixed columns.
fn cmp_int_real(int: i64, real: f64) -> Ordering {
    // 2^63, the first real above every i64
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if real.is_nan() {
        return (int as f64).total_cmp(&real);
    }
    if real >= I64_END {
        return Ordering::Less;
    }
    if real < -I64_END {
        return Ordering::Greater;
    }

    let whole = real.trunc();
    // In range and integral, so the cast is exact
    match int.cmp(&(whole as i64)) {
        Ordering::Equal if real > whole => Ordering::Less,
        Ordering::Equal if real < whole => Ordering::Greater,
        ordering => ordering,
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Other(serde_json::Value::Bool(v))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// One table row: an ordered sequence of cells
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<CellValue>);

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.0
    }

    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring match against any cell.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.0
            .iter()
            .any(|cell| cell.display_text().to_lowercase().contains(needle))
    }
}

impl From<Vec<CellValue>> for Row {
    fn from(cells: Vec<CellValue>) -> Self {
        Self(cells)
    }
}

impl FromIterator<CellValue> for Row {
    fn from_iter<I: IntoIterator<Item = CellValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build a [`Row`] from values convertible into [`CellValue`]
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        $crate::models::Row::new(vec![$($crate::models::CellValue::from($cell)),*])
    };
}
