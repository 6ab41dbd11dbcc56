//! Cell values of a loaded table.

use std::fmt;

/// A single cell of a [`Table`](super::Table) column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing entry (empty field or an NA token)
    Empty,
    /// Integer
    Int(i64),
    /// Floating-point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Anything else, kept verbatim
    String(String),
}

/// Why a cell could not be read as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionError {
    /// The offending raw text
    pub raw: String,
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert '{}' to a number", self.raw)
    }
}

impl std::error::Error for CoercionError {}

impl CellValue {
    /// Whether the cell is missing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric coercion.
    ///
    /// Returns `Ok(None)` for missing cells, `Ok(Some(_))` for anything that
    /// reads as a finite number (booleans count as 1/0) and an error for text
    /// that is not numeric.
    pub fn as_f64(&self) -> Result<Option<f64>, CoercionError> {
        match self {
            CellValue::Empty => Ok(None),
            CellValue::Int(v) => Ok(Some(*v as f64)),
            CellValue::Float(v) if v.is_nan() => Ok(None),
            CellValue::Float(v) => Ok(Some(*v)),
            CellValue::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            CellValue::String(s) => match fast_float2::parse::<f64, _>(s.trim()) {
                Ok(v) if v.is_nan() => Ok(None),
                Ok(v) => Ok(Some(v)),
                Err(_) => Err(CoercionError { raw: s.clone() }),
            },
        }
    }

    /// Lenient numeric view: non-numeric text reads as missing.
    #[inline]
    pub fn to_number(&self) -> Option<f64> {
        self.as_f64().ok().flatten()
    }

    /// The raw display form of the cell.
    pub fn to_raw_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Int(v) => itoa::Buffer::new().format(*v).to_string(),
            CellValue::Float(v) => ryu::Buffer::new().format(*v).to_string(),
            CellValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}
