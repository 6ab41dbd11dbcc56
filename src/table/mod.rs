//! Tabular input: named columns of loosely typed cells.
//!
//! The first row of a delimited file is the header; each following row
//! contributes one cell to every column. Rows shorter than the header are
//! padded with [`CellValue::Empty`], extra trailing fields are ignored.

mod cell;
mod parser;


pub use cell::{CellValue, CoercionError};
pub use parser::{TextConfig, TextParser, infer_cell};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::common::{Error, Result};

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text
    pub name: String,
    /// Cells in row order
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Create a column from a name and its cells.
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Number of cells in this column.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered sequence of named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns as-is.
    ///
    /// No shape validation happens here: columns may differ in length when a
    /// table is assembled by hand. Consumers decide how to treat that.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build a rectangular table from a header and rows of cells.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        Self { columns }
    }

    /// Parse delimited text from a reader. The first record is the header.
    pub fn from_reader<R: Read>(reader: R, config: &TextConfig) -> Result<Self> {
        let mut parser = TextParser::new(reader, config)?;
        let header = parser
            .parse_fields()?
            .ok_or_else(|| Error::Parse("input has no header row".to_string()))?;

        if let Some(pos) = header.iter().position(|name| name.is_empty()) {
            return Err(Error::Parse(format!("header column {} has no name", pos + 1)));
        }

        let mut rows = Vec::new();
        while let Some(fields) = parser.parse_fields()? {
            rows.push(fields.iter().map(|f| infer_cell(f)).collect());
        }

        Ok(Self::from_rows(header, rows))
    }

    /// Parse delimited text held in memory.
    pub fn from_bytes(bytes: &[u8], config: &TextConfig) -> Result<Self> {
        Self::from_reader(bytes, config)
    }

    /// Load a delimited text file.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &TextConfig) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_reader(BufReader::new(file), config)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "loaded table"
        );
        Ok(table)
    }

    /// All columns in order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, taken from the first column.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}
