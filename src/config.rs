//! Report run configuration.
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! yields the canonical report:
//!
//! ```yaml
//! input: data/sample_data.csv
//! output: output/report.pptx
//! title: Automated Report
//! subtitle: Generated with Rust
//! chart_title: Monthly Stock Prices
//! category_column: month        # default: first column
//! value_columns: [AAPL, MSFT]   # default: all remaining columns
//! table:
//!   delimiter: ","
//! layout:
//!   canvas: { width_in: 13.33, height_in: 7.5 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::default_columns;
use crate::common::{Error, Result};
use crate::slide::LayoutConfig;
use crate::table::{Table, TextConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Delimited input table
    pub input: PathBuf,
    /// Presentation to write
    pub output: PathBuf,
    /// Title slide heading
    pub title: String,
    /// Title slide subheading
    pub subtitle: String,
    /// Chart slide heading
    pub chart_title: String,
    pub category_column: Option<String>,
    pub value_columns: Option<Vec<String>>,
    /// Delimited text options for `input`
    pub table: TextConfig,
    pub layout: LayoutConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/sample_data.csv"),
            output: PathBuf::from("output/report.pptx"),
            title: "Automated Report".to_string(),
            subtitle: "Generated with Rust".to_string(),
            chart_title: "Monthly Stock Prices".to_string(),
            category_column: None,
            value_columns: None,
            table: TextConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("invalid report configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.value_columns.as_ref().is_some_and(Vec::is_empty) {
            return Err(Error::Config("value_columns must not be empty".to_string()));
        }
        self.layout.validate()
    }

    /// Category and value column names for `table`, falling back to the
    /// first column and the remaining columns where not configured.
    pub fn columns_for(&self, table: &Table) -> Result<(String, Vec<String>)> {
        match (&self.category_column, &self.value_columns) {
            (Some(category), Some(values)) => Ok((category.clone(), values.clone())),
            (Some(category), None) => {
                let values: Vec<String> = table
                    .column_names()
                    .into_iter()
                    .filter(|name| *name != category.as_str())
                    .map(str::to_string)
                    .collect();
                Ok((category.clone(), values))
            },
            (None, values) => {
                let (first, rest) = default_columns(table)?;
                Ok((first, values.clone().unwrap_or(rest)))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellValue, Column};

    fn table() -> Table {
        Table::from_columns(vec![
            Column::new("month", vec![CellValue::from("2024-01")]),
            Column::new("AAPL", vec![CellValue::Float(1.0)]),
            Column::new("MSFT", vec![CellValue::Float(2.0)]),
        ])
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ReportConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.title, "Automated Report");
        assert_eq!(config.layout.canvas.width_in, 13.33);
    }

    #[test]
    fn test_partial_document() {
        let yaml = "title: Q3\nvalue_columns: [MSFT]\nlayout:\n  chart_slide:\n    card_gap_in: 0.5\n";
        let config = ReportConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.title, "Q3");
        assert_eq!(config.subtitle, "Generated with Rust");
        assert_eq!(config.value_columns.as_deref(), Some(&["MSFT".to_string()][..]));
        assert_eq!(config.layout.chart_slide.card_gap_in, 0.5);
        assert_eq!(config.layout.chart_slide.card_height_in, 2.0);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            ReportConfig::from_yaml_str("title: [unclosed"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_yaml_str("value_columns: []"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_yaml_str("layout:\n  canvas:\n    width_in: -1\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_yaml_str("layout:\n  chart_slide:\n    chart_left_in: 1.0e14\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yaml");
        std::fs::write(&path, "chart_title: Prices\ncategory_column: month\n").unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.chart_title, "Prices");
        assert_eq!(config.category_column.as_deref(), Some("month"));

        assert!(matches!(
            ReportConfig::load(dir.path().join("missing.yaml")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_columns_for() {
        let table = table();

        let (category, values) = ReportConfig::default().columns_for(&table).unwrap();
        assert_eq!(category, "month");
        assert_eq!(values, ["AAPL", "MSFT"]);

        let config = ReportConfig {
            category_column: Some("AAPL".into()),
            ..ReportConfig::default()
        };
        let (category, values) = config.columns_for(&table).unwrap();
        assert_eq!(category, "AAPL");
        assert_eq!(values, ["month", "MSFT"]);

        let config = ReportConfig {
            value_columns: Some(vec!["MSFT".into()]),
            ..ReportConfig::default()
        };
        assert_eq!(config.columns_for(&table).unwrap().1, ["MSFT"]);
    }
}
