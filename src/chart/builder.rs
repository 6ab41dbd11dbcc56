//! Turns a [`Table`] into a [`ChartModel`].
//!
//! Category labels use an all-or-nothing policy: when every category cell is
//! a `YYYY-MM` year-month, all labels are rendered as `"Oct 24"`; otherwise
//! every label keeps its raw text.
//!
//! Evolution failures are contained. A column holding non-numeric text only
//! loses its own evolution; a structural problem discovered during the pass
//! (a column shorter or longer than the category column) clears the
//! evolution of every series.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use rayon::prelude::*;

use super::models::{ChartModel, Evolution, Series};
use super::types::ChartKind;
use crate::common::{Error, Result};
use crate::table::{CellValue, CoercionError, Column, Table};

/// Format used for year-month category labels.
const MONTH_LABEL_FORMAT: &str = "%b %y";

#[derive(Debug)]
enum EvolutionError {
    /// A cell in one column is not numeric
    Coercion { column: String, source: CoercionError },
    /// The table shape changed under the pass
    Structure(String),
}

impl fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coercion { column, source } => write!(f, "column '{}': {}", column, source),
            Self::Structure(msg) => f.write_str(msg),
        }
    }
}

/// Build line-chart data with formatted categories and per-series evolution.
///
/// # Examples
///
/// ```rust
/// use chartdeck::chart::build_line_chart_data;
/// use chartdeck::table::{Column, Table};
///
/// let table = Table::from_columns(vec![
///     Column::new("month", vec!["2024-01".into(), "2024-02".into()]),
///     Column::new("value", vec![10i64.into(), 20i64.into()]),
/// ]);
/// let model = build_line_chart_data(&table, "month", &["value"])?;
///
/// assert_eq!(model.categories(), ["Jan 24", "Feb 24"]);
/// assert_eq!(model.series()[0].evolution.unwrap().percent, Some(100.0));
/// # Ok::<(), chartdeck::Error>(())
/// ```
pub fn build_line_chart_data<S: AsRef<str>>(
    table: &Table,
    category_column: &str,
    value_columns: &[S],
) -> Result<ChartModel> {
    let (category, values) = resolve_columns(table, category_column, value_columns)?;
    let row_count = category.len();

    let categories = category_labels(&category.cells);
    let evolutions = evolution_pass(&values, row_count);

    let series = values
        .iter()
        .zip(evolutions)
        .map(|(column, evolution)| {
            Series::new(Some(column.name.clone()), series_values(column, row_count))
                .with_evolution(evolution)
        })
        .collect();

    let names = values.iter().map(|c| c.name.clone()).collect();
    Ok(ChartModel::new(ChartKind::Line, categories, series)?.with_series_names(names))
}

/// Build bar-chart data: raw category text and raw series values.
///
/// No evolution is computed and no model-level name list is recorded; a
/// composer working from this model derives both on its own.
pub fn build_bar_chart_data<S: AsRef<str>>(
    table: &Table,
    category_column: &str,
    value_columns: &[S],
) -> Result<ChartModel> {
    let (category, values) = resolve_columns(table, category_column, value_columns)?;
    let row_count = category.len();

    let categories = category.cells.iter().map(CellValue::to_raw_string).collect();
    let series = values
        .iter()
        .map(|column| Series::new(Some(column.name.clone()), series_values(column, row_count)))
        .collect();

    ChartModel::new(ChartKind::Bar, categories, series)
}

/// The default column split: first column for categories, the rest for values.
pub fn default_columns(table: &Table) -> Result<(String, Vec<String>)> {
    let names = table.column_names();
    match names.split_first() {
        Some((first, rest)) if !rest.is_empty() => Ok((
            first.to_string(),
            rest.iter().map(|n| n.to_string()).collect(),
        )),
        _ => Err(Error::InvalidInput(format!(
            "a chart needs a category column and at least one value column, table has {}",
            names.len()
        ))),
    }
}

/// Format category labels, falling back to raw text for the whole set.
pub fn category_labels(cells: &[CellValue]) -> Vec<String> {
    let parsed: Option<Vec<NaiveDate>> = cells.iter().map(parse_year_month).collect();

    match parsed {
        Some(dates) => dates
            .iter()
            .map(|d| d.format(MONTH_LABEL_FORMAT).to_string())
            .collect(),
        None => {
            tracing::debug!("category column is not uniformly YYYY-MM, keeping raw labels");
            cells.iter().map(CellValue::to_raw_string).collect()
        },
    }
}

fn parse_year_month(cell: &CellValue) -> Option<NaiveDate> {
    let CellValue::String(text) = cell else {
        return None;
    };
    let text = text.trim();

    // Exactly YYYY-MM
    let (year, month) = text.split_once('-')?;
    if year.len() != 4
        || month.len() != 2
        || !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn resolve_columns<'t, S: AsRef<str>>(
    table: &'t Table,
    category_column: &str,
    value_columns: &[S],
) -> Result<(&'t Column, Vec<&'t Column>)> {
    if value_columns.is_empty() {
        return Err(Error::InvalidInput("no value columns given".to_string()));
    }

    let category = table.column(category_column).ok_or_else(|| {
        Error::InvalidInput(format!("category column '{}' not found", category_column))
    })?;

    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(value_columns.len());
    for name in value_columns {
        let name = name.as_ref();
        if name == category_column {
            return Err(Error::InvalidInput(format!(
                "column '{}' is both the category column and a value column",
                name
            )));
        }
        if !seen.insert(name) {
            return Err(Error::InvalidInput(format!("value column '{}' given twice", name)));
        }
        let column = table
            .column(name)
            .ok_or_else(|| Error::InvalidInput(format!("value column '{}' not found", name)))?;
        values.push(column);
    }

    Ok((category, values))
}

/// Copy a column's numbers, one entry per category row.
fn series_values(column: &Column, row_count: usize) -> Vec<Option<f64>> {
    (0..row_count)
        .map(|row| column.cells.get(row).and_then(CellValue::to_number))
        .collect()
}

fn column_evolution(column: &Column, row_count: usize) -> std::result::Result<Evolution, EvolutionError> {
    if column.len() != row_count {
        return Err(EvolutionError::Structure(format!(
            "column '{}' has {} rows, category column has {}",
            column.name,
            column.len(),
            row_count
        )));
    }

    let mut numbers = Vec::with_capacity(column.len());
    for cell in &column.cells {
        match cell.as_f64() {
            Ok(Some(v)) => numbers.push(v),
            Ok(None) => {},
            Err(source) => {
                return Err(EvolutionError::Coercion {
                    column: column.name.clone(),
                    source,
                });
            },
        }
    }

    Ok(Evolution::from_numbers(numbers))
}

/// Compute every series' evolution, one result per column in input order.
fn evolution_pass(columns: &[&Column], row_count: usize) -> Vec<Evolution> {
    let outcome: std::result::Result<Vec<Evolution>, EvolutionError> = columns
        .par_iter()
        .map(|column| match column_evolution(column, row_count) {
            Err(err @ EvolutionError::Coercion { .. }) => {
                tracing::debug!(error = %err, "evolution undefined for series");
                Ok(Evolution::UNDEFINED)
            },
            other => other,
        })
        .collect();

    outcome.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "evolution pass aborted, clearing all evolutions");
        vec![Evolution::UNDEFINED; columns.len()]
    })
}
