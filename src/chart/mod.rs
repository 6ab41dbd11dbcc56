//! Chart data building.
//!
//! This module turns a [`Table`](crate::table::Table) into the
//! [`ChartModel`] consumed by the slide composer:
//!
//! - Category labels, formatted as `"Oct 24"` when every category is a
//!   `YYYY-MM` year-month
//! - One [`Series`] per value column, in input order
//! - Per-series [`Evolution`] (delta and percent change from the first to the
//!   last non-missing value)

pub mod builder;
pub mod models;
pub mod types;

pub use builder::{build_bar_chart_data, build_line_chart_data, category_labels, default_columns};
pub use models::{ChartModel, Evolution, Series};
pub use types::{ChartKind, DataLabelPosition, MarkerStyle};
