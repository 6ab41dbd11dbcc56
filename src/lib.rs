//! Chartdeck - turns tabular time-series data into a styled PowerPoint report
//!
//! The pipeline has four stages, each usable on its own:
//!
//! - **Table**: load a delimited text file into named, loosely typed columns
//! - **Chart data**: derive category labels, series values and the
//!   first-to-last evolution of every series
//! - **Slide composition**: lay out a title slide and a chart slide with a
//!   styled line chart and one summary card per series (at most two)
//! - **Deck persistence**: write the slides as an Office Open XML `.pptx`
//!
//! Cosmetic problems never fail a run: unparseable dates fall back to raw
//! labels, broken series lose their evolution, and styling the chart cannot
//! honor is skipped and logged. Structural problems (a missing column, an
//! unreadable file) are reported as [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use chartdeck::chart::build_line_chart_data;
//! use chartdeck::deck::{Deck, DeckSink, PptxWriter};
//! use chartdeck::slide::SlideComposer;
//! use chartdeck::table::{Table, TextConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Table::from_path("data/sample_data.csv", &TextConfig::default())?;
//! let model = build_line_chart_data(&table, "month", &["AAPL", "MSFT"])?;
//!
//! let composer = SlideComposer::default();
//! let mut deck = Deck::default();
//! deck.push_slide(composer.compose_title_slide("Automated Report", "Generated with Rust"));
//! deck.push_slide(composer.compose_chart_slide(&model, "Monthly Stock Prices"));
//!
//! PptxWriter::new().save(&deck, Path::new("report.pptx"))?;
//! # Ok(())
//! # }
//! ```

/// Errors, units, colors and XML helpers
pub mod common;

/// Delimited text tables
pub mod table;

/// Chart data model and builders
pub mod chart;

/// Slide composition: layout, styling, summary cards
pub mod slide;

/// Presentation container and `.pptx` writer
pub mod deck;

/// Run configuration
pub mod config;

pub use common::{Error, Result};
pub use config::ReportConfig;
