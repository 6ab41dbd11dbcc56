//! Summary cards shown next to a chart.
//!
//! Card `i` summarizes series `i`: its percent change and its name, in the
//! series' palette color. Evolution and label are each resolved through a
//! fixed precedence chain so a model lacking precomputed data still yields
//! sensible cards.

use serde::Serialize;

use super::chart_frame::ChartFrame;
use super::theme::palette_color;
use crate::chart::{ChartModel, Evolution};
use crate::common::RGBColor;

/// At most this many series get a card.
pub const MAX_CARDS: usize = 2;

/// Display value of a card whose percent change is undefined.
pub const PLACEHOLDER_VALUE: &str = "-";

/// A derived summary card; never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// Index of the summarized series
    pub index: usize,
    pub color: RGBColor,
    /// Formatted percent change, e.g. `"+12%"`
    pub value: String,
    /// Series name or `"Series {n}"`
    pub label: String,
    #[serde(skip)]
    pub evolution: Evolution,
}

/// Format a percent change as a signed whole percentage.
///
/// # Examples
///
/// ```rust
/// use chartdeck::slide::format_percent;
///
/// assert_eq!(format_percent(Some(12.4)), "+12%");
/// assert_eq!(format_percent(Some(-6.7)), "-7%");
/// assert_eq!(format_percent(None), "-");
/// ```
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) if p.is_finite() => {
            let sign = if p >= 0.0 { '+' } else { '-' };
            format!("{}{:.0}%", sign, p.abs())
        },
        _ => PLACEHOLDER_VALUE.to_string(),
    }
}

/// Evolution of series `index`: the precomputed value when the builder
/// recorded one, else recomputed from the series values.
pub fn resolve_evolution(model: &ChartModel, index: usize) -> Evolution {
    let Some(series) = model.series().get(index) else {
        return Evolution::UNDEFINED;
    };

    match series.evolution {
        Some(evolution) => evolution,
        None => Evolution::from_values(&series.values),
    }
}

/// Label of series `index`: the model's name list, then the series name,
/// then the rendered chart's series name, then `"Series {index + 1}"`.
pub fn resolve_label(model: &ChartModel, chart: Option<&ChartFrame>, index: usize) -> String {
    let from_names = model
        .series_names()
        .and_then(|names| names.get(index))
        .map(String::as_str)
        .filter(|n| !n.is_empty());

    from_names
        .or_else(|| model.series().get(index).and_then(|s| s.display_name()))
        .or_else(|| chart.and_then(|c| c.series_name(index)))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Series {}", index + 1))
}

/// Cards for the first [`MAX_CARDS`] series of `model`.
pub fn build_cards(model: &ChartModel, chart: Option<&ChartFrame>) -> Vec<Card> {
    (0..model.series_count().min(MAX_CARDS))
        .map(|index| {
            let evolution = resolve_evolution(model, index);
            Card {
                index,
                color: palette_color(index),
                value: format_percent(evolution.percent),
                label: resolve_label(model, chart, index),
                evolution,
            }
        })
        .collect()
}
