//! The styled chart visual embedded on a chart slide.
//!
//! A [`ChartFrame`] holds the chart data together with every style decision
//! the composer made, so the deck writer only has to serialize it.

use super::applier::{Capabilities, OptionalProperty, StyleApplier, StyleError};
use super::layout::Rect;
use super::shape::TextFormat;
use crate::chart::{ChartKind, DataLabelPosition, MarkerStyle};
use crate::common::{Length, RGBColor};

/// Marker formatting of a line series.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub style: MarkerStyle,
    pub size: u8,
    pub fill: Option<RGBColor>,
    /// Outline width; `None` keeps the default
    pub outline_width: Option<Length>,
    /// Outline fill cleared
    pub outline_hidden: bool,
}

/// Per-point value labels of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct DataLabels {
    pub show_value: bool,
    /// `None` keeps the chart's default position
    pub position: Option<DataLabelPosition>,
    pub format: TextFormat,
}

/// One plotted series with its formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend and tooltip name
    pub name: Option<String>,
    pub values: Vec<Option<f64>>,
    pub color: RGBColor,
    pub line_width: Option<Length>,
    pub smooth: bool,
    /// Line series only
    pub marker: Option<Marker>,
    pub data_labels: Option<DataLabels>,
}

/// Category axis line state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLine {
    pub width: Option<Length>,
    pub no_fill: bool,
    pub hidden: bool,
}

impl AxisLine {
    /// Whether the line will not be drawn. A zero-width line counts as
    /// invisible; the writer pairs it with an empty fill.
    pub fn is_invisible(&self) -> bool {
        self.hidden || self.no_fill || self.width == Some(Length::ZERO)
    }
}

/// Category (horizontal) axis formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    pub visible: bool,
    pub tick_labels: TextFormat,
    pub line: AxisLine,
}

/// Value (vertical) axis formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueAxis {
    pub visible: bool,
    pub major_gridlines: bool,
}

/// A chart placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub rect: Rect,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub has_title: bool,
    pub has_legend: bool,
    /// Plot-level data labels, overridden per series
    pub plot_data_labels: bool,
    pub category_axis: CategoryAxis,
    pub value_axis: ValueAxis,
    capabilities: Capabilities,
}

impl ChartFrame {
    /// An unstyled chart: no title, no legend, both axes visible.
    pub fn new(
        rect: Rect,
        kind: ChartKind,
        categories: Vec<String>,
        series: Vec<ChartSeries>,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            rect,
            kind,
            categories,
            series,
            has_title: false,
            has_legend: false,
            plot_data_labels: false,
            category_axis: CategoryAxis {
                visible: true,
                tick_labels: TextFormat::default(),
                line: AxisLine::default(),
            },
            value_axis: ValueAxis {
                visible: true,
                major_gridlines: true,
            },
            capabilities,
        }
    }

    /// Name of the series at `index`, if present and non-empty.
    pub fn series_name(&self, index: usize) -> Option<&str> {
        self.series
            .get(index)
            .and_then(|s| s.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    fn series_mut(
        &mut self,
        property: OptionalProperty,
        index: usize,
    ) -> Result<&mut ChartSeries, StyleError> {
        let count = self.series.len();
        self.series.get_mut(index).ok_or(StyleError::NoSuchSeries {
            property,
            series: index,
            count,
        })
    }
}

impl StyleApplier for ChartFrame {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn try_apply(&mut self, property: OptionalProperty) -> Result<(), StyleError> {
        if !self.capabilities.contains(property.required()) {
            return Err(StyleError::Unsupported(property));
        }

        match property {
            OptionalProperty::Smoothing { series } => {
                self.series_mut(property, series)?.smooth = true;
            },
            OptionalProperty::MarkerOutlineWidth { series, width } => {
                let target = self.series_mut(property, series)?;
                let marker = target.marker.as_mut().ok_or(StyleError::Unsupported(property))?;
                marker.outline_width = Some(width);
            },
            OptionalProperty::MarkerOutlineFill { series } => {
                let target = self.series_mut(property, series)?;
                let marker = target.marker.as_mut().ok_or(StyleError::Unsupported(property))?;
                marker.outline_hidden = true;
            },
            OptionalProperty::DataLabelPosition { series, position } => {
                let target = self.series_mut(property, series)?;
                let labels = target
                    .data_labels
                    .as_mut()
                    .ok_or(StyleError::Unsupported(property))?;
                labels.position = Some(position);
            },
            OptionalProperty::AxisLineWidth { width } => {
                self.category_axis.line.width = Some(width);
            },
            OptionalProperty::AxisLineFill => {
                self.category_axis.line.no_fill = true;
            },
            OptionalProperty::AxisLineHidden => {
                self.category_axis.line.hidden = true;
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(kind: ChartKind) -> ChartFrame {
        let series = ChartSeries {
            name: Some("A".to_string()),
            values: vec![Some(1.0), Some(2.0)],
            color: RGBColor::BLACK,
            line_width: None,
            smooth: false,
            marker: None,
            data_labels: None,
        };
        let rect = Rect::new(Length::ZERO, Length::ZERO, Length::from_inches(1.0), Length::from_inches(1.0));
        ChartFrame::new(
            rect,
            kind,
            vec!["x".into(), "y".into()],
            vec![series],
            Capabilities::for_kind(kind),
        )
    }

    #[test]
    fn test_bar_refuses_smoothing() {
        let mut chart = frame(ChartKind::Bar);
        let err = chart.try_apply(OptionalProperty::Smoothing { series: 0 });
        assert!(matches!(err, Err(StyleError::Unsupported(_))));
        assert!(!chart.series[0].smooth);
    }

    #[test]
    fn test_line_smoothing_and_missing_series() {
        let mut chart = frame(ChartKind::Line);
        assert!(chart.try_apply(OptionalProperty::Smoothing { series: 0 }).is_ok());
        assert!(chart.series[0].smooth);

        let err = chart.try_apply(OptionalProperty::Smoothing { series: 3 });
        assert!(matches!(err, Err(StyleError::NoSuchSeries { series: 3, count: 1, .. })));
    }

    #[test]
    fn test_marker_property_without_marker() {
        let mut chart = frame(ChartKind::Line);
        let result = chart.try_apply(OptionalProperty::MarkerOutlineFill { series: 0 });
        assert!(result.is_err());
    }

    #[test]
    fn test_axis_line_visibility() {
        let mut chart = frame(ChartKind::Line);
        assert!(!chart.category_axis.line.is_invisible());
        chart
            .try_apply(OptionalProperty::AxisLineWidth { width: Length::ZERO })
            .unwrap();
        assert!(chart.category_axis.line.is_invisible());
    }

    #[test]
    fn test_series_name_ignores_empty() {
        let mut chart = frame(ChartKind::Line);
        assert_eq!(chart.series_name(0), Some("A"));
        chart.series[0].name = Some(String::new());
        assert_eq!(chart.series_name(0), None);
        assert_eq!(chart.series_name(9), None);
    }
}
