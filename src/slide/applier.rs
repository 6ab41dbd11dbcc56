//! Best-effort application of optional chart styling.
//!
//! Some style properties only exist for some chart visuals: a clustered
//! column chart has no line smoothing and no markers. Each such property is
//! an [`OptionalProperty`]; a [`StyleApplier`] either applies it or reports a
//! [`StyleError`]. The composer routes every optional property through
//! [`BestEffort`], which logs and records refusals instead of failing the
//! slide.

use std::fmt;

use bitflags::bitflags;
use thiserror::Error;

use crate::chart::{ChartKind, DataLabelPosition};
use crate::common::Length;

bitflags! {
    /// Optional style features a chart visual supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Smoothed series lines
        const SMOOTHING = 1 << 0;
        /// Marker outline width
        const MARKER_OUTLINE_WIDTH = 1 << 1;
        /// Clearing the marker outline fill
        const MARKER_OUTLINE_FILL = 1 << 2;
        /// Explicit data label position
        const DATA_LABEL_POSITION = 1 << 3;
        /// Category axis line width
        const AXIS_LINE_WIDTH = 1 << 4;
        /// Clearing the category axis line fill
        const AXIS_LINE_FILL = 1 << 5;
    }
}

impl Capabilities {
    /// Features of the given chart visual.
    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Line => Self::all(),
            ChartKind::Bar => Self::AXIS_LINE_WIDTH | Self::AXIS_LINE_FILL,
        }
    }
}

/// A style property that may not be supported by every chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionalProperty {
    Smoothing { series: usize },
    MarkerOutlineWidth { series: usize, width: Length },
    MarkerOutlineFill { series: usize },
    DataLabelPosition { series: usize, position: DataLabelPosition },
    AxisLineWidth { width: Length },
    AxisLineFill,
    /// Hide the category axis line outright; supported everywhere
    AxisLineHidden,
}

impl OptionalProperty {
    /// Features the property needs.
    pub fn required(&self) -> Capabilities {
        match self {
            Self::Smoothing { .. } => Capabilities::SMOOTHING,
            Self::MarkerOutlineWidth { .. } => Capabilities::MARKER_OUTLINE_WIDTH,
            Self::MarkerOutlineFill { .. } => Capabilities::MARKER_OUTLINE_FILL,
            Self::DataLabelPosition { .. } => Capabilities::DATA_LABEL_POSITION,
            Self::AxisLineWidth { .. } => Capabilities::AXIS_LINE_WIDTH,
            Self::AxisLineFill => Capabilities::AXIS_LINE_FILL,
            Self::AxisLineHidden => Capabilities::empty(),
        }
    }

    /// Index of the series the property targets, if any.
    pub fn series(&self) -> Option<usize> {
        match *self {
            Self::Smoothing { series }
            | Self::MarkerOutlineWidth { series, .. }
            | Self::MarkerOutlineFill { series }
            | Self::DataLabelPosition { series, .. } => Some(series),
            Self::AxisLineWidth { .. } | Self::AxisLineFill | Self::AxisLineHidden => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Smoothing { .. } => "line smoothing",
            Self::MarkerOutlineWidth { .. } => "marker outline width",
            Self::MarkerOutlineFill { .. } => "marker outline fill",
            Self::DataLabelPosition { .. } => "data label position",
            Self::AxisLineWidth { .. } => "axis line width",
            Self::AxisLineFill => "axis line fill",
            Self::AxisLineHidden => "hidden axis line",
        }
    }
}

impl fmt::Display for OptionalProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.series() {
            Some(series) => write!(f, "{} (series {})", self.name(), series),
            None => f.write_str(self.name()),
        }
    }
}

/// Why an optional property was not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("{0} is not supported by this chart")]
    Unsupported(OptionalProperty),

    #[error("{property} targets series {series}, but the chart has {count}")]
    NoSuchSeries {
        property: OptionalProperty,
        series: usize,
        count: usize,
    },
}

/// A styling target that may refuse optional properties.
pub trait StyleApplier {
    /// Features this target supports.
    fn capabilities(&self) -> Capabilities;

    /// Apply one property, or report why it cannot be applied. A refused
    /// property leaves the target unchanged.
    fn try_apply(&mut self, property: OptionalProperty) -> Result<(), StyleError>;
}

/// An optional property that was skipped while composing a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedProperty {
    pub property: OptionalProperty,
    pub reason: StyleError,
}

/// Applies optional properties, keeping a record of refusals.
pub struct BestEffort<'a, A: StyleApplier + ?Sized> {
    target: &'a mut A,
    skipped: Vec<SkippedProperty>,
}

impl<'a, A: StyleApplier + ?Sized> BestEffort<'a, A> {
    pub fn new(target: &'a mut A) -> Self {
        Self {
            target,
            skipped: Vec::new(),
        }
    }

    /// Apply `property`; returns whether it took effect.
    pub fn apply(&mut self, property: OptionalProperty) -> bool {
        match self.target.try_apply(property) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(%property, %reason, "skipping optional chart style");
                self.skipped.push(SkippedProperty { property, reason });
                false
            },
        }
    }

    /// The properties that were refused, in application order.
    pub fn into_skipped(self) -> Vec<SkippedProperty> {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records applied properties; supports only what it was built with.
    struct Recorder {
        caps: Capabilities,
        applied: Vec<OptionalProperty>,
    }

    impl StyleApplier for Recorder {
        fn capabilities(&self) -> Capabilities {
            self.caps
        }

        fn try_apply(&mut self, property: OptionalProperty) -> Result<(), StyleError> {
            if !self.caps.contains(property.required()) {
                return Err(StyleError::Unsupported(property));
            }
            self.applied.push(property);
            Ok(())
        }
    }

    #[test]
    fn test_bar_lacks_line_features() {
        let bar = Capabilities::for_kind(ChartKind::Bar);
        assert!(!bar.contains(Capabilities::SMOOTHING));
        assert!(!bar.contains(Capabilities::MARKER_OUTLINE_WIDTH));
        assert!(bar.contains(Capabilities::AXIS_LINE_FILL));
        assert_eq!(Capabilities::for_kind(ChartKind::Line), Capabilities::all());
    }

    #[test]
    fn test_hidden_axis_line_always_supported() {
        assert!(Capabilities::empty().contains(OptionalProperty::AxisLineHidden.required()));
    }

    #[test]
    fn test_best_effort_records_refusals() {
        let mut target = Recorder {
            caps: Capabilities::AXIS_LINE_WIDTH,
            applied: Vec::new(),
        };

        let mut styler = BestEffort::new(&mut target);
        assert!(!styler.apply(OptionalProperty::Smoothing { series: 0 }));
        assert!(styler.apply(OptionalProperty::AxisLineWidth { width: Length::ZERO }));
        assert!(!styler.apply(OptionalProperty::AxisLineFill));

        let skipped = styler.into_skipped();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].property, OptionalProperty::Smoothing { series: 0 });
        assert_eq!(
            skipped[1].reason.to_string(),
            "axis line fill is not supported by this chart"
        );
        assert_eq!(target.applied.len(), 1);
    }

    #[test]
    fn test_property_display() {
        let prop = OptionalProperty::MarkerOutlineFill { series: 1 };
        assert_eq!(prop.to_string(), "marker outline fill (series 1)");
    }
}
