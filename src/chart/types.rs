//! Chart type enumerations.

use serde::Serialize;

/// The chart visual a [`ChartModel`](super::ChartModel) is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Line chart with evolution summaries
    Line,
    /// Clustered column chart, raw values only
    Bar,
}

impl ChartKind {
    /// Returns the plot element name used in chart XML.
    #[inline]
    pub const fn xml_element(&self) -> &'static str {
        match self {
            Self::Line => "c:lineChart",
            Self::Bar => "c:barChart",
        }
    }
}

/// Data label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLabelPosition {
    /// Above the data point
    Top,
}

impl DataLabelPosition {
    /// Returns the XML value for this position.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Top => "t",
        }
    }
}

/// Marker style for line charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Circle marker
    Circle,
}

impl MarkerStyle {
    /// Returns the XML value for this marker style.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_values() {
        assert_eq!(ChartKind::Line.xml_element(), "c:lineChart");
        assert_eq!(ChartKind::Bar.xml_element(), "c:barChart");
        assert_eq!(DataLabelPosition::Top.xml_value(), "t");
        assert_eq!(MarkerStyle::Circle.xml_value(), "circle");
    }
}
