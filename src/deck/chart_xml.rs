//! Chart part (`ppt/charts/chartN.xml`) writer.
//!
//! Chart data is embedded as string and number literals; missing values are
//! left out of the point list so they plot as gaps.

use std::fmt::Write as FmtWrite;

use super::constants::{XML_DECLARATION, namespace};
use super::drawing::{character_properties, line, solid_fill};
use crate::chart::ChartKind;
use crate::common::{RGBColor, Result};
use crate::common::xml::escape_xml;
use crate::slide::{ChartFrame, ChartSeries, DataLabels, Marker, TextFormat};

const CATEGORY_AXIS_ID: u32 = 1;
const VALUE_AXIS_ID: u32 = 2;

/// Serialize a chart frame as a chart part.
pub fn write_chart(chart: &ChartFrame) -> Result<String> {
    let mut xml = String::with_capacity(4096 + chart.series.len() * 2048);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">"#,
        namespace::C,
        namespace::A,
        namespace::R
    )?;
    xml.push_str(r#"<c:date1904 val="0"/>"#);
    xml.push_str(r#"<c:lang val="en-US"/>"#);
    xml.push_str(r#"<c:roundedCorners val="0"/>"#);

    xml.push_str("<c:chart>");
    write!(xml, r#"<c:autoTitleDeleted val="{}"/>"#, bool_val(!chart.has_title))?;

    xml.push_str("<c:plotArea><c:layout/>");
    match chart.kind {
        ChartKind::Line => write_line_chart(&mut xml, chart)?,
        ChartKind::Bar => write_bar_chart(&mut xml, chart)?,
    }
    write_category_axis(&mut xml, chart)?;
    write_value_axis(&mut xml, chart)?;
    xml.push_str("</c:plotArea>");

    if chart.has_legend {
        xml.push_str(r#"<c:legend><c:legendPos val="r"/><c:overlay val="0"/></c:legend>"#);
    }
    xml.push_str(r#"<c:plotVisOnly val="1"/>"#);
    xml.push_str(r#"<c:dispBlanksAs val="gap"/>"#);
    xml.push_str("</c:chart>");

    xml.push_str("</c:chartSpace>");
    Ok(xml)
}

fn write_line_chart(xml: &mut String, chart: &ChartFrame) -> Result<()> {
    xml.push_str("<c:lineChart>");
    xml.push_str(r#"<c:grouping val="standard"/>"#);
    xml.push_str(r#"<c:varyColors val="0"/>"#);

    for (index, series) in chart.series.iter().enumerate() {
        write_series(xml, chart, index, series)?;
    }

    write_plot_data_labels(xml, chart.plot_data_labels);
    let has_markers = chart.series.iter().any(|s| s.marker.is_some());
    write!(xml, r#"<c:marker val="{}"/>"#, bool_val(has_markers))?;
    write_axis_ids(xml)?;
    xml.push_str("</c:lineChart>");
    Ok(())
}

fn write_bar_chart(xml: &mut String, chart: &ChartFrame) -> Result<()> {
    xml.push_str("<c:barChart>");
    xml.push_str(r#"<c:barDir val="col"/>"#);
    xml.push_str(r#"<c:grouping val="clustered"/>"#);
    xml.push_str(r#"<c:varyColors val="0"/>"#);

    for (index, series) in chart.series.iter().enumerate() {
        write_series(xml, chart, index, series)?;
    }

    write_plot_data_labels(xml, chart.plot_data_labels);
    xml.push_str(r#"<c:gapWidth val="150"/>"#);
    write_axis_ids(xml)?;
    xml.push_str("</c:barChart>");
    Ok(())
}

fn write_series(xml: &mut String, chart: &ChartFrame, index: usize, series: &ChartSeries) -> Result<()> {
    xml.push_str("<c:ser>");
    write!(xml, r#"<c:idx val="{}"/>"#, index)?;
    write!(xml, r#"<c:order val="{}"/>"#, index)?;

    if let Some(ref name) = series.name {
        write!(xml, "<c:tx><c:v>{}</c:v></c:tx>", escape_xml(name))?;
    }

    xml.push_str("<c:spPr>");
    if chart.kind == ChartKind::Bar {
        solid_fill(xml, series.color);
    }
    line(xml, series.line_width, Some(series.color))?;
    xml.push_str("</c:spPr>");

    if chart.kind == ChartKind::Bar {
        xml.push_str(r#"<c:invertIfNegative val="0"/>"#);
    }

    if let Some(ref marker) = series.marker {
        write_marker(xml, marker)?;
    }

    if let Some(ref labels) = series.data_labels {
        write_series_data_labels(xml, labels)?;
    }

    write_categories(xml, &chart.categories)?;
    write_values(xml, &series.values)?;

    if chart.kind == ChartKind::Line {
        write!(xml, r#"<c:smooth val="{}"/>"#, bool_val(series.smooth))?;
    }

    xml.push_str("</c:ser>");
    Ok(())
}

fn write_marker(xml: &mut String, marker: &Marker) -> Result<()> {
    xml.push_str("<c:marker>");
    write!(xml, r#"<c:symbol val="{}"/>"#, marker.style.xml_value())?;
    write!(xml, r#"<c:size val="{}"/>"#, marker.size)?;

    let has_outline = marker.outline_width.is_some() || marker.outline_hidden;
    if marker.fill.is_some() || has_outline {
        xml.push_str("<c:spPr>");
        if let Some(fill) = marker.fill {
            solid_fill(xml, fill);
        }
        if has_outline {
            let outline_fill = if marker.outline_hidden { None } else { marker.fill };
            line(xml, marker.outline_width, outline_fill)?;
        }
        xml.push_str("</c:spPr>");
    }

    xml.push_str("</c:marker>");
    Ok(())
}

fn write_series_data_labels(xml: &mut String, labels: &DataLabels) -> Result<()> {
    xml.push_str("<c:dLbls>");
    write_text_properties(xml, &labels.format)?;
    if let Some(position) = labels.position {
        write!(xml, r#"<c:dLblPos val="{}"/>"#, position.xml_value())?;
    }
    xml.push_str(r#"<c:showLegendKey val="0"/>"#);
    write!(xml, r#"<c:showVal val="{}"/>"#, bool_val(labels.show_value))?;
    xml.push_str(r#"<c:showCatName val="0"/>"#);
    xml.push_str(r#"<c:showSerName val="0"/>"#);
    xml.push_str(r#"<c:showPercent val="0"/>"#);
    xml.push_str(r#"<c:showBubbleSize val="0"/>"#);
    xml.push_str("</c:dLbls>");
    Ok(())
}

fn write_plot_data_labels(xml: &mut String, show_value: bool) {
    xml.push_str("<c:dLbls>");
    xml.push_str(r#"<c:showLegendKey val="0"/>"#);
    xml.push_str(if show_value {
        r#"<c:showVal val="1"/>"#
    } else {
        r#"<c:showVal val="0"/>"#
    });
    xml.push_str(r#"<c:showCatName val="0"/>"#);
    xml.push_str(r#"<c:showSerName val="0"/>"#);
    xml.push_str(r#"<c:showPercent val="0"/>"#);
    xml.push_str(r#"<c:showBubbleSize val="0"/>"#);
    xml.push_str("</c:dLbls>");
}

/// `<c:txPr>` applying `format` as the default run properties.
fn write_text_properties(xml: &mut String, format: &TextFormat) -> Result<()> {
    xml.push_str("<c:txPr><a:bodyPr/><a:lstStyle/><a:p><a:pPr>");
    character_properties(xml, "a:defRPr", format, None)?;
    xml.push_str(r#"</a:pPr><a:endParaRPr lang="en-US"/></a:p></c:txPr>"#);
    Ok(())
}

fn write_categories(xml: &mut String, categories: &[String]) -> Result<()> {
    xml.push_str("<c:cat><c:strLit>");
    write!(xml, r#"<c:ptCount val="{}"/>"#, categories.len())?;
    for (i, category) in categories.iter().enumerate() {
        write!(xml, r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#, i, escape_xml(category))?;
    }
    xml.push_str("</c:strLit></c:cat>");
    Ok(())
}

fn write_values(xml: &mut String, values: &[Option<f64>]) -> Result<()> {
    xml.push_str("<c:val><c:numLit>");
    xml.push_str("<c:formatCode>General</c:formatCode>");
    write!(xml, r#"<c:ptCount val="{}"/>"#, values.len())?;

    let mut buf = ryu::Buffer::new();
    for (i, value) in values.iter().enumerate() {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            write!(xml, r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#, i, buf.format_finite(v))?;
        }
    }

    xml.push_str("</c:numLit></c:val>");
    Ok(())
}

fn write_category_axis(xml: &mut String, chart: &ChartFrame) -> Result<()> {
    let axis = &chart.category_axis;

    xml.push_str("<c:catAx>");
    write!(xml, r#"<c:axId val="{}"/>"#, CATEGORY_AXIS_ID)?;
    xml.push_str(r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#);
    write!(xml, r#"<c:delete val="{}"/>"#, bool_val(!axis.visible))?;
    xml.push_str(r#"<c:axPos val="b"/>"#);
    xml.push_str(r#"<c:numFmt formatCode="General" sourceLinked="1"/>"#);

    let line_invisible = axis.line.is_invisible();
    xml.push_str(if line_invisible {
        r#"<c:majorTickMark val="none"/>"#
    } else {
        r#"<c:majorTickMark val="out"/>"#
    });
    xml.push_str(r#"<c:minorTickMark val="none"/>"#);
    xml.push_str(r#"<c:tickLblPos val="nextTo"/>"#);

    if line_invisible {
        xml.push_str("<c:spPr>");
        let width = axis.line.width.filter(|_| !axis.line.hidden);
        line(xml, width, None)?;
        xml.push_str("</c:spPr>");
    } else if axis.line.width.is_some() {
        xml.push_str("<c:spPr>");
        line(xml, axis.line.width, Some(RGBColor::BLACK))?;
        xml.push_str("</c:spPr>");
    }

    write_text_properties(xml, &axis.tick_labels)?;

    write!(xml, r#"<c:crossAx val="{}"/>"#, VALUE_AXIS_ID)?;
    xml.push_str(r#"<c:crosses val="autoZero"/>"#);
    xml.push_str(r#"<c:auto val="1"/>"#);
    xml.push_str(r#"<c:lblAlgn val="ctr"/>"#);
    xml.push_str(r#"<c:lblOffset val="100"/>"#);
    xml.push_str(r#"<c:noMultiLvlLbl val="0"/>"#);
    xml.push_str("</c:catAx>");
    Ok(())
}

fn write_value_axis(xml: &mut String, chart: &ChartFrame) -> Result<()> {
    let axis = &chart.value_axis;

    xml.push_str("<c:valAx>");
    write!(xml, r#"<c:axId val="{}"/>"#, VALUE_AXIS_ID)?;
    xml.push_str(r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#);
    write!(xml, r#"<c:delete val="{}"/>"#, bool_val(!axis.visible))?;
    xml.push_str(r#"<c:axPos val="l"/>"#);
    if axis.major_gridlines {
        xml.push_str("<c:majorGridlines/>");
    }
    xml.push_str(r#"<c:numFmt formatCode="General" sourceLinked="1"/>"#);
    xml.push_str(r#"<c:majorTickMark val="out"/>"#);
    xml.push_str(r#"<c:minorTickMark val="none"/>"#);
    xml.push_str(r#"<c:tickLblPos val="nextTo"/>"#);
    write!(xml, r#"<c:crossAx val="{}"/>"#, CATEGORY_AXIS_ID)?;
    xml.push_str(r#"<c:crosses val="autoZero"/>"#);
    xml.push_str(r#"<c:crossBetween val="between"/>"#);
    xml.push_str("</c:valAx>");
    Ok(())
}

fn write_axis_ids(xml: &mut String) -> Result<()> {
    write!(
        xml,
        r#"<c:axId val="{}"/><c:axId val="{}"/>"#,
        CATEGORY_AXIS_ID, VALUE_AXIS_ID
    )?;
    Ok(())
}

#[inline]
fn bool_val(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartModel, Series};
    use crate::slide::SlideComposer;

    fn composed(kind: ChartKind, values: Vec<Option<f64>>) -> ChartFrame {
        let categories = (0..values.len()).map(|i| format!("C{i}")).collect();
        let series = vec![Series::new(Some("Sales & Co".into()), values)];
        let model = ChartModel::new(kind, categories, series).unwrap();
        let slide = SlideComposer::default().compose_chart_slide(&model, "T");
        slide.chart().unwrap().clone()
    }

    #[test]
    fn test_line_chart_xml() {
        let xml = write_chart(&composed(ChartKind::Line, vec![Some(10.0), None, Some(20.5)])).unwrap();

        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<c:lineChart>"));
        assert!(xml.contains(r#"<c:autoTitleDeleted val="1"/>"#));
        assert!(!xml.contains("<c:legend>"));
        assert!(xml.contains("<c:tx><c:v>Sales &amp; Co</c:v></c:tx>"));
        assert!(xml.contains(r#"<c:smooth val="1"/>"#));
        assert!(xml.contains(r#"<c:symbol val="circle"/><c:size val="6"/>"#));
        assert!(xml.contains(r#"<c:dLblPos val="t"/>"#));
        assert!(xml.contains(r#"<a:defRPr sz="1000"><a:solidFill><a:srgbClr val="2E75B6"/>"#));

        // Missing point omitted, count kept
        assert!(xml.contains(r#"<c:ptCount val="3"/><c:pt idx="0"><c:v>10.0</c:v></c:pt><c:pt idx="2"><c:v>20.5</c:v></c:pt>"#));
    }

    #[test]
    fn test_axes_xml() {
        let xml = write_chart(&composed(ChartKind::Line, vec![Some(1.0), Some(2.0)])).unwrap();

        let cat_ax = &xml[xml.find("<c:catAx>").unwrap()..xml.find("</c:catAx>").unwrap()];
        assert!(cat_ax.contains(r#"<c:delete val="0"/>"#));
        assert!(cat_ax.contains(r#"<c:spPr><a:ln w="0"><a:noFill/></a:ln></c:spPr>"#));
        assert!(cat_ax.contains(r#"<a:defRPr sz="1200">"#));

        let val_ax = &xml[xml.find("<c:valAx>").unwrap()..xml.find("</c:valAx>").unwrap()];
        assert!(val_ax.contains(r#"<c:delete val="1"/>"#));
        assert!(!val_ax.contains("<c:majorGridlines/>"));
    }

    #[test]
    fn test_plot_labels_off_series_labels_on() {
        let xml = write_chart(&composed(ChartKind::Line, vec![Some(1.0)])).unwrap();
        let plot_labels = xml.rfind("<c:dLbls>").unwrap();
        assert!(xml[plot_labels..].starts_with(r#"<c:dLbls><c:showLegendKey val="0"/><c:showVal val="0"/>"#));

        let series_labels = xml.find("<c:dLbls>").unwrap();
        assert!(series_labels < plot_labels);
        assert!(xml[series_labels..plot_labels].contains(r#"<c:showVal val="1"/>"#));
    }

    #[test]
    fn test_bar_chart_xml() {
        let xml = write_chart(&composed(ChartKind::Bar, vec![Some(3.0), Some(4.0)])).unwrap();
        assert!(xml.contains(r#"<c:barChart><c:barDir val="col"/><c:grouping val="clustered"/>"#));
        assert!(!xml.contains("<c:smooth"));
        assert!(!xml.contains("<c:marker>"));
        assert!(!xml.contains("<c:dLblPos"));
    }
}
