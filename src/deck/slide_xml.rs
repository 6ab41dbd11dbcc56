//! Slide part (`ppt/slides/slideN.xml`) writer.

use std::fmt::Write as FmtWrite;

use super::constants::{XML_DECLARATION, namespace};
use super::drawing::character_properties;
use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use crate::slide::{ChartFrame, Rect, Shape, Slide, TextBox};

/// Serialize a slide. `chart_rel_ids` holds one relationship id per chart
/// shape, in shape order.
pub fn write_slide(slide: &Slide, chart_rel_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        namespace::A,
        namespace::R,
        namespace::P
    )?;
    xml.push_str("<p:cSld><p:spTree>");
    write_group_properties(&mut xml);

    // Group shape uses id 1
    let mut rel_ids = chart_rel_ids.iter();
    for (index, shape) in slide.shapes().iter().enumerate() {
        let shape_id = index + 2;
        match shape {
            Shape::Text(text) => write_text_box(&mut xml, shape_id, text)?,
            Shape::Chart(chart) => {
                let rel_id = rel_ids.next().ok_or_else(|| {
                    Error::Xml(format!("no chart relationship for shape {}", shape_id))
                })?;
                write_chart_frame(&mut xml, shape_id, chart, rel_id)?;
            },
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

/// Required properties of the slide's root group shape.
pub(crate) fn write_group_properties(xml: &mut String) {
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str("<p:grpSpPr><a:xfrm>");
    xml.push_str(r#"<a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/>"#);
    xml.push_str("</a:xfrm></p:grpSpPr>");
}

fn write_transform(xml: &mut String, tag: &str, rect: &Rect) -> Result<()> {
    let mut x = itoa::Buffer::new();
    let mut y = itoa::Buffer::new();
    write!(
        xml,
        r#"<{tag}><a:off x="{}" y="{}"/>"#,
        x.format(rect.x.emus()),
        y.format(rect.y.emus())
    )?;
    write!(
        xml,
        r#"<a:ext cx="{}" cy="{}"/></{tag}>"#,
        x.format(rect.width.emus()),
        y.format(rect.height.emus())
    )?;
    Ok(())
}

fn write_text_box(xml: &mut String, shape_id: usize, text: &TextBox) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, shape_id, escape_xml(&text.name))?;

    match text.placeholder {
        Some(placeholder) => {
            xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>"#);
            write!(xml, r#"<p:ph type="{}""#, placeholder.xml_type())?;
            if let Some(idx) = placeholder.xml_index() {
                write!(xml, r#" idx="{}""#, idx)?;
            }
            xml.push_str("/></p:nvPr>");
        },
        None => xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/>"#),
    }
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    write_transform(xml, "a:xfrm", &text.rect)?;
    if text.placeholder.is_none() {
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
    }
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    if text.placeholder.is_none() {
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"/>"#);
    } else {
        xml.push_str("<a:bodyPr/>");
    }
    xml.push_str("<a:lstStyle/>");

    for paragraph in &text.paragraphs {
        xml.push_str("<a:p>");
        if let Some(alignment) = paragraph.alignment {
            write!(xml, r#"<a:pPr algn="{}"/>"#, alignment.xml_value())?;
        }
        for run in &paragraph.runs {
            xml.push_str("<a:r>");
            character_properties(xml, "a:rPr", &run.format, Some("en-US"))?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(&run.text))?;
            xml.push_str("</a:r>");
        }
        xml.push_str("</a:p>");
    }
    if text.paragraphs.is_empty() {
        xml.push_str("<a:p/>");
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_chart_frame(xml: &mut String, shape_id: usize, chart: &ChartFrame, rel_id: &str) -> Result<()> {
    xml.push_str("<p:graphicFrame><p:nvGraphicFramePr>");
    write!(xml, r#"<p:cNvPr id="{}" name="Chart {}"/>"#, shape_id, shape_id)?;
    xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#);
    xml.push_str("<p:nvPr/></p:nvGraphicFramePr>");

    write_transform(xml, "p:xfrm", &chart.rect)?;

    xml.push_str("<a:graphic>");
    write!(xml, r#"<a:graphicData uri="{}">"#, namespace::C)?;
    write!(xml, r#"<c:chart xmlns:c="{}" r:id="{}"/>"#, namespace::C, rel_id)?;
    xml.push_str("</a:graphicData></a:graphic>");
    xml.push_str("</p:graphicFrame>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, ChartModel, Series};
    use crate::slide::SlideComposer;

    #[test]
    fn test_title_slide_xml() {
        let slide = SlideComposer::default().compose_title_slide("Q3 <Report>", "Sub");
        let xml = write_slide(&slide, &[]).unwrap();

        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
        assert!(xml.contains("<a:t>Q3 &lt;Report&gt;</a:t>"));
        assert!(xml.contains(r#"sz="4000" b="1""#));
        assert!(xml.contains(r#"<a:latin typeface="Century Gothic"/>"#));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(!xml.contains("<p:graphicFrame>"));
    }

    #[test]
    fn test_chart_slide_xml() {
        let series = vec![
            Series::new(Some("a".into()), vec![Some(1.0), Some(2.0)]),
            Series::new(Some("b".into()), vec![Some(2.0), Some(1.0)]),
        ];
        let model = ChartModel::new(ChartKind::Line, vec!["x".into(), "y".into()], series).unwrap();
        let slide = SlideComposer::default().compose_chart_slide(&model, "Prices");
        let xml = write_slide(&slide, &["rId2".to_string()]).unwrap();

        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="rId2"/>"#));
        // Chart rectangle at 1in, 2in
        assert!(xml.contains(r#"<p:xfrm><a:off x="914400" y="1828800"/><a:ext cx="7772400" cy="4572000"/></p:xfrm>"#));
        assert!(xml.contains(r#"name="Card 1""#));
        assert!(xml.contains(r#"name="Card 2""#));
        assert!(xml.contains("<a:t>+100%</a:t>"));
        assert!(xml.contains("<a:t>-50%</a:t>"));
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
    }

    #[test]
    fn test_missing_chart_relationship() {
        let series = vec![Series::new(None, vec![Some(1.0)])];
        let model = ChartModel::new(ChartKind::Line, vec!["x".into()], series).unwrap();
        let slide = SlideComposer::default().compose_chart_slide(&model, "T");
        assert!(matches!(write_slide(&slide, &[]), Err(Error::Xml(_))));
    }
}
