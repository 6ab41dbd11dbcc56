//! DrawingML fragments shared by slide and chart parts.

use std::fmt::Write as FmtWrite;

use crate::common::unit::pt_to_font_size;
use crate::common::xml::escape_xml;
use crate::common::{Length, RGBColor};
use crate::slide::TextFormat;

/// `<a:solidFill>` with an sRGB color.
pub fn solid_fill(xml: &mut String, color: RGBColor) {
    xml.push_str(r#"<a:solidFill><a:srgbClr val=""#);
    xml.push_str(&color.to_hex());
    xml.push_str(r#""/></a:solidFill>"#);
}

/// Character properties element `tag` (`a:rPr`, `a:defRPr`, ...).
///
/// Children follow the schema order: fill before the Latin typeface.
pub fn character_properties(
    xml: &mut String,
    tag: &str,
    format: &TextFormat,
    lang: Option<&str>,
) -> std::fmt::Result {
    write!(xml, "<{}", tag)?;
    if let Some(lang) = lang {
        write!(xml, r#" lang="{}""#, lang)?;
    }
    if let Some(size) = format.size {
        let mut buf = itoa::Buffer::new();
        write!(xml, r#" sz="{}""#, buf.format(pt_to_font_size(size)))?;
    }
    match format.bold {
        Some(true) => xml.push_str(r#" b="1""#),
        Some(false) => xml.push_str(r#" b="0""#),
        None => {},
    }
    if format.color.is_none() && format.font.is_none() {
        xml.push_str("/>");
        return Ok(());
    }
    xml.push('>');

    if let Some(color) = format.color {
        solid_fill(xml, color);
    }
    if let Some(ref font) = format.font {
        write!(xml, r#"<a:latin typeface="{}"/>"#, escape_xml(font))?;
    }
    write!(xml, "</{}>", tag)
}

/// `<a:ln>` with an optional width; `fill` of `None` writes `<a:noFill/>`.
pub fn line(xml: &mut String, width: Option<Length>, fill: Option<RGBColor>) -> std::fmt::Result {
    xml.push_str("<a:ln");
    if let Some(width) = width {
        let mut buf = itoa::Buffer::new();
        write!(xml, r#" w="{}""#, buf.format(width.emus()))?;
    }
    xml.push('>');
    match fill {
        Some(color) => solid_fill(xml, color),
        None => xml.push_str("<a:noFill/>"),
    }
    xml.push_str("</a:ln>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_properties() {
        let format = TextFormat::new("Century Gothic", 10.0)
            .bold(true)
            .color(RGBColor::new(46, 117, 182));
        let mut xml = String::new();
        character_properties(&mut xml, "a:rPr", &format, Some("en-US")).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<a:rPr lang="en-US" sz="1000" b="1">"#,
                r#"<a:solidFill><a:srgbClr val="2E75B6"/></a:solidFill>"#,
                r#"<a:latin typeface="Century Gothic"/></a:rPr>"#
            )
        );
    }

    #[test]
    fn test_empty_character_properties() {
        let mut xml = String::new();
        character_properties(&mut xml, "a:defRPr", &TextFormat::default(), None).unwrap();
        assert_eq!(xml, "<a:defRPr/>");
    }

    #[test]
    fn test_line() {
        let mut xml = String::new();
        line(&mut xml, Some(Length::ZERO), None).unwrap();
        assert_eq!(xml, r#"<a:ln w="0"><a:noFill/></a:ln>"#);

        let mut xml = String::new();
        line(&mut xml, Some(Length::from_pt(2.5)), Some(RGBColor::BLACK)).unwrap();
        assert!(xml.starts_with(r#"<a:ln w="31750">"#));
    }
}
